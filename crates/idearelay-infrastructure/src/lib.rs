pub mod history_repository;
pub mod paths;
pub mod settings_repository;
pub mod smtp_mailer;
pub mod storage;

pub use history_repository::JsonHistoryRepository;
pub use paths::RelayPaths;
pub use settings_repository::JsonSettingsRepository;
pub use smtp_mailer::SmtpMailer;
