pub mod interview_service;
pub mod structuring_service;
pub mod submission_service;

pub use interview_service::{InterviewAction, InterviewReply, InterviewService, InterviewTurn};
pub use structuring_service::StructuringService;
pub use submission_service::SubmissionService;

#[cfg(test)]
pub(crate) mod test_support;
