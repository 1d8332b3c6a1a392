//! Shared server state and the in-flight generation guard.

use idearelay_application::{InterviewService, StructuringService, SubmissionService};
use idearelay_core::agent::CompletionAgent;
use idearelay_core::history::HistoryRepository;
use idearelay_core::mail::MailTransport;
use idearelay_core::settings::SettingsRepository;
use idearelay_infrastructure::{JsonHistoryRepository, JsonSettingsRepository, SmtpMailer};
use idearelay_interaction::{INTERVIEW_MAX_TOKENS, INTERVIEW_MODEL, OpenRouterAgent};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Rejects a second structuring request while one is in flight.
///
/// This is an idempotent guard, not a queue: the composer issues one
/// generation at a time, and a duplicate click while a call is running is
/// answered with a conflict. The permit releases on drop, so a cancelled
/// (disconnected) request frees the gate without any bookkeeping.
#[derive(Clone, Default)]
pub struct GenerationGate {
    in_flight: Arc<AtomicBool>,
}

impl GenerationGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a permit when no generation is in flight.
    pub fn try_acquire(&self) -> Option<GenerationPermit> {
        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| GenerationPermit {
                in_flight: self.in_flight.clone(),
            })
    }
}

/// RAII permit for one structuring call.
pub struct GenerationPermit {
    in_flight: Arc<AtomicBool>,
}

impl Drop for GenerationPermit {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::SeqCst);
    }
}

/// Everything the request handlers share.
#[derive(Clone)]
pub struct AppState {
    pub structuring: Arc<StructuringService>,
    pub interview: Arc<InterviewService>,
    pub submission: Arc<SubmissionService>,
    pub history: Arc<dyn HistoryRepository>,
    pub settings: Arc<dyn SettingsRepository>,
    pub generation_gate: GenerationGate,
}

impl AppState {
    /// Assembles the state from explicit parts (used by tests).
    pub fn new(
        structuring_agent: Option<Arc<dyn CompletionAgent>>,
        interview_agent: Option<Arc<dyn CompletionAgent>>,
        mailer: Option<Arc<dyn MailTransport>>,
        history: Arc<dyn HistoryRepository>,
        settings: Arc<dyn SettingsRepository>,
    ) -> Self {
        Self {
            structuring: Arc::new(StructuringService::new(
                structuring_agent,
                history.clone(),
                settings.clone(),
            )),
            interview: Arc::new(InterviewService::new(interview_agent, history.clone())),
            submission: Arc::new(SubmissionService::new(mailer)),
            history,
            settings,
            generation_gate: GenerationGate::new(),
        }
    }

    /// Assembles the state from secret storage and environment variables.
    ///
    /// A missing LLM credential silently selects the fallback generator; a
    /// missing SMTP credential leaves submission unconfigured (surfaced to
    /// callers as a distinct error).
    pub fn from_env() -> anyhow::Result<Self> {
        let history: Arc<dyn HistoryRepository> = Arc::new(JsonHistoryRepository::try_default()?);
        let settings: Arc<dyn SettingsRepository> =
            Arc::new(JsonSettingsRepository::try_default()?);

        let (structuring_agent, interview_agent) = match OpenRouterAgent::try_from_env() {
            Ok(base) => {
                let structuring: Arc<dyn CompletionAgent> = Arc::new(base.clone());
                let interview: Arc<dyn CompletionAgent> = Arc::new(
                    base.with_model(INTERVIEW_MODEL)
                        .with_max_tokens(INTERVIEW_MAX_TOKENS),
                );
                (Some(structuring), Some(interview))
            }
            Err(_) => {
                tracing::warn!(
                    "OpenRouter credential not configured; using the deterministic fallback generator"
                );
                (None, None)
            }
        };

        let mailer: Option<Arc<dyn MailTransport>> = match SmtpMailer::try_from_env() {
            Ok(mailer) => Some(Arc::new(mailer)),
            Err(_) => {
                tracing::warn!("SMTP credentials not configured; submissions will be rejected");
                None
            }
        };

        Ok(Self::new(
            structuring_agent,
            interview_agent,
            mailer,
            history,
            settings,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_allows_one_permit_at_a_time() {
        let gate = GenerationGate::new();
        let permit = gate.try_acquire();
        assert!(permit.is_some());
        assert!(gate.try_acquire().is_none());

        drop(permit);
        assert!(gate.try_acquire().is_some());
    }

    #[test]
    fn test_gate_clones_share_the_flag() {
        let gate = GenerationGate::new();
        let clone = gate.clone();
        let _permit = gate.try_acquire().unwrap();
        assert!(clone.try_acquire().is_none());
    }
}
