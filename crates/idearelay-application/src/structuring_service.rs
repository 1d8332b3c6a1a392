//! One-shot structuring flow.
//!
//! Validates the draft, assembles the instruction document, issues a single
//! completion call (or the deterministic fallback when no credential is
//! configured), and records the result in history along with the last-used
//! composer settings.

use idearelay_core::agent::CompletionAgent;
use idearelay_core::draft::IdeaDraft;
use idearelay_core::error::{RelayError, Result};
use idearelay_core::fallback::FallbackGenerator;
use idearelay_core::history::{HistoryEntry, HistoryRepository};
use idearelay_core::prompt::PromptAssembler;
use idearelay_core::settings::{Settings, SettingsRepository};
use std::sync::Arc;

/// Orchestrates one structuring request end to end.
pub struct StructuringService {
    agent: Option<Arc<dyn CompletionAgent>>,
    history: Arc<dyn HistoryRepository>,
    settings: Arc<dyn SettingsRepository>,
}

impl StructuringService {
    /// Creates the service. `agent: None` selects the fallback generator.
    pub fn new(
        agent: Option<Arc<dyn CompletionAgent>>,
        history: Arc<dyn HistoryRepository>,
        settings: Arc<dyn SettingsRepository>,
    ) -> Self {
        Self {
            agent,
            history,
            settings,
        }
    }

    /// Generates a structured submission for the draft.
    ///
    /// A transient agent failure surfaces as a retryable collaborator
    /// error with no automatic retry. History is only written after a
    /// non-empty document exists, so an aborted (dropped) request never
    /// records an entry.
    pub async fn generate(&self, draft: &IdeaDraft) -> Result<String> {
        draft.validate()?;

        let document = match &self.agent {
            None => {
                tracing::info!("no completion credential configured, using fallback generator");
                FallbackGenerator::generate(draft)
            }
            Some(agent) => {
                let messages = PromptAssembler::request_messages(draft)?;
                let raw = agent.generate(&messages).await.map_err(|err| {
                    tracing::error!(error = %err, "structuring completion failed");
                    RelayError::collaborator("Failed to generate idea. Please try again.")
                })?;
                raw.trim().to_string()
            }
        };

        if document.is_empty() {
            return Err(RelayError::collaborator(
                "Failed to generate idea. Please try again.",
            ));
        }

        self.record(draft, &document).await;
        Ok(document)
    }

    /// Records history and last-used settings; failures are logged, never
    /// propagated, because the generated document is already in hand.
    async fn record(&self, draft: &IdeaDraft, document: &str) {
        let entry = HistoryEntry::new(draft.transcript.trim(), document, draft.category_tag());
        if let Err(err) = self.history.record(entry).await {
            tracing::warn!(error = %err, "failed to record history entry");
        }

        let settings = Settings {
            categories: draft.categories.clone(),
            detail_level: draft.detail_level,
            output_format: draft.output_format,
            modifiers: draft.modifiers.clone(),
        };
        if let Err(err) = self.settings.save(&settings).await {
            tracing::warn!(error = %err, "failed to save last-used settings");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MemoryHistory, MemorySettings, ScriptedAgent};

    fn draft() -> IdeaDraft {
        IdeaDraft {
            transcript: "Add e-sign to disclosures".to_string(),
            categories: vec!["doc-mgmt".to_string()],
            ..IdeaDraft::default()
        }
    }

    fn service(
        agent: Option<Arc<dyn CompletionAgent>>,
    ) -> (StructuringService, Arc<MemoryHistory>, Arc<MemorySettings>) {
        let history = Arc::new(MemoryHistory::default());
        let settings = Arc::new(MemorySettings::default());
        (
            StructuringService::new(agent, history.clone(), settings.clone()),
            history,
            settings,
        )
    }

    #[tokio::test]
    async fn test_agent_document_returned_verbatim_and_recorded() {
        let agent = Arc::new(ScriptedAgent::new(["## Structured submission"]));
        let (service, history, settings) = service(Some(agent.clone()));

        let document = service.generate(&draft()).await.unwrap();
        assert_eq!(document, "## Structured submission");
        assert_eq!(agent.calls(), 1);

        let entries = history.load().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].transcript, "Add e-sign to disclosures");
        assert_eq!(entries[0].prompt, "## Structured submission");
        assert_eq!(entries[0].category_tag, "doc-mgmt");

        let saved = settings.load().await.unwrap();
        assert_eq!(saved.categories, vec!["doc-mgmt"]);
    }

    #[tokio::test]
    async fn test_no_credential_uses_fallback_generator() {
        let (service, history, _) = service(None);
        let document = service.generate(&draft()).await.unwrap();
        assert!(document.starts_with("# Doc Management Idea"));
        assert_eq!(history.load().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_transcript_never_reaches_the_agent() {
        let agent = Arc::new(ScriptedAgent::new(["should not be used"]));
        let (service, history, _) = service(Some(agent.clone()));

        let err = service
            .generate(&IdeaDraft::from_transcript("   "))
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(agent.calls(), 0);
        assert!(history.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_agent_failure_surfaces_without_history_entry() {
        let agent = Arc::new(ScriptedAgent::failing());
        let (service, history, _) = service(Some(agent));

        let err = service.generate(&draft()).await.unwrap_err();
        assert!(err.is_collaborator());
        assert!(history.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_whitespace_only_response_is_an_error() {
        let agent = Arc::new(ScriptedAgent::new(["   \n  "]));
        let (service, history, _) = service(Some(agent));

        assert!(service.generate(&draft()).await.is_err());
        assert!(history.load().await.unwrap().is_empty());
    }
}
