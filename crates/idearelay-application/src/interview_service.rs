//! Interview flow orchestration.
//!
//! Drives the dialogue state machine over stateless endpoint calls: each
//! request carries the transcript so far, the machine is rebuilt, advanced
//! one step, and the reply is either a mid-dialogue assistant message or
//! the finished document. Every path that fails to reach the LLM drops to
//! the deterministic script, so the flow always terminates.

use idearelay_core::agent::CompletionAgent;
use idearelay_core::error::Result;
use idearelay_core::history::{HistoryEntry, HistoryRepository};
use idearelay_core::interview::parser::CompletionOutcome;
use idearelay_core::interview::state::{Directive, InterviewDialogue};
use idearelay_core::interview::{policy, script};
use idearelay_core::message::ChatMessage;
use serde::Deserialize;
use std::sync::Arc;

/// Which step of the interview the caller is requesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewAction {
    /// Open the dialogue and emit the greeting.
    Start,
    /// Feed the latest user answer and get the next step.
    Continue,
    /// Finish now, regardless of how many questions were asked.
    Generate,
}

/// One endpoint call of the interview flow.
#[derive(Debug, Clone)]
pub struct InterviewTurn {
    pub action: InterviewAction,
    /// The initial idea text, when the employee provided one.
    pub transcript: Option<String>,
    /// Selected category id.
    pub category: Option<String>,
    /// The conversation so far (assistant and user turns).
    pub messages: Vec<ChatMessage>,
    /// An existing submission to enhance, when present.
    pub existing_prompt: Option<String>,
}

/// Reply to one interview call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterviewReply {
    /// A mid-dialogue assistant message (greeting or question).
    Message(String),
    /// The interview is done; the final document is attached.
    Complete { final_prompt: String },
}

/// Orchestrates interview turns against the agent or the scripted fallback.
pub struct InterviewService {
    agent: Option<Arc<dyn CompletionAgent>>,
    history: Arc<dyn HistoryRepository>,
}

impl InterviewService {
    pub fn new(
        agent: Option<Arc<dyn CompletionAgent>>,
        history: Arc<dyn HistoryRepository>,
    ) -> Self {
        Self { agent, history }
    }

    /// Handles one interview call.
    pub async fn handle(&self, turn: InterviewTurn) -> Result<InterviewReply> {
        let mut dialogue = InterviewDialogue::resume(
            turn.transcript,
            turn.category,
            turn.existing_prompt,
            turn.messages,
        );

        match turn.action {
            InterviewAction::Start => self.start(&mut dialogue).await,
            InterviewAction::Continue => self.advance(&mut dialogue, false).await,
            InterviewAction::Generate => self.advance(&mut dialogue, true).await,
        }
    }

    async fn start(&self, dialogue: &mut InterviewDialogue) -> Result<InterviewReply> {
        let greeting = match &self.agent {
            Some(agent) => match agent.generate(&policy::start_messages(dialogue)).await {
                Ok(text) => text.trim().to_string(),
                Err(err) => {
                    tracing::warn!(error = %err, "greeting request failed, using scripted greeting");
                    script::scripted_greeting(dialogue.greeting_case(), dialogue.category())
                }
            },
            None => script::scripted_greeting(dialogue.greeting_case(), dialogue.category()),
        };
        dialogue.begin(greeting.clone());
        Ok(InterviewReply::Message(greeting))
    }

    async fn advance(
        &self,
        dialogue: &mut InterviewDialogue,
        force_completion: bool,
    ) -> Result<InterviewReply> {
        let directive = if force_completion {
            dialogue.force_completion()
        } else {
            dialogue.next_directive()
        };

        match directive {
            Directive::AskQuestion => self.ask_question(dialogue).await,
            Directive::RequestCompletion => self.request_completion(dialogue).await,
        }
    }

    async fn ask_question(&self, dialogue: &mut InterviewDialogue) -> Result<InterviewReply> {
        if let Some(agent) = &self.agent {
            match agent.generate(&policy::question_messages(dialogue)).await {
                // The model may decide it has enough context and complete
                // early; honor the sentinel wherever it appears.
                Ok(raw) => match dialogue.accept_assistant_response(&raw) {
                    CompletionOutcome::Complete(document) => {
                        return self.finish(dialogue, document).await;
                    }
                    CompletionOutcome::MidDialogue(text) => {
                        return Ok(InterviewReply::Message(text));
                    }
                },
                Err(err) => {
                    tracing::warn!(error = %err, "question request failed, using scripted question");
                }
            }
        }

        let question = script::scripted_question(dialogue.mode(), dialogue.assistant_turns());
        dialogue.record_assistant_question(question);
        Ok(InterviewReply::Message(question.to_string()))
    }

    async fn request_completion(
        &self,
        dialogue: &mut InterviewDialogue,
    ) -> Result<InterviewReply> {
        if let Some(agent) = &self.agent {
            match agent.generate(&policy::completion_messages(dialogue)).await {
                Ok(raw) => {
                    return match dialogue.accept_assistant_response(&raw) {
                        CompletionOutcome::Complete(document) => {
                            self.finish(dialogue, document).await
                        }
                        // Missing sentinel: surface the text as an ordinary
                        // message so the caller can re-prompt.
                        CompletionOutcome::MidDialogue(text) => Ok(InterviewReply::Message(text)),
                    };
                }
                Err(err) => {
                    tracing::warn!(error = %err, "completion request failed, using scripted merge");
                }
            }
        }

        let document = script::scripted_completion(dialogue);
        dialogue.complete_with(document.clone())?;
        self.finish(dialogue, document).await
    }

    async fn finish(
        &self,
        dialogue: &InterviewDialogue,
        document: String,
    ) -> Result<InterviewReply> {
        let entry = HistoryEntry::new(
            dialogue.original_idea().unwrap_or_default(),
            &document,
            dialogue.category().unwrap_or_default(),
        );
        if let Err(err) = self.history.record(entry).await {
            tracing::warn!(error = %err, "failed to record interview result in history");
        }
        Ok(InterviewReply::Complete {
            final_prompt: document,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MemoryHistory, ScriptedAgent};
    use idearelay_core::interview::QUESTION_THRESHOLD;

    fn turn(action: InterviewAction, messages: Vec<ChatMessage>) -> InterviewTurn {
        InterviewTurn {
            action,
            transcript: Some("Automate condition clearing".to_string()),
            category: Some("conditions".to_string()),
            messages,
            existing_prompt: None,
        }
    }

    fn service(
        agent: Option<Arc<dyn CompletionAgent>>,
    ) -> (InterviewService, Arc<MemoryHistory>) {
        let history = Arc::new(MemoryHistory::default());
        (InterviewService::new(agent, history.clone()), history)
    }

    #[tokio::test]
    async fn test_start_with_existing_prompt_uses_enhance_greeting() {
        let (service, _) = service(None);
        let reply = service
            .handle(InterviewTurn {
                action: InterviewAction::Start,
                transcript: None,
                category: None,
                messages: Vec::new(),
                existing_prompt: Some("## Existing submission".to_string()),
            })
            .await
            .unwrap();

        match reply {
            InterviewReply::Message(text) => {
                assert!(text.contains("already have an idea submission"));
                assert!(!text.contains("brainstorm"));
            }
            other => panic!("expected Message, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_scripted_interview_completes_at_threshold() {
        let (service, history) = service(None);

        // Greeting
        let reply = service
            .handle(turn(InterviewAction::Start, Vec::new()))
            .await
            .unwrap();
        let greeting = match reply {
            InterviewReply::Message(text) => text,
            other => panic!("expected Message, got {other:?}"),
        };

        // One question-and-answer round: one assistant turn so far
        let mut messages = vec![
            ChatMessage::assistant(greeting),
            ChatMessage::user("It slows down underwriting"),
        ];
        let reply = service
            .handle(turn(InterviewAction::Continue, messages.clone()))
            .await
            .unwrap();
        let question = match reply {
            InterviewReply::Message(text) => text,
            other => panic!("expected Message, got {other:?}"),
        };

        // Second answer: the threshold is reached and the merge happens
        messages.push(ChatMessage::assistant(question));
        messages.push(ChatMessage::user("Processors and underwriters benefit"));
        assert_eq!(messages.iter().filter(|m| m.role == idearelay_core::message::ChatRole::Assistant).count(), QUESTION_THRESHOLD);

        let reply = service
            .handle(turn(InterviewAction::Continue, messages))
            .await
            .unwrap();
        match reply {
            InterviewReply::Complete { final_prompt } => {
                assert!(final_prompt.contains("## Idea Category\nConditions"));
                assert!(final_prompt.contains("Automate condition clearing"));
                assert!(final_prompt.contains("- It slows down underwriting\n- Processors and underwriters benefit"));
            }
            other => panic!("expected Complete, got {other:?}"),
        }

        assert_eq!(history.load().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_agent_completion_with_sentinel() {
        let agent = Arc::new(ScriptedAgent::new([
            "[COMPLETE]\n## Problem\nManual clearing\n[/COMPLETE]",
        ]));
        let (service, history) = service(Some(agent));

        let messages = vec![
            ChatMessage::assistant("q1"),
            ChatMessage::user("a1"),
            ChatMessage::assistant("q2"),
            ChatMessage::user("a2"),
        ];
        let reply = service
            .handle(turn(InterviewAction::Continue, messages))
            .await
            .unwrap();
        match reply {
            InterviewReply::Complete { final_prompt } => {
                assert_eq!(final_prompt, "## Problem\nManual clearing");
                assert!(!final_prompt.contains("[COMPLETE]"));
            }
            other => panic!("expected Complete, got {other:?}"),
        }
        assert_eq!(history.load().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_sentinel_degrades_to_message() {
        let agent = Arc::new(ScriptedAgent::new([
            "Could you tell me a bit more about the volume?",
        ]));
        let (service, history) = service(Some(agent));

        let messages = vec![
            ChatMessage::assistant("q1"),
            ChatMessage::user("a1"),
            ChatMessage::assistant("q2"),
            ChatMessage::user("a2"),
        ];
        let reply = service
            .handle(turn(InterviewAction::Generate, messages))
            .await
            .unwrap();
        match reply {
            InterviewReply::Message(text) => {
                assert!(text.contains("volume"));
            }
            other => panic!("expected Message, got {other:?}"),
        }
        // No history entry without a final document
        assert!(history.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_agent_failure_falls_back_to_script_and_terminates() {
        let agent = Arc::new(ScriptedAgent::failing());
        let (service, history) = service(Some(agent));

        let messages = vec![
            ChatMessage::assistant("q1"),
            ChatMessage::user("a1"),
            ChatMessage::assistant("q2"),
            ChatMessage::user("a2"),
        ];
        let reply = service
            .handle(turn(InterviewAction::Generate, messages))
            .await
            .unwrap();
        match reply {
            InterviewReply::Complete { final_prompt } => {
                assert!(!final_prompt.trim().is_empty());
            }
            other => panic!("expected Complete, got {other:?}"),
        }
        assert_eq!(history.load().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_agent_failure_mid_questioning_uses_scripted_question() {
        let agent = Arc::new(ScriptedAgent::failing());
        let (service, _) = service(Some(agent));

        let messages = vec![ChatMessage::assistant("q1"), ChatMessage::user("a1")];
        let reply = service
            .handle(turn(InterviewAction::Continue, messages))
            .await
            .unwrap();
        match reply {
            InterviewReply::Message(text) => {
                assert_eq!(text, "Which teams or systems would this affect the most?");
            }
            other => panic!("expected Message, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_enhance_scripted_merge_preserves_existing() {
        let (service, _) = service(None);
        let reply = service
            .handle(InterviewTurn {
                action: InterviewAction::Generate,
                transcript: None,
                category: None,
                messages: vec![
                    ChatMessage::assistant("what to change?"),
                    ChatMessage::user("add ROI detail"),
                ],
                existing_prompt: Some("## Existing\nKeep this".to_string()),
            })
            .await
            .unwrap();
        match reply {
            InterviewReply::Complete { final_prompt } => {
                assert!(final_prompt.starts_with("## Existing\nKeep this"));
                assert!(final_prompt.contains("add ROI detail"));
            }
            other => panic!("expected Complete, got {other:?}"),
        }
    }
}
