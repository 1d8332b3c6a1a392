//! The interview dialogue state machine.

use super::parser::{CompletionOutcome, parse_completion};
use crate::error::{RelayError, Result};
use crate::message::{ChatMessage, ChatRole};

/// Number of assistant questions before the dialogue requests completion.
///
/// A single constant for both modes; it bounds interview length and cost
/// and is deliberately not user-configurable.
pub const QUESTION_THRESHOLD: usize = 2;

/// Which content policy drives the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterviewMode {
    /// Develop a brand-new idea from scratch or from a rough transcript.
    NewIdea,
    /// Strengthen an already-generated submission without replacing it.
    EnhanceExisting,
}

/// Dialogue lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No assistant message emitted yet.
    Start,
    /// Alternating questions and answers.
    Questioning,
    /// The final merge request has been issued.
    Completing,
    /// Terminal; a non-empty final document exists.
    Done,
}

/// Which greeting the opening assistant message should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GreetingCase {
    /// A base document exists: acknowledge it and ask what to improve.
    EnhanceExisting,
    /// Nothing to go on: open-ended welcome.
    OpenEnded,
    /// An idea transcript exists: acknowledge it and ask the first question.
    AcknowledgeIdea,
}

/// What the orchestrator should do after a user answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Ask one more focused question (exactly one per turn).
    AskQuestion,
    /// Issue the final merge request.
    RequestCompletion,
}

/// A turn-based interview conversation.
///
/// The machine owns the turn log and the phase transitions; issuing the
/// actual LLM calls (or the scripted substitutes) is the orchestrator's
/// job. The machine guarantees it never reaches [`Phase::Done`] without a
/// non-empty final document.
#[derive(Debug, Clone)]
pub struct InterviewDialogue {
    mode: InterviewMode,
    phase: Phase,
    turn_log: Vec<ChatMessage>,
    original_idea: Option<String>,
    category: Option<String>,
    base_draft_text: Option<String>,
    final_document: Option<String>,
}

impl InterviewDialogue {
    /// Starts a fresh dialogue.
    ///
    /// The mode is derived from the inputs: a non-empty `base_draft_text`
    /// selects enhance mode, anything else is a new idea.
    pub fn new(
        original_idea: Option<String>,
        category: Option<String>,
        base_draft_text: Option<String>,
    ) -> Self {
        let base_draft_text =
            base_draft_text.filter(|text| !text.trim().is_empty());
        let mode = if base_draft_text.is_some() {
            InterviewMode::EnhanceExisting
        } else {
            InterviewMode::NewIdea
        };
        Self {
            mode,
            phase: Phase::Start,
            turn_log: Vec::new(),
            original_idea: original_idea.filter(|text| !text.trim().is_empty()),
            category: category.filter(|text| !text.trim().is_empty()),
            base_draft_text,
            final_document: None,
        }
    }

    /// Rebuilds a mid-conversation dialogue from a wire transcript.
    ///
    /// System messages are not part of the turn log and are dropped. An
    /// empty transcript resumes at `Start`.
    pub fn resume(
        original_idea: Option<String>,
        category: Option<String>,
        base_draft_text: Option<String>,
        transcript: Vec<ChatMessage>,
    ) -> Self {
        let mut dialogue = Self::new(original_idea, category, base_draft_text);
        dialogue.turn_log = transcript
            .into_iter()
            .filter(|message| message.role != ChatRole::System)
            .collect();
        if !dialogue.turn_log.is_empty() {
            dialogue.phase = Phase::Questioning;
        }
        dialogue
    }

    pub fn mode(&self) -> InterviewMode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn turn_log(&self) -> &[ChatMessage] {
        &self.turn_log
    }

    pub fn original_idea(&self) -> Option<&str> {
        self.original_idea.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn base_draft_text(&self) -> Option<&str> {
        self.base_draft_text.as_deref()
    }

    /// Number of assistant-authored entries in the turn log.
    pub fn assistant_turns(&self) -> usize {
        self.turn_log
            .iter()
            .filter(|message| message.role == ChatRole::Assistant)
            .count()
    }

    /// The user's answers so far, in order.
    pub fn user_answers(&self) -> Vec<&str> {
        self.turn_log
            .iter()
            .filter(|message| message.role == ChatRole::User)
            .map(|message| message.content.as_str())
            .collect()
    }

    /// Selects the greeting for the opening assistant message.
    ///
    /// The three cases are mutually exclusive: an existing base document
    /// wins, then the absence of any idea text, then acknowledgement of the
    /// supplied idea.
    pub fn greeting_case(&self) -> GreetingCase {
        if self.base_draft_text.is_some() {
            GreetingCase::EnhanceExisting
        } else if self.original_idea.is_none() {
            GreetingCase::OpenEnded
        } else {
            GreetingCase::AcknowledgeIdea
        }
    }

    /// Records the opening assistant greeting and enters `Questioning`.
    pub fn begin(&mut self, greeting: impl Into<String>) {
        self.turn_log.push(ChatMessage::assistant(greeting));
        self.phase = Phase::Questioning;
    }

    /// Appends a user answer to the turn log.
    pub fn record_user_answer(&mut self, answer: impl Into<String>) {
        self.turn_log.push(ChatMessage::user(answer));
    }

    /// Appends an assistant question, remaining in `Questioning`.
    pub fn record_assistant_question(&mut self, question: impl Into<String>) {
        self.turn_log.push(ChatMessage::assistant(question));
        self.phase = Phase::Questioning;
    }

    /// Decides the next step after a user answer.
    ///
    /// Once the assistant has asked [`QUESTION_THRESHOLD`] questions the
    /// dialogue transitions to `Completing`, regardless of answer content.
    pub fn next_directive(&mut self) -> Directive {
        if self.assistant_turns() >= QUESTION_THRESHOLD {
            self.phase = Phase::Completing;
            Directive::RequestCompletion
        } else {
            Directive::AskQuestion
        }
    }

    /// Forces the completion transition (the caller asked to finish now).
    pub fn force_completion(&mut self) -> Directive {
        self.phase = Phase::Completing;
        Directive::RequestCompletion
    }

    /// Feeds an assistant response through the sentinel parser.
    ///
    /// A well-formed completion moves the dialogue to `Done`. Anything else
    /// is recorded as an ordinary assistant message and the dialogue drops
    /// back to `Questioning`, so a malformed or missing sentinel can never
    /// produce a broken terminal state.
    pub fn accept_assistant_response(&mut self, raw: &str) -> CompletionOutcome {
        match parse_completion(raw) {
            CompletionOutcome::Complete(document) => {
                self.final_document = Some(document.clone());
                self.phase = Phase::Done;
                CompletionOutcome::Complete(document)
            }
            CompletionOutcome::MidDialogue(text) => {
                self.record_assistant_question(text.clone());
                CompletionOutcome::MidDialogue(text)
            }
        }
    }

    /// Completes the dialogue with an already-final document (scripted path).
    pub fn complete_with(&mut self, document: impl Into<String>) -> Result<()> {
        let document = document.into();
        if document.trim().is_empty() {
            return Err(RelayError::internal(
                "interview produced an empty final document",
            ));
        }
        self.final_document = Some(document);
        self.phase = Phase::Done;
        Ok(())
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// The finished document, present exactly when the dialogue is `Done`.
    pub fn final_document(&self) -> Option<&str> {
        self.final_document.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_idea_dialogue() -> InterviewDialogue {
        InterviewDialogue::new(
            Some("Automate lock desk emails".to_string()),
            Some("rate-lock".to_string()),
            None,
        )
    }

    #[test]
    fn test_mode_derived_from_base_draft() {
        assert_eq!(new_idea_dialogue().mode(), InterviewMode::NewIdea);
        let enhance = InterviewDialogue::new(None, None, Some("## Existing".to_string()));
        assert_eq!(enhance.mode(), InterviewMode::EnhanceExisting);
        // Whitespace-only base text does not select enhance mode
        let blank = InterviewDialogue::new(None, None, Some("   ".to_string()));
        assert_eq!(blank.mode(), InterviewMode::NewIdea);
    }

    #[test]
    fn test_greeting_cases_are_mutually_exclusive() {
        let enhance = InterviewDialogue::new(
            Some("idea".to_string()),
            None,
            Some("## Existing".to_string()),
        );
        assert_eq!(enhance.greeting_case(), GreetingCase::EnhanceExisting);

        let open = InterviewDialogue::new(None, None, None);
        assert_eq!(open.greeting_case(), GreetingCase::OpenEnded);

        assert_eq!(new_idea_dialogue().greeting_case(), GreetingCase::AcknowledgeIdea);
    }

    #[test]
    fn test_assistant_turns_before_completing_equals_threshold() {
        let mut dialogue = new_idea_dialogue();
        dialogue.begin("Great idea! What problem does it solve?");

        let mut directives = Vec::new();
        loop {
            dialogue.record_user_answer("some answer");
            match dialogue.next_directive() {
                Directive::AskQuestion => {
                    directives.push(Directive::AskQuestion);
                    dialogue.record_assistant_question("And who benefits?");
                }
                Directive::RequestCompletion => break,
            }
        }

        assert_eq!(dialogue.phase(), Phase::Completing);
        assert_eq!(dialogue.assistant_turns(), QUESTION_THRESHOLD);
        assert_eq!(directives.len(), QUESTION_THRESHOLD - 1);
    }

    #[test]
    fn test_threshold_is_independent_of_answer_content() {
        for answer in ["short", "a very long rambling answer with lots of detail"] {
            let mut dialogue = new_idea_dialogue();
            dialogue.begin("greeting question");
            dialogue.record_user_answer(answer);
            assert_eq!(dialogue.next_directive(), Directive::AskQuestion);
            dialogue.record_assistant_question("second question");
            dialogue.record_user_answer(answer);
            assert_eq!(dialogue.next_directive(), Directive::RequestCompletion);
        }
    }

    #[test]
    fn test_missing_sentinel_keeps_dialogue_non_terminal() {
        let mut dialogue = new_idea_dialogue();
        dialogue.begin("q1");
        dialogue.record_user_answer("a1");
        dialogue.record_assistant_question("q2");
        dialogue.record_user_answer("a2");
        assert_eq!(dialogue.next_directive(), Directive::RequestCompletion);

        let outcome = dialogue.accept_assistant_response("Let me ask one more thing first.");
        assert!(matches!(outcome, CompletionOutcome::MidDialogue(_)));
        assert_eq!(dialogue.phase(), Phase::Questioning);
        assert!(!dialogue.is_done());
        assert!(dialogue.final_document().is_none());
    }

    #[test]
    fn test_well_formed_completion_reaches_done() {
        let mut dialogue = new_idea_dialogue();
        dialogue.begin("q1");
        dialogue.record_user_answer("a1");
        dialogue.record_assistant_question("q2");
        dialogue.record_user_answer("a2");
        dialogue.next_directive();

        let outcome =
            dialogue.accept_assistant_response("[COMPLETE]\n## Problem\nManual emails\n[/COMPLETE]");
        assert!(matches!(outcome, CompletionOutcome::Complete(_)));
        assert!(dialogue.is_done());
        let document = dialogue.final_document().unwrap();
        assert!(!document.is_empty());
        assert!(!document.contains("[COMPLETE]"));
    }

    #[test]
    fn test_never_done_with_empty_document() {
        let mut dialogue = new_idea_dialogue();
        dialogue.begin("q1");
        dialogue.force_completion();
        dialogue.accept_assistant_response("[COMPLETE]  [/COMPLETE]");
        assert!(!dialogue.is_done());

        assert!(dialogue.complete_with("  ").is_err());
        assert!(!dialogue.is_done());
    }

    #[test]
    fn test_resume_drops_system_messages() {
        let transcript = vec![
            ChatMessage::system("policy"),
            ChatMessage::assistant("q1"),
            ChatMessage::user("a1"),
        ];
        let dialogue = InterviewDialogue::resume(None, None, None, transcript);
        assert_eq!(dialogue.turn_log().len(), 2);
        assert_eq!(dialogue.phase(), Phase::Questioning);
        assert_eq!(dialogue.assistant_turns(), 1);
    }

    #[test]
    fn test_resume_with_empty_transcript_starts_fresh() {
        let dialogue = InterviewDialogue::resume(None, None, None, Vec::new());
        assert_eq!(dialogue.phase(), Phase::Start);
    }

    #[test]
    fn test_user_answers_in_order() {
        let mut dialogue = new_idea_dialogue();
        dialogue.begin("q1");
        dialogue.record_user_answer("first");
        dialogue.record_assistant_question("q2");
        dialogue.record_user_answer("second");
        assert_eq!(dialogue.user_answers(), vec!["first", "second"]);
    }
}
