//! Deterministic scripted interview fallback.
//!
//! Used whenever the completion agent is unconfigured or fails mid-flow:
//! greetings and follow-up questions come from fixed lists indexed by the
//! assistant turn count, and the final document is a templated merge of the
//! transcript and the user's answers. Identical input always produces
//! identical output, and the flow is guaranteed to reach `Done`.

use super::state::{GreetingCase, InterviewDialogue, InterviewMode};
use crate::catalog;

const FOLLOW_UP_NEW_IDEA: &[&str] = &[
    "Which teams or systems would this affect the most?",
    "What does success look like? How would you measure the improvement?",
    "Is there anything else leadership should know about this idea?",
];

const FOLLOW_UP_ENHANCE: &[&str] = &[
    "What specific section would you like to expand or modify?",
    "Are there any edge cases or scenarios you want to add?",
    "Should we adjust the priority or scope of any part?",
];

/// Scripted opening assistant message for a greeting case.
pub fn scripted_greeting(case: GreetingCase, category: Option<&str>) -> String {
    match case {
        GreetingCase::EnhanceExisting => {
            "I see you already have an idea submission. Let me help you refine it!\n\nWhat would you like to add, change, or clarify?".to_string()
        }
        GreetingCase::OpenEnded => {
            "Welcome! I'm here to help you brainstorm and develop an idea for Meridian.\n\nWhat's on your mind? Tell me about a challenge, pain point, or improvement you'd like to see.".to_string()
        }
        GreetingCase::AcknowledgeIdea => {
            let topic = category
                .map(|id| id.replace('-', " "))
                .unwrap_or_else(|| "improving our processes".to_string());
            format!(
                "Great idea about {}! Let me help you flesh it out.\n\nWhat specific problem or pain point does this solve for you or your borrowers?",
                topic
            )
        }
    }
}

/// Scripted follow-up question for the given assistant turn count.
///
/// Indexed past the end the list clamps to its first entry, so the script
/// can never run out of questions.
pub fn scripted_question(mode: InterviewMode, assistant_turns: usize) -> &'static str {
    let questions = match mode {
        InterviewMode::NewIdea => FOLLOW_UP_NEW_IDEA,
        InterviewMode::EnhanceExisting => FOLLOW_UP_ENHANCE,
    };
    // The greeting counts as the first assistant turn
    let index = assistant_turns.saturating_sub(1);
    questions.get(index).copied().unwrap_or(questions[0])
}

/// Deterministic templated merge of the interview into a final document.
pub fn scripted_completion(dialogue: &InterviewDialogue) -> String {
    let answers = dialogue.user_answers();
    let answer_block = if answers.is_empty() {
        "No additional context provided".to_string()
    } else {
        answers.join("\n- ")
    };

    match dialogue.base_draft_text() {
        Some(base) => format!(
            "{}\n\n## Additional Details from Interview\n- {}",
            base, answer_block
        ),
        None => {
            let category_label = dialogue
                .category()
                .map(catalog::label_of)
                .unwrap_or_else(|| "General Improvement".to_string());
            format!(
                "## Idea Category\n{}\n\n## Idea Description\n{}\n\n## Additional Context from Interview\n- {}\n\n## Expected Benefits\nPlease evaluate this idea for potential impact on efficiency, borrower experience, and business growth.",
                category_label,
                dialogue.original_idea().unwrap_or("Idea submission"),
                answer_block
            )
        }
    }
}
