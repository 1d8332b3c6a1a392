//! Content policies for the two interview modes.
//!
//! Each mode selects a system instruction and a merge behavior: new-idea
//! interviews build a submission from scratch with a business-case focus,
//! enhance interviews preserve the prior submission and fold new
//! information in. Both end with the completion sentinel protocol.

use super::state::{GreetingCase, InterviewDialogue, InterviewMode};
use crate::message::ChatMessage;

/// System instruction for new-idea interviews.
pub const SYSTEM_PROMPT_NEW_IDEA: &str = "You are an expert idea refinement assistant at Meridian Lending. Employees submit ideas to the IT Product team through you. Your goal is to help them articulate a compelling business case by asking a few focused questions, then generating a structured submission.

When starting an interview:
1. Greet the employee warmly
2. Acknowledge their initial idea (if provided)
3. Ask your first clarifying question

Good questions to ask:
- What specific problem or pain point does this solve in your day-to-day work?
- How does this affect you, your team, or your borrowers today?
- Who else would benefit from this, such as other teams, roles, or borrower segments?
- What does the ideal outcome look like? How would you measure success?
- How often does this issue come up? Can you estimate time lost or errors caused?

Rules:
- Ask only 1 question at a time
- Keep questions concise and friendly
- Focus on business value, stakeholders, ROI, and wins, NOT technical implementation
- When asked to finish, generate the final idea submission
- When ready to complete, respond with EXACTLY this format:

[COMPLETE]
<your structured idea submission here>
[/COMPLETE]

The idea submission should include these sections:
- Problem or Opportunity
- Proposed Solution (the \"what,\" not the \"how\")
- Business Case & ROI
- Stakeholders & Who Benefits
- Value & Quick Wins
Do NOT include implementation details, technical architecture, phases, or timelines. Use markdown formatting.";

/// System instruction for enhance-existing interviews.
pub const SYSTEM_PROMPT_ENHANCE: &str = "You are an expert idea refinement assistant at Meridian Lending. The employee already has a generated idea submission and wants to enhance it for the IT Product team. Ask clarifying questions to strengthen the business case, then merge everything into an improved version.

When starting an enhancement:
1. Acknowledge their existing submission
2. Ask what they'd like to add, change, or strengthen
3. Focus on business value, ROI, stakeholders, or wins that may be missing

Good questions:
- What would you like to add or change in this submission?
- Can you estimate the business impact, such as time saved, errors reduced, or revenue affected?
- Are there other teams or stakeholders who would benefit that we should mention?
- Are there specific metrics or outcomes you want to highlight?

Rules:
- Ask only 1 question at a time
- When asked to finish, merge new information with the existing submission
- PRESERVE the good parts of the existing submission
- Focus on strengthening the business case, NOT adding technical details
- When ready, respond with:

[COMPLETE]
<your merged/enhanced submission here>
[/COMPLETE]";

/// Returns the system instruction for a mode.
pub fn system_prompt(mode: InterviewMode) -> &'static str {
    match mode {
        InterviewMode::NewIdea => SYSTEM_PROMPT_NEW_IDEA,
        InterviewMode::EnhanceExisting => SYSTEM_PROMPT_ENHANCE,
    }
}

/// Builds the situation summary placed before the turn log.
pub fn context_message(dialogue: &InterviewDialogue) -> String {
    let category = dialogue.category().unwrap_or("general");
    match (dialogue.base_draft_text(), dialogue.original_idea()) {
        (Some(base), idea) => format!(
            "A loan officer wants to enhance their \"{}\" idea. Their initial description: \"{}\"\n\nExisting submission:\n\n---EXISTING---\n{}\n---END---\n\nHelp them improve it.",
            category,
            idea.unwrap_or(""),
            base
        ),
        (None, Some(idea)) => format!(
            "A loan officer has an idea about \"{}\". Their description:\n\n\"{}\"",
            category, idea
        ),
        (None, None) => {
            let category_clause = dialogue
                .category()
                .map(|id| format!(" in the \"{}\" category", id))
                .unwrap_or_default();
            format!(
                "A loan officer wants to brainstorm a new idea{}. They haven't written anything yet. Help them discover and articulate their idea through conversation.",
                category_clause
            )
        }
    }
}

fn start_instruction(case: GreetingCase) -> &'static str {
    match case {
        GreetingCase::EnhanceExisting => {
            "Acknowledge their submission and ask what they'd like to improve."
        }
        GreetingCase::AcknowledgeIdea => "Greet them and ask your first clarifying question.",
        GreetingCase::OpenEnded => {
            "Welcome them warmly and ask what idea they'd like to explore. Be enthusiastic and open-ended."
        }
    }
}

fn completion_instruction(mode: InterviewMode) -> &'static str {
    match mode {
        InterviewMode::EnhanceExisting => {
            "Merge the new information with the existing submission. Respond with:\n\n[COMPLETE]\n<merged submission>\n[/COMPLETE]"
        }
        InterviewMode::NewIdea => {
            "Generate the final idea submission now. Respond with:\n\n[COMPLETE]\n<submission>\n[/COMPLETE]"
        }
    }
}

/// Messages for the opening greeting request.
pub fn start_messages(dialogue: &InterviewDialogue) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(system_prompt(dialogue.mode())),
        ChatMessage::user(format!(
            "{}\n\n{}",
            context_message(dialogue),
            start_instruction(dialogue.greeting_case())
        )),
    ]
}

/// Messages for asking the next clarifying question.
pub fn question_messages(dialogue: &InterviewDialogue) -> Vec<ChatMessage> {
    let mut messages = vec![
        ChatMessage::system(system_prompt(dialogue.mode())),
        ChatMessage::user(context_message(dialogue)),
    ];
    messages.extend(dialogue.turn_log().iter().cloned());
    messages
}

/// Messages for the final merge request, ending with the sentinel protocol.
pub fn completion_messages(dialogue: &InterviewDialogue) -> Vec<ChatMessage> {
    let mut messages = question_messages(dialogue);
    messages.push(ChatMessage::user(completion_instruction(dialogue.mode())));
    messages
}
