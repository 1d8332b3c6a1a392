//! Prompt assembly for the one-shot structuring flow.
//!
//! Serializes an [`IdeaDraft`] plus the fixed system instruction into a
//! single instruction document for the LLM. Section ordering is a contract:
//! the model is sensitive to structure, so the golden tests below pin it.

use crate::catalog;
use crate::draft::IdeaDraft;
use crate::error::Result;
use crate::message::ChatMessage;

/// Fixed system instruction for the structuring flow.
pub const STRUCTURING_SYSTEM_PROMPT: &str = "You are an expert idea refinement assistant for Meridian Lending. Your job is to take a loan officer's rough idea and transform it into a well-structured, actionable idea submission that leadership and product teams can evaluate.

Given the user's input and their selected preferences, generate a detailed, actionable idea submission that:
1. Clearly states the problem or opportunity
2. Describes the proposed solution or improvement
3. Explains expected benefits and impact
4. Identifies affected teams, systems, and stakeholders
5. Includes implementation considerations

Output ONLY the structured idea submission with no meta-commentary. Be thorough, specific, and include mortgage industry context.";

/// Rendered when no category is selected.
pub const GENERAL_CATEGORY_PHRASE: &str = "general improvement idea";

/// Attachment content beyond this many characters is silently dropped.
pub const ATTACHMENT_CHAR_LIMIT: usize = 10_000;

/// URL reference content beyond this many characters is silently dropped.
pub const URL_REFERENCE_CHAR_LIMIT: usize = 15_000;

/// Deterministic serializer from draft to instruction document.
///
/// Pure function of its input plus the static catalogs; no side effects.
pub struct PromptAssembler;

impl PromptAssembler {
    /// Builds the user-role instruction document for a draft.
    ///
    /// Section order is fixed: idea, categories, detail, format, context,
    /// attached files, referenced urls, requirements. Optional sections are
    /// omitted entirely when empty.
    pub fn assemble(draft: &IdeaDraft) -> Result<String> {
        draft.validate()?;

        let mut document = String::from(
            "Transform this loan officer's idea into a structured submission:\n\n",
        );
        document.push_str(&format!("IDEA: \"{}\"\n\n", draft.transcript.trim()));
        document.push_str(&format!("CATEGORIES: {}\n\n", Self::category_line(&draft.categories)));
        document.push_str(&format!("DETAIL: {}\n", draft.detail_level.instruction()));
        document.push_str(&format!("FORMAT: {}\n", draft.output_format.instruction()));

        if !draft.context_info.trim().is_empty() {
            document.push_str(&format!("\nCONTEXT: {}\n", draft.context_info.trim()));
        }

        if !draft.attachments.is_empty() {
            document.push_str("\nATTACHED FILES:\n");
            for attachment in &draft.attachments {
                document.push_str(&format!(
                    "--- {} ---\n{}\n",
                    attachment.name,
                    truncate_chars(&attachment.content, ATTACHMENT_CHAR_LIMIT)
                ));
            }
        }

        if !draft.url_references.is_empty() {
            document.push_str("\nREFERENCED URLS:\n");
            for reference in &draft.url_references {
                document.push_str(&format!(
                    "--- {} ({}) ---\n{}\n",
                    reference.title,
                    reference.url,
                    truncate_chars(&reference.content, URL_REFERENCE_CHAR_LIMIT)
                ));
            }
        }

        let requirements = catalog::resolve_modifiers(&draft.modifiers);
        if !requirements.is_empty() {
            document.push_str(&format!("\nREQUIREMENTS:\n- {}\n", requirements.join("\n- ")));
        }

        document.push_str("\nGenerate a detailed, well-structured idea submission.");
        Ok(document)
    }

    /// Builds the full message list (system + user) for the completion agent.
    pub fn request_messages(draft: &IdeaDraft) -> Result<Vec<ChatMessage>> {
        let user_prompt = Self::assemble(draft)?;
        Ok(vec![
            ChatMessage::system(STRUCTURING_SYSTEM_PROMPT),
            ChatMessage::user(user_prompt),
        ])
    }

    fn category_line(categories: &[String]) -> String {
        if categories.is_empty() {
            return GENERAL_CATEGORY_PHRASE.to_string();
        }
        categories
            .iter()
            .map(|id| format!("{} ({})", id, catalog::describe(id)))
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

/// Returns at most `limit` characters of `s`, never splitting a code point.
fn truncate_chars(s: &str, limit: usize) -> &str {
    match s.char_indices().nth(limit) {
        Some((index, _)) => &s[..index],
        None => s,
    }
}
