//! Deterministic no-credential document generator.
//!
//! When no completion credential is configured the one-shot flow still has
//! to produce a presentable submission, so the app stays fully demoable
//! without secrets. This is a pure function of the draft plus the static
//! catalogs: identical input yields byte-identical output.

use crate::catalog;
use crate::draft::IdeaDraft;

/// Static closing section appended to every generated document.
const EVALUATION_CRITERIA: &str = "## Evaluation Criteria\n- Problem/opportunity clearly stated\n- Solution is specific and actionable\n- Benefits quantified where possible";

/// Builds a structured markdown submission without calling the LLM.
///
/// Section order is fixed: title, Overview, Category, Context (when
/// present), Detail Level, Requirements (when any modifier resolves),
/// Evaluation Criteria.
pub struct FallbackGenerator;

impl FallbackGenerator {
    pub fn generate(draft: &IdeaDraft) -> String {
        let title = draft
            .categories
            .first()
            .map(|id| catalog::label_of(id))
            .unwrap_or_else(|| "General".to_string());

        let category_focus = if draft.categories.is_empty() {
            "improving Meridian tools and processes".to_string()
        } else {
            draft
                .categories
                .iter()
                .map(|id| catalog::describe(id))
                .collect::<Vec<_>>()
                .join("; ")
        };

        let mut document = format!(
            "# {} Idea\n\n## Overview\n{}\n\n## Category\nFocused on {}.\n\n",
            title,
            draft.transcript.trim(),
            category_focus
        );

        if !draft.context_info.trim().is_empty() {
            document.push_str(&format!("## Context\n{}\n\n", draft.context_info.trim()));
        }

        document.push_str(&format!(
            "## Detail Level\n{}\n\n",
            draft.detail_level.instruction()
        ));

        let requirements = catalog::resolve_modifiers(&draft.modifiers);
        if !requirements.is_empty() {
            document.push_str(&format!("## Requirements\n- {}\n\n", requirements.join("\n- ")));
        }

        document.push_str(EVALUATION_CRITERIA);
        document
    }
}
