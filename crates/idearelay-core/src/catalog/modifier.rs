//! Prompt modifier catalog.
//!
//! Modifiers are optional instruction phrases an employee can toggle on to
//! shape the generated submission (ROI analysis, affected teams, risks...).

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// A single modifier catalog row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modifier {
    /// Stable identifier used on the wire (kebab-case).
    pub id: &'static str,
    /// Human-readable display label.
    pub label: &'static str,
    /// One-line instruction phrase appended to the LLM requirements block.
    pub instruction: &'static str,
}

/// The full modifier catalog, in display order.
pub static MODIFIERS: &[Modifier] = &[
    // General
    Modifier { id: "step-by-step", label: "Step-by-Step", instruction: "Break into numbered implementation steps" },
    Modifier { id: "examples", label: "Examples", instruction: "Include practical mortgage industry examples" },
    Modifier { id: "alternatives", label: "Alternatives", instruction: "Present 2-3 alternative approaches" },
    Modifier { id: "best-practices", label: "Best Practices", instruction: "Highlight mortgage industry best practices" },
    Modifier { id: "explain-reasoning", label: "Reasoning", instruction: "Explain the why behind decisions" },
    // Mortgage-specific
    Modifier { id: "roi-impact", label: "ROI Impact", instruction: "Include estimated ROI and business impact" },
    Modifier { id: "borrower-impact", label: "Borrower Impact", instruction: "Describe borrower experience impact" },
    Modifier { id: "compliance-check", label: "Compliance", instruction: "Address regulatory considerations" },
    Modifier { id: "affected-teams", label: "Affected Teams", instruction: "Identify all affected teams" },
    Modifier { id: "implementation-effort", label: "Effort Estimate", instruction: "Estimate complexity (low/medium/high)" },
    Modifier { id: "timeline", label: "Timeline", instruction: "Include rough implementation timeline" },
    Modifier { id: "risk-assessment", label: "Risks", instruction: "Identify risks and mitigations" },
    Modifier { id: "metrics", label: "Success Metrics", instruction: "Define success metrics and KPIs" },
    Modifier { id: "stakeholders", label: "Stakeholders", instruction: "Consider all stakeholder perspectives" },
];

static MODIFIER_INDEX: Lazy<HashMap<&'static str, &'static Modifier>> = Lazy::new(|| {
    MODIFIERS
        .iter()
        .map(|modifier| (modifier.id, modifier))
        .collect()
});

/// Returns the instruction phrase for a modifier id, if known.
pub fn modifier_instruction(id: &str) -> Option<&'static str> {
    MODIFIER_INDEX.get(id).map(|modifier| modifier.instruction)
}

/// Resolves a list of modifier ids to their instruction phrases.
///
/// Unresolved ids are silently dropped; order follows the input.
pub fn resolve_modifiers<'a, I>(ids: I) -> Vec<&'static str>
where
    I: IntoIterator<Item = &'a String>,
{
    ids.into_iter()
        .filter_map(|id| modifier_instruction(id))
        .collect()
}
