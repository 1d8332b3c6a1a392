//! Detail level and output format options.
//!
//! Both enumerations map through fixed instruction phrases and degrade to a
//! default on unknown input instead of failing, because the composer may
//! send values persisted by an older front end.

use serde::{Deserialize, Serialize};

/// How much detail the generated submission should carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    Concise,
    #[default]
    Balanced,
    Comprehensive,
}

impl DetailLevel {
    /// Wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            DetailLevel::Concise => "concise",
            DetailLevel::Balanced => "balanced",
            DetailLevel::Comprehensive => "comprehensive",
        }
    }

    /// Instruction phrase woven into the LLM request.
    pub fn instruction(&self) -> &'static str {
        match self {
            DetailLevel::Concise => "Keep the idea brief and focused.",
            DetailLevel::Balanced => "Provide moderate detail with enough context to evaluate.",
            DetailLevel::Comprehensive => {
                "Be thorough. Cover problem, solution, impact, risks, and implementation."
            }
        }
    }

    /// Parses a wire value, defaulting to `Balanced` on anything unknown.
    pub fn parse_or_default(value: &str) -> Self {
        match value {
            "concise" => DetailLevel::Concise,
            "comprehensive" => DetailLevel::Comprehensive,
            _ => DetailLevel::Balanced,
        }
    }
}

/// The shape of the generated submission text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Structured,
    Conversational,
    BulletPoints,
}

impl OutputFormat {
    /// Wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Structured => "structured",
            OutputFormat::Conversational => "conversational",
            OutputFormat::BulletPoints => "bullet-points",
        }
    }

    /// Instruction phrase woven into the LLM request.
    pub fn instruction(&self) -> &'static str {
        match self {
            OutputFormat::Structured => "Use clear markdown headers to organize into sections.",
            OutputFormat::Conversational => "Write naturally as if pitching to a colleague.",
            OutputFormat::BulletPoints => "Use bullet points for easy scanning.",
        }
    }

    /// Parses a wire value, defaulting to `Structured` on anything unknown.
    pub fn parse_or_default(value: &str) -> Self {
        match value {
            "conversational" => OutputFormat::Conversational,
            "bullet-points" => OutputFormat::BulletPoints,
            _ => OutputFormat::Structured,
        }
    }
}
