//! Idea category catalog.
//!
//! Categories let an employee tag which part of the mortgage business an
//! idea touches. Each entry carries a display label and a short semantic
//! description that is woven into the LLM instruction to bias phrasing.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use strum_macros::{Display, EnumString};

/// Description used when a category id is unknown to the catalog.
pub const GENERAL_DESCRIPTION: &str = "general";

/// The four groups categories are organized under in the composer UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum CategoryGroup {
    LosTech,
    PipelineOps,
    MarketingCrm,
    ProductsGrowth,
}

/// A single category catalog row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryOption {
    /// Stable identifier used on the wire (kebab-case).
    pub id: &'static str,
    /// Human-readable display label.
    pub label: &'static str,
    /// One-line semantic description used to bias LLM phrasing.
    pub description: &'static str,
    /// UI grouping.
    pub group: CategoryGroup,
}

/// The full category catalog, in display order.
pub static CATEGORY_OPTIONS: &[CategoryOption] = &[
    // LOS & Tech
    CategoryOption { id: "los-enhancement", label: "LOS Enhancement", description: "improving the Loan Origination System", group: CategoryGroup::LosTech },
    CategoryOption { id: "automation", label: "Automation", description: "automating manual tasks and processes", group: CategoryGroup::LosTech },
    CategoryOption { id: "macro-script", label: "Macro / Script", description: "custom macros, scripts, and shortcuts", group: CategoryGroup::LosTech },
    CategoryOption { id: "integration", label: "Integration", description: "connecting systems, tools, and data", group: CategoryGroup::LosTech },
    CategoryOption { id: "dashboard", label: "Dashboard", description: "new reports, dashboards, and analytics", group: CategoryGroup::LosTech },
    CategoryOption { id: "ui-ux", label: "UI / UX Fix", description: "interface and usability improvements", group: CategoryGroup::LosTech },
    CategoryOption { id: "doc-mgmt", label: "Doc Management", description: "document handling, e-sign, and storage", group: CategoryGroup::LosTech },
    CategoryOption { id: "mobile", label: "Mobile App", description: "mobile origination features", group: CategoryGroup::LosTech },
    CategoryOption { id: "ai-feature", label: "AI Feature", description: "AI-powered tools for underwriting or analysis", group: CategoryGroup::LosTech },
    CategoryOption { id: "data-quality", label: "Data Quality", description: "data accuracy and validation", group: CategoryGroup::LosTech },
    CategoryOption { id: "security", label: "Security", description: "security, permissions, and access control", group: CategoryGroup::LosTech },
    CategoryOption { id: "api-webhook", label: "API / Webhook", description: "system connectivity and notifications", group: CategoryGroup::LosTech },
    // Pipeline & Ops
    CategoryOption { id: "pipeline-view", label: "Pipeline View", description: "pipeline visualization and filtering", group: CategoryGroup::PipelineOps },
    CategoryOption { id: "workflow", label: "Workflow", description: "loan workflow improvements", group: CategoryGroup::PipelineOps },
    CategoryOption { id: "bottleneck", label: "Bottleneck Fix", description: "fixing processing delays", group: CategoryGroup::PipelineOps },
    CategoryOption { id: "milestone", label: "Milestones", description: "milestone and status tracking", group: CategoryGroup::PipelineOps },
    CategoryOption { id: "task-mgmt", label: "Task Mgmt", description: "task assignment and follow-ups", group: CategoryGroup::PipelineOps },
    CategoryOption { id: "handoff", label: "Handoff", description: "team-to-team handoff improvements", group: CategoryGroup::PipelineOps },
    CategoryOption { id: "qc-audit", label: "QC / Audit", description: "quality control and audit improvements", group: CategoryGroup::PipelineOps },
    CategoryOption { id: "closing", label: "Closing", description: "closing and funding improvements", group: CategoryGroup::PipelineOps },
    CategoryOption { id: "rate-lock", label: "Rate Lock", description: "rate lock workflow and alerts", group: CategoryGroup::PipelineOps },
    CategoryOption { id: "conditions", label: "Conditions", description: "condition tracking and clearing", group: CategoryGroup::PipelineOps },
    CategoryOption { id: "exceptions", label: "Exceptions", description: "exception handling and escalation", group: CategoryGroup::PipelineOps },
    CategoryOption { id: "sla", label: "SLA / Turn Time", description: "turn time targets and monitoring", group: CategoryGroup::PipelineOps },
    // Marketing & CRM
    CategoryOption { id: "lead-gen", label: "Lead Gen", description: "lead generation and capture", group: CategoryGroup::MarketingCrm },
    CategoryOption { id: "crm-feature", label: "CRM Feature", description: "CRM functionality improvements", group: CategoryGroup::MarketingCrm },
    CategoryOption { id: "email-campaign", label: "Email Campaign", description: "email marketing and drip campaigns", group: CategoryGroup::MarketingCrm },
    CategoryOption { id: "social-media", label: "Social Media", description: "social media content and strategy", group: CategoryGroup::MarketingCrm },
    CategoryOption { id: "borrower-portal", label: "Borrower Portal", description: "borrower portal and self-service", group: CategoryGroup::MarketingCrm },
    CategoryOption { id: "referral", label: "Referrals", description: "referral and partner programs", group: CategoryGroup::MarketingCrm },
    CategoryOption { id: "brand-content", label: "Brand / Content", description: "branding, content, and collateral", group: CategoryGroup::MarketingCrm },
    CategoryOption { id: "co-marketing", label: "Co-Marketing", description: "realtor and partner co-marketing", group: CategoryGroup::MarketingCrm },
    CategoryOption { id: "reviews", label: "Reviews", description: "reviews, ratings, and testimonials", group: CategoryGroup::MarketingCrm },
    CategoryOption { id: "pre-approval", label: "Pre-Approval", description: "pre-approval and pre-qual tools", group: CategoryGroup::MarketingCrm },
    CategoryOption { id: "listing-alerts", label: "Listing Alerts", description: "property listing and market alerts", group: CategoryGroup::MarketingCrm },
    CategoryOption { id: "retention", label: "Retention", description: "post-close nurture and retention", group: CategoryGroup::MarketingCrm },
    // Products & Growth
    CategoryOption { id: "new-product", label: "New Product", description: "new loan products or programs", group: CategoryGroup::ProductsGrowth },
    CategoryOption { id: "pricing", label: "Pricing", description: "pricing engine and compensation", group: CategoryGroup::ProductsGrowth },
    CategoryOption { id: "guidelines", label: "Guidelines", description: "underwriting guideline improvements", group: CategoryGroup::ProductsGrowth },
    CategoryOption { id: "compliance", label: "Compliance", description: "regulatory compliance improvements", group: CategoryGroup::ProductsGrowth },
    CategoryOption { id: "training", label: "Training", description: "training and education", group: CategoryGroup::ProductsGrowth },
    CategoryOption { id: "onboarding", label: "Onboarding", description: "new hire onboarding", group: CategoryGroup::ProductsGrowth },
    CategoryOption { id: "vendor", label: "Vendor", description: "vendor and third-party partnerships", group: CategoryGroup::ProductsGrowth },
    CategoryOption { id: "cost-savings", label: "Cost Savings", description: "cost reduction and efficiency", group: CategoryGroup::ProductsGrowth },
    CategoryOption { id: "revenue", label: "Revenue", description: "revenue growth opportunities", group: CategoryGroup::ProductsGrowth },
    CategoryOption { id: "risk", label: "Risk Mgmt", description: "risk management and fraud prevention", group: CategoryGroup::ProductsGrowth },
    CategoryOption { id: "investor", label: "Investor", description: "secondary market and investor relations", group: CategoryGroup::ProductsGrowth },
    CategoryOption { id: "policy", label: "Policy", description: "internal policy and procedure updates", group: CategoryGroup::ProductsGrowth },
];

static CATEGORY_INDEX: Lazy<HashMap<&'static str, &'static CategoryOption>> = Lazy::new(|| {
    CATEGORY_OPTIONS
        .iter()
        .map(|option| (option.id, option))
        .collect()
});

/// Looks up a category by id.
pub fn find_category(id: &str) -> Option<&'static CategoryOption> {
    CATEGORY_INDEX.get(id).copied()
}

/// Returns the semantic description for a category id.
///
/// Unknown ids degrade to the literal phrase `"general"` rather than
/// erroring, so a stale or mistyped id can never fail a request.
pub fn describe(id: &str) -> &'static str {
    find_category(id)
        .map(|option| option.description)
        .unwrap_or(GENERAL_DESCRIPTION)
}

/// Returns the human-readable label for a category id.
///
/// The catalog label wins when the id is known; otherwise the label is
/// derived from the identifier by replacing separators with spaces and
/// capitalizing each word.
pub fn label_of(id: &str) -> String {
    match find_category(id) {
        Some(option) => option.label.to_string(),
        None => derive_label(id),
    }
}

/// Title-cases a kebab-case identifier ("rate-lock" -> "Rate Lock").
pub fn derive_label(id: &str) -> String {
    id.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
