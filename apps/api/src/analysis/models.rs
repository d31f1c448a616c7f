//! Structured records produced by the parsers and engines.
//!
//! Field names serialize in camelCase; API clients depend on them verbatim.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Unique membership with stable insertion order. Suggestion slicing relies on
/// the order.
pub type OrderedSet = IndexSet<String>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParsedJD {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_hint: Option<String>,
    /// Reserved; never populated by the parser.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seniority_range: Option<String>,
    pub required_skills: OrderedSet,
    pub preferred_skills: OrderedSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years_experience: Option<String>,
    /// Reserved; always empty.
    pub responsibilities: Vec<String>,
    pub keywords: OrderedSet,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceItem {
    pub title: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionsPresent {
    pub summary: bool,
    pub skills: bool,
    pub education: bool,
    pub projects: bool,
    pub experience: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeFlags {
    /// Layout detection happens upstream of text extraction, if at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_columns: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_images: Option<bool>,
    pub sections_present: SectionsPresent,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParsedResume {
    pub summary: String,
    pub experiences: Vec<ExperienceItem>,
    pub skills: OrderedSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<String>>,
    pub flags: ResumeFlags,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    /// 0 – 100
    pub required_coverage: u32,
    pub preferred_matches: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub fit: u32,     // 0 – 100
    pub ats: u32,     // 0 – 100
    pub writing: u32, // 0 – 100
    pub breakdown: ScoreBreakdown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestions {
    pub missing_skills: Vec<String>,
    pub keywords_to_add: Vec<String>,
    pub bullet_issues: Vec<String>,
    pub spelling_issues: Vec<String>,
    pub summary_hint: String,
    pub missing_sections: Vec<String>,
    pub format_flags: Vec<String>,
}

/// The caller-facing payload of one analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub scores: Scores,
    pub suggestions: Suggestions,
}

/// Both parsed records, kept alongside a result for inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedPair {
    pub jd: ParsedJD,
    pub resume: ParsedResume,
}
