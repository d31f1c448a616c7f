//! Score Engine: three weighted composites (fit, ATS, writing) over a parsed
//! JD and resume.
//!
//! Each composite is Σ(weight × component) with components on a 0–100 scale,
//! rounded and clamped to [0, 100]. Several components are fixed constants
//! until real measurements exist for them.

use crate::analysis::models::{ParsedJD, ParsedResume, ScoreBreakdown, Scores};

// Constant components.
const EXPERIENCE_PLACEHOLDER: f64 = 70.0;
const FORMATTING_PLACEHOLDER: f64 = 80.0;
const PARSEABILITY_PLACEHOLDER: f64 = 90.0;
const CLEANLINESS_PLACEHOLDER: f64 = 85.0;
const LENGTH_PLACEHOLDER: f64 = 80.0;
const SPELLING_PLACEHOLDER: f64 = 80.0;
const GRAMMAR_PLACEHOLDER: f64 = 80.0;
const BULLETS_PLACEHOLDER: f64 = 70.0;
const READABILITY_PLACEHOLDER: f64 = 85.0;

#[derive(Debug, Clone)]
pub struct FitWeights {
    pub skills: f64,
    pub core_skills: f64,
    pub experience: f64,
    pub keywords: f64,
    pub formatting: f64,
}

impl Default for FitWeights {
    fn default() -> Self {
        Self {
            skills: 0.5,
            core_skills: 0.2,
            experience: 0.15,
            keywords: 0.1,
            formatting: 0.05,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AtsWeights {
    pub keywords: f64,
    pub parseability: f64,
    pub cleanliness: f64,
    pub length: f64,
}

impl Default for AtsWeights {
    fn default() -> Self {
        Self {
            keywords: 0.5,
            parseability: 0.25,
            cleanliness: 0.15,
            length: 0.1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WritingWeights {
    pub spelling: f64,
    pub grammar: f64,
    pub bullets: f64,
    pub readability: f64,
}

impl Default for WritingWeights {
    fn default() -> Self {
        Self {
            spelling: 0.3,
            grammar: 0.3,
            bullets: 0.25,
            readability: 0.15,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScoringWeights {
    pub fit: FitWeights,
    pub ats: AtsWeights,
    pub writing: WritingWeights,
}

/// Rounds half away from zero, then clamps to [0, 100].
fn clamp_score(value: f64) -> u32 {
    value.round().clamp(0.0, 100.0) as u32
}

/// `numerator / denominator`, or 0 when the denominator is empty.
fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Raw counts feeding the composites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MatchCounts {
    required_matches: usize,
    preferred_matches: usize,
    summary_keyword_matches: usize,
}

fn count_matches(jd: &ParsedJD, resume: &ParsedResume) -> MatchCounts {
    let summary_lower = resume.summary.to_lowercase();
    MatchCounts {
        required_matches: resume
            .skills
            .iter()
            .filter(|s| jd.required_skills.contains(*s))
            .count(),
        preferred_matches: resume
            .skills
            .iter()
            .filter(|s| jd.preferred_skills.contains(*s))
            .count(),
        summary_keyword_matches: jd
            .keywords
            .iter()
            .filter(|k| summary_lower.contains(&k.to_lowercase()))
            .count(),
    }
}

/// Scores a resume against a JD with the default weights.
pub fn score_all(jd: &ParsedJD, resume: &ParsedResume) -> Scores {
    score_with_weights(jd, resume, &ScoringWeights::default())
}

pub fn score_with_weights(jd: &ParsedJD, resume: &ParsedResume, weights: &ScoringWeights) -> Scores {
    let counts = count_matches(jd, resume);

    let skill_density = ratio(counts.required_matches, resume.skills.len());
    let required_coverage = ratio(counts.required_matches, jd.required_skills.len());
    let keyword_ratio = ratio(counts.summary_keyword_matches, jd.keywords.len());

    let w = &weights.fit;
    let fit = w.skills * skill_density * 100.0
        + w.core_skills * required_coverage * 100.0
        + w.experience * EXPERIENCE_PLACEHOLDER
        + w.keywords * keyword_ratio * 100.0
        + w.formatting * FORMATTING_PLACEHOLDER;

    let w = &weights.ats;
    let ats = w.keywords * keyword_ratio * 100.0
        + w.parseability * PARSEABILITY_PLACEHOLDER
        + w.cleanliness * CLEANLINESS_PLACEHOLDER
        + w.length * LENGTH_PLACEHOLDER;

    let w = &weights.writing;
    let writing = w.spelling * SPELLING_PLACEHOLDER
        + w.grammar * GRAMMAR_PLACEHOLDER
        + w.bullets * BULLETS_PLACEHOLDER
        + w.readability * READABILITY_PLACEHOLDER;

    Scores {
        fit: clamp_score(fit),
        ats: clamp_score(ats),
        writing: clamp_score(writing),
        breakdown: ScoreBreakdown {
            required_coverage: clamp_score(required_coverage * 100.0),
            preferred_matches: counts.preferred_matches as u32,
        },
    }
}
