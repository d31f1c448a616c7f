//! JD Parser: extracts skills, keywords, a years-of-experience hint and a title
//! hint from a raw job description.
//!
//! Purely line-based: no LLM call, no failure path. Text without any known
//! skill simply yields empty collections.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::models::ParsedJD;
use crate::analysis::taxonomy::SkillTaxonomy;
use crate::analysis::text::non_empty_lines;

static REQUIRED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(required|must have|mandatory)").expect("valid regex"));
static PREFERRED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(nice to have|preferred|bonus)").expect("valid regex"));
static YEARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+\s*\+?\s*years?)").expect("valid regex"));

/// How a JD line classifies the skills it mentions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineClass {
    Required,
    Preferred,
}

impl LineClass {
    /// Lines with neither marker count as required.
    fn of(line: &str) -> Self {
        if REQUIRED_RE.is_match(line) {
            LineClass::Required
        } else if PREFERRED_RE.is_match(line) {
            LineClass::Preferred
        } else {
            LineClass::Required
        }
    }
}

/// List separators plus ':' so "Required: aws" yields a bare "aws" token.
fn is_jd_delimiter(c: char) -> bool {
    matches!(c, ',' | '•' | '-' | ';' | '/' | ':')
}

/// Parses a job description into a `ParsedJD`.
pub fn parse_jd(jd_text: &str, taxonomy: &SkillTaxonomy) -> ParsedJD {
    let mut parsed = ParsedJD::default();

    for (idx, line) in non_empty_lines(jd_text).enumerate() {
        let class = LineClass::of(line);

        for token in line.split(is_jd_delimiter).map(str::trim).filter(|t| !t.is_empty()) {
            let Some(skill) = taxonomy.normalize(token) else {
                continue;
            };
            parsed.keywords.insert(token.to_string());

            // First classification wins; a skill never lands in both sets.
            if parsed.required_skills.contains(&skill) || parsed.preferred_skills.contains(&skill) {
                continue;
            }
            match class {
                LineClass::Required => parsed.required_skills.insert(skill),
                LineClass::Preferred => parsed.preferred_skills.insert(skill),
            };
        }

        if parsed.years_experience.is_none() {
            parsed.years_experience = YEARS_RE
                .captures(line)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string());
        }

        if idx == 0 && parsed.title_hint.is_none() {
            parsed.title_hint = Some(line.to_string());
        }
    }

    parsed
}
