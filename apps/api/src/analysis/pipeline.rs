//! Glue for one full analysis: parse both texts, then score and suggest.

use crate::analysis::jd_parser::parse_jd;
use crate::analysis::models::{AnalysisResult, ParsedPair};
use crate::analysis::resume_parser::parse_resume;
use crate::analysis::scoring::score_all;
use crate::analysis::suggestions::build_suggestions;
use crate::analysis::taxonomy::SkillTaxonomy;

/// Runs the whole pipeline. Total over its inputs: empty text yields a
/// fully-populated result with empty collections.
pub fn run_analysis(
    taxonomy: &SkillTaxonomy,
    jd_text: &str,
    resume_text: &str,
) -> (AnalysisResult, ParsedPair) {
    let jd = parse_jd(jd_text, taxonomy);
    let resume = parse_resume(resume_text, taxonomy);
    let scores = score_all(&jd, &resume);
    let suggestions = build_suggestions(&jd, &resume);

    (
        AnalysisResult {
            scores,
            suggestions,
        },
        ParsedPair { jd, resume },
    )
}
