//! Suggestion Engine: turns the gap between a parsed JD and a parsed resume
//! into concrete, text-grounded edits.
//!
//! Output order is stable for identical input: missing skills and keywords in
//! JD order, spelling issues summary-first, bullet issues in document order.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::models::{ParsedJD, ParsedResume, Suggestions};
use crate::analysis::text::{excerpt, truncate_chars};

const WEAK_VERBS: &[&str] = &[
    "responsible for",
    "helped",
    "assisted",
    "supporting",
    "worked on",
];

/// Common resume typos.
const COMMON_TYPOS: &[&str] = &[
    "teh",
    "recieve",
    "recieved",
    "mangement",
    "manger",
    "enviroment",
    "definately",
    "occured",
    "seperated",
    "adress",
    "responisble",
    "acheive",
    "acheived",
];

/// Word characters and boundaries are ASCII-only: a participle has to start
/// with an ASCII letter, digit or underscore to count.
static PASSIVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i-u:\b(?:was|were|been|being|be))\s+(?i-u:\w+ed\b)").expect("valid regex")
});

const MAX_ALIGNMENT_SUGGESTIONS: usize = 6;
const MAX_BULLET_WORDS: usize = 30;
const EXCERPT_CHARS: usize = 80;
const OPENING_EXCERPT_CHARS: usize = 25;
const CORE_SKILL_SAMPLES: usize = 3;
const TOP_MISSING_SKILLS: usize = 7;
const TOP_KEYWORDS: usize = 5;

fn collect_spelling_issues(text: &str, source_label: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let lower = text.to_lowercase();
    COMMON_TYPOS
        .iter()
        .filter(|typo| lower.contains(*typo))
        .map(|typo| {
            format!(
                "Possible spelling issue \"{typo}\" detected in {source_label}. Re-check this text for spelling: \"{}...\".",
                excerpt(text, EXCERPT_CHARS)
            )
        })
        .collect()
}

/// Metric, length, weak-verb and passive-voice checks for one bullet.
fn structural_issues(bullet: &str) -> Vec<String> {
    let lower = bullet.to_lowercase();
    let head = truncate_chars(bullet, EXCERPT_CHARS);
    let mut issues = Vec::new();

    if !bullet.chars().any(|c| c.is_ascii_digit()) {
        issues.push(format!(
            "Add at least one concrete metric (%, $, #, time saved) to quantify impact in: \"{head}...\""
        ));
    }

    let word_count = bullet.split_whitespace().count();
    if word_count > MAX_BULLET_WORDS {
        issues.push(format!(
            "Split or tighten this long bullet ({word_count} words) so it fits on 1–2 lines: \"{head}...\""
        ));
    }

    if WEAK_VERBS.iter().any(|verb| lower.starts_with(verb)) {
        issues.push(format!(
            "Rewrite the opening with a stronger ownership verb (e.g., \"Led\", \"Owned\", \"Designed\") instead of \"{}...\".",
            excerpt(bullet, OPENING_EXCERPT_CHARS)
        ));
    }

    if PASSIVE_RE.is_match(bullet) {
        issues.push(format!(
            "Convert this passive sentence into a direct \"I/We did X that drove Y\" statement: \"{head}...\""
        ));
    }

    issues
}

/// A bullet mentioning no required skill and no JD keyword gets a nudge,
/// provided the JD names at least one required skill.
fn alignment_issue(jd: &ParsedJD, bullet: &str) -> Option<String> {
    if jd.required_skills.is_empty() {
        return None;
    }
    let lower = bullet.to_lowercase();
    let mentions = |term: &String| lower.contains(&term.to_lowercase());
    if jd.required_skills.iter().any(mentions) || jd.keywords.iter().any(mentions) {
        return None;
    }

    let core_samples = jd
        .required_skills
        .iter()
        .take(CORE_SKILL_SAMPLES)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    Some(format!(
        "Tie this bullet directly to the JD by name‑dropping 1–2 core skills (e.g., {core_samples}) in: \"{}...\"",
        truncate_chars(bullet, EXCERPT_CHARS)
    ))
}

fn missing_sections(resume: &ParsedResume) -> Vec<String> {
    let present = &resume.flags.sections_present;
    let checks = [
        (
            present.projects,
            "Projects: add 1–2 recent, impact‑focused projects that mirror this JD's tools and scope.",
        ),
        (
            present.education,
            "Education: list degree, institution, and graduation year (or 'in progress').",
        ),
        (
            present.skills,
            "Skills: create a curated skills section that leads with this JD's core skills and keywords.",
        ),
        (
            present.summary,
            "Summary: write a 2–3 line headline with title, years of experience, top 5–7 skills, and one strong metric.",
        ),
    ];
    checks
        .into_iter()
        .filter(|(is_present, _)| !is_present)
        .map(|(_, message)| message.to_string())
        .collect()
}

fn format_flags(resume: &ParsedResume) -> Vec<String> {
    let mut flags = Vec::new();
    if resume.flags.has_columns == Some(true) {
        flags.push(
            "Columns detected; convert to a single‑column layout so ATS can parse your resume reliably."
                .to_string(),
        );
    }
    if resume.flags.has_images == Some(true) {
        flags.push(
            "Images detected; remove icons/graphics so ATS focuses on your text and keywords."
                .to_string(),
        );
    }
    flags
}

fn build_summary_hint(
    jd: &ParsedJD,
    resume: &ParsedResume,
    missing_skills: &[String],
    keywords_to_add: &[String],
) -> String {
    let top_missing = missing_skills
        .iter()
        .take(TOP_MISSING_SKILLS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    let top_keywords = keywords_to_add
        .iter()
        .take(TOP_KEYWORDS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    let mut parts: Vec<String> = Vec::new();

    if resume.summary.trim().is_empty() {
        parts.push(
            "Write a sharp, JD‑aligned summary at the top that reads like a headline, not a paragraph."
                .to_string(),
        );
        parts.push(match &jd.title_hint {
            Some(title) => format!(
                "Lead with the target title (e.g., \"{title}\") plus your total experience (e.g., \"Senior {title} | {}\").",
                jd.years_experience.as_deref().unwrap_or("X+ years")
            ),
            None => "Lead with your target title plus total experience (e.g., \"Senior Product Manager | 7+ years\")."
                .to_string(),
        });
        if !top_missing.is_empty() {
            parts.push(format!(
                "Explicitly list 4–7 of this JD's core skills near the front (for example: {top_missing})."
            ));
        }
        if !top_keywords.is_empty() {
            parts.push(format!(
                "Weave in 2–3 high‑value keywords from the JD (for example: {top_keywords})."
            ));
        }
        parts.push(
            "Close with one stand‑out metric that proves scope (revenue, users, savings, or efficiency)."
                .to_string(),
        );
    } else if !missing_skills.is_empty() || !keywords_to_add.is_empty() {
        parts.push("Tighten your summary so it mirrors this specific JD more directly.".to_string());
        if !top_missing.is_empty() {
            parts.push(format!(
                "Front‑load core JD skills (for example: {top_missing}) instead of a generic skills list."
            ));
        }
        if !top_keywords.is_empty() {
            parts.push(format!(
                "Add 2–3 of the JD's exact keywords in natural language so both recruiters and ATS see the match (for example: {top_keywords})."
            ));
        }
        parts.push(
            "Keep it to 2–3 high‑impact lines: who you are, where you play, and the business outcomes you drive."
                .to_string(),
        );
    } else {
        return "Your summary is solid; it already surfaces core skills and should read as a strong match for this JD."
            .to_string();
    }

    parts.join(" ")
}

/// Builds every suggestion category for a JD/resume pair.
pub fn build_suggestions(jd: &ParsedJD, resume: &ParsedResume) -> Suggestions {
    let missing_skills: Vec<String> = jd
        .required_skills
        .iter()
        .filter(|s| !resume.skills.contains(*s))
        .cloned()
        .collect();

    let summary_lower = resume.summary.to_lowercase();
    let keywords_to_add: Vec<String> = jd
        .keywords
        .iter()
        .filter(|k| !summary_lower.contains(&k.to_lowercase()))
        .cloned()
        .collect();

    let mut spelling_issues = collect_spelling_issues(&resume.summary, "your summary");
    let mut bullet_issues = Vec::new();
    let mut alignment_count = 0;

    for (exp_idx, exp) in resume.experiences.iter().enumerate() {
        for (bullet_idx, raw) in exp.bullets.iter().enumerate() {
            let bullet = raw.trim();
            if bullet.is_empty() {
                continue;
            }

            spelling_issues.extend(collect_spelling_issues(
                bullet,
                &format!(
                    "experience section bullet {} (role {})",
                    bullet_idx + 1,
                    exp_idx + 1
                ),
            ));

            bullet_issues.extend(structural_issues(bullet));

            // First six unaligned bullets only.
            if alignment_count < MAX_ALIGNMENT_SUGGESTIONS {
                if let Some(issue) = alignment_issue(jd, bullet) {
                    bullet_issues.push(issue);
                    alignment_count += 1;
                }
            }
        }
    }

    let summary_hint = build_summary_hint(jd, resume, &missing_skills, &keywords_to_add);

    Suggestions {
        missing_skills,
        keywords_to_add,
        bullet_issues,
        spelling_issues,
        summary_hint,
        missing_sections: missing_sections(resume),
        format_flags: format_flags(resume),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::jd_parser::parse_jd;
    use crate::analysis::models::{ExperienceItem, OrderedSet, SectionsPresent};
    use crate::analysis::resume_parser::parse_resume;
    use crate::analysis::taxonomy::SkillTaxonomy;

    fn set(items: &[&str]) -> OrderedSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn make_jd(required: &[&str], keywords: &[&str]) -> ParsedJD {
        ParsedJD {
            title_hint: Some("Backend Engineer".to_string()),
            required_skills: set(required),
            keywords: set(keywords),
            ..ParsedJD::default()
        }
    }

    fn resume_with_bullets(summary: &str, bullets: &[&str]) -> ParsedResume {
        ParsedResume {
            summary: summary.to_string(),
            experiences: vec![ExperienceItem {
                title: "Engineer".to_string(),
                bullets: bullets.iter().map(|b| b.to_string()).collect(),
            }],
            ..ParsedResume::default()
        }
    }

    fn count_containing(issues: &[String], needle: &str) -> usize {
        issues.iter().filter(|i| i.contains(needle)).count()
    }

    #[test]
    fn test_scenario_weak_verb_and_missing_metric() {
        let taxonomy = SkillTaxonomy::default();
        let jd = parse_jd("Backend Engineer\nRequired: javascript, aws", &taxonomy);
        let resume = parse_resume(
            "Skills\njs, k8s\nExperience\nBackend Dev\n- helped ship features",
            &taxonomy,
        );
        let suggestions = build_suggestions(&jd, &resume);

        assert_eq!(count_containing(&suggestions.bullet_issues, "stronger ownership verb"), 1);
        assert_eq!(count_containing(&suggestions.bullet_issues, "concrete metric"), 1);
        assert!(suggestions.bullet_issues[0].contains("\"helped ship features...\""));
        assert_eq!(suggestions.missing_skills, vec!["aws"]);
    }

    #[test]
    fn test_missing_skills_is_set_difference_in_jd_order() {
        let jd = make_jd(&["redis", "aws", "docker", "css"], &[]);
        let mut resume = ParsedResume::default();
        resume.skills = set(&["docker", "html"]);
        let suggestions = build_suggestions(&jd, &resume);
        assert_eq!(suggestions.missing_skills, vec!["redis", "aws", "css"]);
    }

    #[test]
    fn test_keywords_to_add_checks_summary_case_insensitively() {
        let jd = make_jd(&["javascript"], &["JS", "Docker", "aws"]);
        let resume = resume_with_bullets("Shipped docker images with js tooling", &[]);
        let suggestions = build_suggestions(&jd, &resume);
        assert_eq!(suggestions.keywords_to_add, vec!["aws"]);
    }

    #[test]
    fn test_spelling_checks_summary_then_bullets() {
        let resume = ParsedResume {
            summary: "Experienced in mangement".to_string(),
            experiences: vec![
                ExperienceItem {
                    title: "A".to_string(),
                    bullets: vec!["Cut costs 10%".to_string()],
                },
                ExperienceItem {
                    title: "B".to_string(),
                    bullets: vec!["Ran 3 teams".to_string(), "Did teh thing 5 times".to_string()],
                },
            ],
            ..ParsedResume::default()
        };
        let suggestions = build_suggestions(&ParsedJD::default(), &resume);
        assert_eq!(suggestions.spelling_issues.len(), 2);
        assert!(suggestions.spelling_issues[0].contains("\"mangement\" detected in your summary"));
        assert!(suggestions.spelling_issues[1]
            .contains("\"teh\" detected in experience section bullet 2 (role 2)"));
        assert!(suggestions.spelling_issues[1].contains("\"Did teh thing 5 times...\""));
    }

    #[test]
    fn test_multiple_typos_in_one_text_each_reported() {
        let issues = collect_spelling_issues("We recieved and acheived", "your summary");
        // "recieve" is a prefix of "recieved", "acheive" of "acheived"
        assert_eq!(issues.len(), 4);
    }

    #[test]
    fn test_long_bullet_flagged_with_word_count() {
        let long = vec!["word"; 31].join(" ") + " 5";
        let issues = structural_issues(&long);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("(32 words)"));

        let exactly_thirty = vec!["word"; 29].join(" ") + " 5";
        assert!(structural_issues(&exactly_thirty).is_empty());
    }

    #[test]
    fn test_excerpt_is_capped_at_80_chars() {
        let bullet = "x".repeat(120);
        let issues = structural_issues(&bullet);
        assert!(issues[0].contains(&format!("\"{}...\"", "x".repeat(80))));
        assert!(!issues[0].contains(&"x".repeat(81)));
    }

    #[test]
    fn test_weak_verb_must_open_the_bullet() {
        assert_eq!(
            count_containing(&structural_issues("Responsible for 4 pipelines"), "stronger"),
            1
        );
        assert_eq!(
            count_containing(&structural_issues("Led 4 pipelines I helped design"), "stronger"),
            0
        );
    }

    #[test]
    fn test_passive_voice_detected() {
        let issues = structural_issues("Service was deployed to 3 regions");
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("passive sentence"));
        assert!(structural_issues("Deployed service to 3 regions").is_empty());
    }

    #[test]
    fn test_passive_voice_uses_ascii_word_classes() {
        assert_eq!(
            count_containing(&structural_issues("Service WAS Deployed to 3 regions"), "passive"),
            1
        );
        assert_eq!(
            count_containing(&structural_issues("Service was überarbeited in 3 weeks"), "passive"),
            0
        );
    }

    #[test]
    fn test_all_checks_can_fire_on_one_bullet() {
        let bullet = format!("Helped as the system was redesigned {}", vec!["again"; 30].join(" "));
        let issues = structural_issues(&bullet);
        assert_eq!(issues.len(), 4);
        assert!(issues[0].contains("concrete metric"));
        assert!(issues[1].contains("long bullet"));
        assert!(issues[2].contains("stronger ownership verb"));
        assert!(issues[3].contains("passive sentence"));
    }

    #[test]
    fn test_alignment_names_first_three_required_skills() {
        let jd = make_jd(&["aws", "docker", "redis", "css"], &["AWS"]);
        let resume = resume_with_bullets("", &["Built 3 dashboards"]);
        let suggestions = build_suggestions(&jd, &resume);
        let aligned: Vec<_> = suggestions
            .bullet_issues
            .iter()
            .filter(|i| i.starts_with("Tie this bullet"))
            .collect();
        assert_eq!(aligned.len(), 1);
        assert!(aligned[0].contains("(e.g., aws, docker, redis)"));
    }

    #[test]
    fn test_alignment_skipped_when_bullet_mentions_jd_terms() {
        let jd = make_jd(&["aws"], &["K8s"]);
        let resume = resume_with_bullets("", &["Moved 12 services to AWS", "Ran k8s for 4 teams"]);
        let suggestions = build_suggestions(&jd, &resume);
        assert_eq!(count_containing(&suggestions.bullet_issues, "Tie this bullet"), 0);
    }

    #[test]
    fn test_alignment_requires_required_skills() {
        let jd = make_jd(&[], &["aws"]);
        let resume = resume_with_bullets("", &["Built 3 dashboards"]);
        let suggestions = build_suggestions(&jd, &resume);
        assert_eq!(count_containing(&suggestions.bullet_issues, "Tie this bullet"), 0);
    }

    #[test]
    fn test_alignment_capped_at_six() {
        let jd = make_jd(&["aws"], &["aws"]);
        let bullets: Vec<String> = (0..20).map(|i| format!("Built dashboard {i}")).collect();
        let resume = ParsedResume {
            experiences: vec![
                ExperienceItem {
                    title: "A".to_string(),
                    bullets: bullets[..4].to_vec(),
                },
                ExperienceItem {
                    title: "B".to_string(),
                    bullets: bullets[4..].to_vec(),
                },
            ],
            ..ParsedResume::default()
        };
        let suggestions = build_suggestions(&jd, &resume);
        let aligned: Vec<_> = suggestions
            .bullet_issues
            .iter()
            .filter(|i| i.starts_with("Tie this bullet"))
            .collect();
        assert_eq!(aligned.len(), 6);
        assert!(aligned[0].contains("Built dashboard 0"));
        assert!(aligned[5].contains("Built dashboard 5"));
    }

    #[test]
    fn test_missing_sections_fixed_order() {
        let taxonomy = SkillTaxonomy::default();
        let resume = parse_resume(
            "Seasoned engineer\nExperience\nDev\n- built 3 things",
            &taxonomy,
        );
        let suggestions = build_suggestions(&ParsedJD::default(), &resume);
        assert_eq!(suggestions.missing_sections.len(), 3);
        assert!(suggestions.missing_sections[0].starts_with("Projects:"));
        assert!(suggestions.missing_sections[1].starts_with("Education:"));
        assert!(suggestions.missing_sections[2].starts_with("Skills:"));
    }

    #[test]
    fn test_missing_summary_flagged_last_and_experience_never() {
        let mut resume = ParsedResume::default();
        resume.flags.sections_present = SectionsPresent {
            summary: false,
            skills: true,
            education: true,
            projects: true,
            experience: false,
        };
        let suggestions = build_suggestions(&ParsedJD::default(), &resume);
        assert_eq!(suggestions.missing_sections.len(), 1);
        assert!(suggestions.missing_sections[0].starts_with("Summary:"));
    }

    #[test]
    fn test_format_flags_empty_for_parsed_resume() {
        let resume = parse_resume("Summary\nHello", &SkillTaxonomy::default());
        assert!(build_suggestions(&ParsedJD::default(), &resume).format_flags.is_empty());
    }

    #[test]
    fn test_format_flags_when_layout_flagged() {
        let mut resume = ParsedResume::default();
        resume.flags.has_columns = Some(true);
        resume.flags.has_images = Some(true);
        let flags = build_suggestions(&ParsedJD::default(), &resume).format_flags;
        assert_eq!(flags.len(), 2);
        assert!(flags[0].starts_with("Columns detected"));
        assert!(flags[1].starts_with("Images detected"));
    }

    #[test]
    fn test_summary_hint_empty_summary_branch() {
        let mut jd = make_jd(&["aws", "docker"], &["aws", "Docker"]);
        jd.years_experience = Some("5+ years".to_string());
        let hint = build_suggestions(&jd, &ParsedResume::default()).summary_hint;
        assert!(hint.starts_with("Write a sharp, JD‑aligned summary"));
        assert!(hint.contains("\"Senior Backend Engineer | 5+ years\""));
        assert!(hint.contains("(for example: aws, docker)"));
        assert!(hint.contains("(for example: aws, Docker)"));
        assert!(hint.ends_with("(revenue, users, savings, or efficiency)."));
    }

    #[test]
    fn test_summary_hint_empty_summary_without_jd_details() {
        let hint = build_suggestions(&ParsedJD::default(), &ParsedResume::default()).summary_hint;
        assert!(!hint.is_empty());
        assert!(hint.contains("Senior Product Manager | 7+ years"));
        assert!(!hint.contains("for example"));
    }

    #[test]
    fn test_summary_hint_whitespace_summary_counts_as_empty() {
        let resume = resume_with_bullets("   ", &[]);
        let hint = build_suggestions(&ParsedJD::default(), &resume).summary_hint;
        assert!(hint.starts_with("Write a sharp"));
    }

    #[test]
    fn test_summary_hint_lists_at_most_seven_skills() {
        let skills = ["a", "b", "c", "d", "e", "f", "g", "h"];
        let jd = make_jd(&skills, &[]);
        let hint = build_suggestions(&jd, &resume_with_bullets("Engineer", &[])).summary_hint;
        assert!(hint.starts_with("Tighten your summary"));
        assert!(hint.contains("(for example: a, b, c, d, e, f, g)"));
        assert!(!hint.contains(", h"));
    }

    #[test]
    fn test_summary_hint_affirms_complete_summary() {
        let jd = make_jd(&["aws"], &["aws"]);
        let mut resume = resume_with_bullets("Built on aws for 6 years", &[]);
        resume.skills = set(&["aws"]);
        let hint = build_suggestions(&jd, &resume).summary_hint;
        assert!(hint.starts_with("Your summary is solid"));
    }

    #[test]
    fn test_blank_bullets_are_skipped() {
        let resume = resume_with_bullets("", &["", "   "]);
        let suggestions = build_suggestions(&make_jd(&["aws"], &[]), &resume);
        assert!(suggestions.bullet_issues.is_empty());
    }
}
