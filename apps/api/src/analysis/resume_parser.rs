//! Resume Parser: splits resume text into sections and pulls out the summary,
//! experience entries with their bullets, and normalized skills.

use std::collections::HashMap;

use crate::analysis::models::{
    ExperienceItem, OrderedSet, ParsedResume, ResumeFlags, SectionsPresent,
};
use crate::analysis::taxonomy::SkillTaxonomy;
use crate::analysis::text::non_empty_lines;

/// Recognized resume sections. Declaration order is header-matching priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Section {
    Experience,
    WorkHistory,
    Summary,
    Skills,
    Education,
    Projects,
}

impl Section {
    const HEADERS: [Section; 6] = [
        Section::Experience,
        Section::WorkHistory,
        Section::Summary,
        Section::Skills,
        Section::Education,
        Section::Projects,
    ];

    fn header(self) -> &'static str {
        match self {
            Section::Experience => "experience",
            Section::WorkHistory => "work history",
            Section::Summary => "summary",
            Section::Skills => "skills",
            Section::Education => "education",
            Section::Projects => "projects",
        }
    }

    /// Prefix test only, so "Summary of Qualifications" opens `Summary`.
    fn detect(line: &str) -> Option<Section> {
        let lower = line.to_lowercase();
        Self::HEADERS
            .into_iter()
            .find(|s| lower.starts_with(s.header()))
    }
}

fn is_skill_delimiter(c: char) -> bool {
    matches!(c, ',' | ';' | '•')
}

fn strip_bullet(line: &str) -> Option<&str> {
    line.strip_prefix('-')
        .or_else(|| line.strip_prefix('•'))
        .map(str::trim_start)
}

/// Buffers keyed by section. A key is present once its header has been seen;
/// `Summary` is present from the start.
fn split_sections(resume_text: &str) -> HashMap<Section, Vec<&str>> {
    let mut sections: HashMap<Section, Vec<&str>> = HashMap::new();
    let mut current = Section::Summary;
    sections.insert(current, Vec::new());

    for line in non_empty_lines(resume_text) {
        if let Some(header) = Section::detect(line) {
            current = header;
            sections.insert(current, Vec::new());
            continue;
        }
        sections.entry(current).or_default().push(line);
    }

    sections
}

fn build_experiences(lines: &[&str]) -> Vec<ExperienceItem> {
    let mut experiences: Vec<ExperienceItem> = Vec::new();

    for line in lines {
        match strip_bullet(line) {
            Some(bullet) => {
                // Bullets ahead of the first role have nothing to attach to.
                if let Some(last) = experiences.last_mut() {
                    last.bullets.push(bullet.to_string());
                }
            }
            None => experiences.push(ExperienceItem {
                title: line.to_string(),
                bullets: Vec::new(),
            }),
        }
    }

    experiences
}

/// Parses resume text into a `ParsedResume`.
pub fn parse_resume(resume_text: &str, taxonomy: &SkillTaxonomy) -> ParsedResume {
    let sections = split_sections(resume_text);
    let buffer = |s: Section| sections.get(&s).map(Vec::as_slice).unwrap_or_default();
    let has = |s: Section| !buffer(s).is_empty();

    let mut skills = OrderedSet::new();
    for line in buffer(Section::Skills) {
        for token in line.split(is_skill_delimiter).map(str::trim) {
            if let Some(skill) = taxonomy.normalize(token) {
                skills.insert(skill);
            }
        }
    }

    let experience_lines = sections
        .get(&Section::Experience)
        .or_else(|| sections.get(&Section::WorkHistory))
        .map(Vec::as_slice)
        .unwrap_or_default();

    let owned = |s: Section| {
        sections
            .get(&s)
            .map(|lines| lines.iter().map(|l| l.to_string()).collect::<Vec<_>>())
    };

    ParsedResume {
        summary: buffer(Section::Summary).join(" "),
        experiences: build_experiences(experience_lines),
        skills,
        education: owned(Section::Education),
        projects: owned(Section::Projects),
        flags: ResumeFlags {
            has_columns: None,
            has_images: None,
            sections_present: SectionsPresent {
                summary: has(Section::Summary),
                skills: has(Section::Skills),
                education: has(Section::Education),
                projects: has(Section::Projects),
                experience: has(Section::Experience) || has(Section::WorkHistory),
            },
        },
    }
}
