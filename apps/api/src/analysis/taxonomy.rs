//! Skill Taxonomy: canonical skill names plus a synonym table.
//!
//! Built once at startup and handed to both parsers. Tests construct smaller
//! taxonomies through `SkillTaxonomy::new`.

use std::collections::HashMap;

const DEFAULT_SKILLS: &[&str] = &[
    "javascript",
    "typescript",
    "react",
    "node",
    "express",
    "aws",
    "docker",
    "kubernetes",
    "postgres",
    "redis",
    "css",
    "html",
    "tailwind",
    "jest",
    "cypress",
];

const DEFAULT_SYNONYMS: &[(&str, &str)] = &[
    ("js", "javascript"),
    ("ts", "typescript"),
    ("k8s", "kubernetes"),
];

/// Immutable skill catalog. Lookups are exact and case-insensitive.
#[derive(Debug, Clone)]
pub struct SkillTaxonomy {
    canonical: Vec<String>,
    synonyms: HashMap<String, String>,
}

impl SkillTaxonomy {
    /// Keys and canonical names are stored lowercased.
    pub fn new<S, A, T>(canonical: S, synonyms: A) -> Self
    where
        S: IntoIterator,
        S::Item: AsRef<str>,
        A: IntoIterator<Item = (T, T)>,
        T: AsRef<str>,
    {
        Self {
            canonical: canonical
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .collect(),
            synonyms: synonyms
                .into_iter()
                .map(|(alias, target)| (alias.as_ref().to_lowercase(), target.as_ref().to_string()))
                .collect(),
        }
    }

    /// Maps a raw token to its canonical skill name.
    ///
    /// Synonyms win over the canonical list; anything else is `None`.
    pub fn normalize(&self, token: &str) -> Option<String> {
        let lower = token.to_lowercase();
        if let Some(target) = self.synonyms.get(&lower) {
            return Some(target.clone());
        }
        self.canonical.iter().find(|s| **s == lower).cloned()
    }

    pub fn skill_count(&self) -> usize {
        self.canonical.len()
    }
}

impl Default for SkillTaxonomy {
    fn default() -> Self {
        Self::new(DEFAULT_SKILLS.iter().copied(), DEFAULT_SYNONYMS.iter().copied())
    }
}
