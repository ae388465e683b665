//! Vocabulary: the configurable keyword table and skills lexicon.
//!
//! The classifier and the skills matcher are fixed algorithms; everything
//! they look for comes from a `Vocabulary`. The default carries the seed
//! categories (`education`, `experience`) and the seed skills lexicon. A TOML
//! file can replace either part:
//!
//! ```toml
//! skills = ["rust", "python", "leadership"]
//!
//! [[categories]]
//! name = "certifications"
//! keywords = ["certified", "certification", "license"]
//! ```

use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

pub const EDUCATION: &str = "education";
pub const EXPERIENCE: &str = "experience";

/// Names that collide with fixed keys of the serialized profile.
const RESERVED_CATEGORY_NAMES: &[&str] = &["contact", "skills", "sections"];

const EDUCATION_KEYWORDS: &[&str] = &[
    "education",
    "university",
    "college",
    "degree",
    "bachelor",
    "master",
];

const EXPERIENCE_KEYWORDS: &[&str] = &["experience", "work", "employment", "job", "position"];

const SEED_SKILLS: &[&str] = &[
    "javascript",
    "python",
    "java",
    "sql",
    "react",
    "node",
    "management",
    "leadership",
    "communication",
    "analysis",
];

/// One section category and the keywords that pull a sentence into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub name: String,
    pub keywords: Vec<String>,
}

impl CategoryRule {
    /// Keywords are stored lower-cased.
    pub fn new(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    /// `lowered` must already be lower-cased. Keywords are compared
    /// lower-cased however the rule was built.
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| {
            if k.chars().any(char::is_uppercase) {
                lowered.contains(k.to_lowercase().as_str())
            } else {
                lowered.contains(k.as_str())
            }
        })
    }
}

/// Exact-match lookup table of lower-cased skill tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillLexicon {
    entries: HashSet<String>,
}

impl SkillLexicon {
    pub fn new<I, S>(skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            entries: skills
                .into_iter()
                .map(|s| s.as_ref().trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// `token` must already be lower-cased.
    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains(token)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Default, Deserialize)]
struct VocabularyFile {
    categories: Option<Vec<CategoryRule>>,
    skills: Option<Vec<String>>,
}

/// Validated category rules plus the skills lexicon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    categories: Vec<CategoryRule>,
    skills: SkillLexicon,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            skills: SkillLexicon::new(SEED_SKILLS),
        }
    }
}

impl Vocabulary {
    /// Builds a vocabulary, lower-casing keywords and rejecting unusable rules.
    pub fn new(categories: Vec<CategoryRule>, skills: SkillLexicon) -> Result<Self> {
        Ok(Self {
            categories: validate_categories(categories)?,
            skills,
        })
    }

    /// Parses a TOML vocabulary. Omitted tables fall back to the seed values.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let file: VocabularyFile =
            toml::from_str(source).context("Vocabulary file is not valid TOML")?;

        let categories = file.categories.unwrap_or_else(default_categories);
        let skills = match file.skills {
            Some(list) => {
                if let Some(blank) = list.iter().position(|s| s.trim().is_empty()) {
                    bail!("Skill entry #{blank} is empty");
                }
                SkillLexicon::new(list)
            }
            None => SkillLexicon::new(SEED_SKILLS),
        };

        Self::new(categories, skills)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read vocabulary file '{}'", path.display()))?;
        Self::from_toml_str(&source)
            .with_context(|| format!("Invalid vocabulary file '{}'", path.display()))
    }

    pub fn categories(&self) -> &[CategoryRule] {
        &self.categories
    }

    pub fn skills(&self) -> &SkillLexicon {
        &self.skills
    }
}

fn default_categories() -> Vec<CategoryRule> {
    vec![
        CategoryRule::new(EDUCATION, EDUCATION_KEYWORDS),
        CategoryRule::new(EXPERIENCE, EXPERIENCE_KEYWORDS),
    ]
}

fn validate_categories(categories: Vec<CategoryRule>) -> Result<Vec<CategoryRule>> {
    if categories.is_empty() {
        bail!("Vocabulary must define at least one category");
    }

    let mut names = HashSet::new();
    let mut validated = Vec::with_capacity(categories.len());

    for rule in categories {
        let name = rule.name.trim().to_lowercase();
        if name.is_empty() {
            bail!("Category names must not be empty");
        }
        if RESERVED_CATEGORY_NAMES.contains(&name.as_str()) {
            bail!("Category name '{name}' is reserved");
        }
        if !names.insert(name.clone()) {
            bail!("Category '{name}' is defined more than once");
        }
        if rule.keywords.is_empty() {
            bail!("Category '{name}' has no keywords");
        }

        let mut keywords = Vec::with_capacity(rule.keywords.len());
        for keyword in &rule.keywords {
            let keyword = keyword.trim().to_lowercase();
            if keyword.is_empty() {
                bail!("Category '{name}' contains an empty keyword");
            }
            keywords.push(keyword);
        }

        validated.push(CategoryRule { name, keywords });
    }

    Ok(validated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_has_seed_categories_in_order() {
        let vocab = Vocabulary::default();
        let names: Vec<_> = vocab.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec![EDUCATION, EXPERIENCE]);
        assert_eq!(vocab.skills().len(), SEED_SKILLS.len());
        assert!(vocab.skills().contains("leadership"));
    }

    #[test]
    fn test_from_toml_overrides_skills_only() {
        let vocab = Vocabulary::from_toml_str(r#"skills = ["Rust", " Kubernetes "]"#).unwrap();
        assert!(vocab.skills().contains("rust"));
        assert!(vocab.skills().contains("kubernetes"));
        assert!(!vocab.skills().contains("python"));
        assert_eq!(vocab.categories().len(), 2);
    }

    #[test]
    fn test_from_toml_adds_custom_category() {
        let source = r#"
            [[categories]]
            name = "Certifications"
            keywords = ["Certified", "license"]
        "#;
        let vocab = Vocabulary::from_toml_str(source).unwrap();
        assert_eq!(vocab.categories().len(), 1);
        assert_eq!(vocab.categories()[0].name, "certifications");
        assert_eq!(vocab.categories()[0].keywords, vec!["certified", "license"]);
    }

    #[test]
    fn test_rejects_reserved_name() {
        let source = r#"
            [[categories]]
            name = "skills"
            keywords = ["proficient"]
        "#;
        let err = Vocabulary::from_toml_str(source).unwrap_err();
        assert!(err.to_string().contains("reserved"));
    }

    #[test]
    fn test_rejects_duplicate_and_empty() {
        let duplicate = r#"
            [[categories]]
            name = "projects"
            keywords = ["project"]

            [[categories]]
            name = "Projects"
            keywords = ["built"]
        "#;
        assert!(Vocabulary::from_toml_str(duplicate).is_err());

        let empty_keyword = r#"
            [[categories]]
            name = "projects"
            keywords = ["  "]
        "#;
        assert!(Vocabulary::from_toml_str(empty_keyword).is_err());

        assert!(Vocabulary::from_toml_str("categories = []").is_err());
        assert!(Vocabulary::from_toml_str(r#"skills = ["sql", ""]"#).is_err());
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = Vocabulary::from_toml_str("skills = [").unwrap_err();
        assert!(err.to_string().contains("not valid TOML"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"skills = ["golang"]"#).unwrap();
        let vocab = Vocabulary::load(file.path()).unwrap();
        assert!(vocab.skills().contains("golang"));
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let err = Vocabulary::load(Path::new("/nonexistent/vocab.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/vocab.toml"));
    }

    #[test]
    fn test_category_rule_matches_substring() {
        let rule = CategoryRule::new(EXPERIENCE, EXPERIENCE_KEYWORDS);
        assert!(rule.matches("worked at acme"));
        assert!(!rule.matches("graduated in 2019"));
    }

    #[test]
    fn test_category_rule_keywords_are_case_insensitive() {
        let rule = CategoryRule::new(EDUCATION, &["University", "MBA"]);
        assert_eq!(rule.keywords, vec!["university", "mba"]);
        assert!(rule.matches("studied at the university of somewhere"));

        let literal = CategoryRule {
            name: EDUCATION.to_string(),
            keywords: vec!["University".to_string()],
        };
        assert!(literal.matches("studied at the university of somewhere"));
    }
}
