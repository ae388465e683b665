use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

/// An uploaded document as handed to the pipeline.
#[derive(Debug, Clone, Copy)]
pub struct RawDocument<'a> {
    pub bytes: &'a [u8],
    pub declared_mime_type: &'a str,
}

impl<'a> RawDocument<'a> {
    pub fn new(bytes: &'a [u8], declared_mime_type: &'a str) -> Self {
        Self {
            bytes,
            declared_mime_type,
        }
    }
}

/// Plain text produced by a format adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub plain_text: String,
    pub source_mime_type: String,
}

/// A trimmed, non-empty sentence-like fragment of the extracted text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SentenceUnit(String);

impl SentenceUnit {
    /// Returns `None` for fragments that are empty after trimming.
    pub fn new(fragment: &str) -> Option<Self> {
        let collapsed = fragment.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            None
        } else {
            Some(Self(collapsed))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Sentence units that matched one category, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionBucket {
    pub category: String,
    pub units: Vec<SentenceUnit>,
}

impl SectionBucket {
    pub fn into_strings(self) -> Vec<String> {
        self.units.into_iter().map(SentenceUnit::into_string).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Lower-cased skills in first-seen order, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillSet {
    ordered: Vec<String>,
    seen: HashSet<String>,
}

impl SkillSet {
    /// Inserts a skill unless it is already present. Returns whether it was new.
    pub fn insert(&mut self, skill: &str) -> bool {
        let skill = skill.to_lowercase();
        if self.seen.contains(&skill) {
            return false;
        }
        self.seen.insert(skill.clone());
        self.ordered.push(skill);
        true
    }

    pub fn as_slice(&self) -> &[String] {
        &self.ordered
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}

/// The normalized record emitted by the pipeline.
///
/// Categories other than `education` and `experience` are collected in
/// `sections` and flattened into the top-level JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredProfile {
    pub contact: ContactInfo,
    pub education: Vec<String>,
    pub experience: Vec<String>,
    pub skills: Vec<String>,
    #[serde(flatten, default)]
    pub sections: BTreeMap<String, Vec<String>>,
}
