//! Skills extractor: exact lexicon matches over word tokens.

use crate::parsing::models::SkillSet;
use crate::parsing::vocabulary::SkillLexicon;

/// Tokens are maximal runs of alphanumerics and `_`; "Node.js" yields
/// `node` and `js`.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| !token.is_empty())
}

pub fn extract_skills(text: &str, lexicon: &SkillLexicon) -> SkillSet {
    let mut skills = SkillSet::default();
    for token in tokenize(text) {
        let lowered = token.to_lowercase();
        if lexicon.contains(&lowered) {
            skills.insert(&lowered);
        }
    }
    skills
}
