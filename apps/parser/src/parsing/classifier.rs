//! Section classifier: inclusion-based keyword bucketing.
//!
//! A unit joins every bucket whose rule matches it, so a sentence about a
//! "degree" and "work experience" lands in both `education` and `experience`.

use crate::parsing::models::{SectionBucket, SentenceUnit};
use crate::parsing::vocabulary::CategoryRule;

/// Stable filter of `units` by `rule`.
pub fn classify(units: &[SentenceUnit], rule: &CategoryRule) -> SectionBucket {
    SectionBucket {
        category: rule.name.clone(),
        units: units
            .iter()
            .filter(|unit| rule.matches(&unit.as_str().to_lowercase()))
            .cloned()
            .collect(),
    }
}

/// One bucket per rule, in rule order. Each unit is lower-cased once.
pub fn classify_all(units: &[SentenceUnit], rules: &[CategoryRule]) -> Vec<SectionBucket> {
    let lowered: Vec<String> = units.iter().map(|u| u.as_str().to_lowercase()).collect();

    rules
        .iter()
        .map(|rule| SectionBucket {
            category: rule.name.clone(),
            units: units
                .iter()
                .zip(&lowered)
                .filter(|(_, low)| rule.matches(low))
                .map(|(unit, _)| unit.clone())
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::normalizer::normalize;
    use crate::parsing::vocabulary::{Vocabulary, EDUCATION, EXPERIENCE};

    fn bucket_strings(bucket: &SectionBucket) -> Vec<&str> {
        bucket.units.iter().map(SentenceUnit::as_str).collect()
    }

    #[test]
    fn test_case_insensitive_substring_match() {
        let units = normalize("UNIVERSITY of Somewhere. Hobbies include chess.");
        let rule = CategoryRule::new(EDUCATION, &["university"]);
        let bucket = classify(&units, &rule);
        assert_eq!(bucket.category, EDUCATION);
        assert_eq!(bucket_strings(&bucket), vec!["UNIVERSITY of Somewhere"]);
    }

    #[test]
    fn test_mixed_case_keyword_matches() {
        let units = normalize("Studied at the university of Somewhere.");
        let rule = CategoryRule::new(EDUCATION, &["University"]);
        let bucket = classify(&units, &rule);
        assert_eq!(
            bucket_strings(&bucket),
            vec!["Studied at the university of Somewhere"]
        );
        assert_eq!(classify_all(&units, &[rule])[0], bucket);
    }

    #[test]
    fn test_sentence_can_join_multiple_buckets() {
        let units = normalize("My Bachelor's degree led to work experience at Acme.");
        let vocab = Vocabulary::default();
        let buckets = classify_all(&units, vocab.categories());
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].category, EDUCATION);
        assert_eq!(buckets[1].category, EXPERIENCE);
        assert_eq!(buckets[0].units, buckets[1].units);
        assert_eq!(buckets[0].units.len(), 1);
    }

    #[test]
    fn test_preserves_source_order() {
        let units = normalize(
            "Job at Zeta Corp. Studied at college. Position at Alpha Inc. Employment at Mid LLC.",
        );
        let rule = CategoryRule::new(EXPERIENCE, &["job", "position", "employment"]);
        let bucket = classify(&units, &rule);
        assert_eq!(
            bucket_strings(&bucket),
            vec!["Job at Zeta Corp", "Position at Alpha Inc", "Employment at Mid LLC"]
        );
    }

    #[test]
    fn test_classify_all_agrees_with_classify() {
        let units = normalize("Master of Arts. Work at Acme. Nothing else.");
        let vocab = Vocabulary::default();
        let all = classify_all(&units, vocab.categories());
        for (rule, bucket) in vocab.categories().iter().zip(&all) {
            assert_eq!(&classify(&units, rule), bucket);
        }
    }

    #[test]
    fn test_empty_units_give_empty_buckets() {
        let vocab = Vocabulary::default();
        let buckets = classify_all(&[], vocab.categories());
        assert!(buckets.iter().all(|b| b.units.is_empty()));
    }
}
