use crate::parsing::models::{ContactInfo, SectionBucket, SkillSet, StructuredProfile};
use crate::parsing::vocabulary::{EDUCATION, EXPERIENCE};

/// Assembles the final profile. `education` and `experience` buckets fill
/// their dedicated fields; every other category goes to `sections`.
pub fn aggregate(
    contact: ContactInfo,
    buckets: Vec<SectionBucket>,
    skills: SkillSet,
) -> StructuredProfile {
    let mut profile = StructuredProfile {
        contact,
        skills: skills.into_vec(),
        ..StructuredProfile::default()
    };

    for bucket in buckets {
        match bucket.category.as_str() {
            EDUCATION => profile.education = bucket.into_strings(),
            EXPERIENCE => profile.experience = bucket.into_strings(),
            _ => {
                let category = bucket.category.clone();
                profile.sections.insert(category, bucket.into_strings());
            }
        }
    }

    profile
}
