//! Preview normalizer: fills empty sections with representative placeholder
//! content so a template never renders an empty block.
//!
//! Populated sections pass through untouched (blank skill and interest values
//! are dropped first), which makes the function idempotent.

use crate::models::resume::{
    Certification, Education, Experience, Language, PersonalInfo, Project, Reference,
    ResumeData, Skills,
};

pub const DEFAULT_SKILLS: [&str; 5] = [
    "Communication",
    "Leadership",
    "Problem Solving",
    "Teamwork",
    "Time Management",
];

pub const DEFAULT_INTERESTS: [&str; 3] = ["Reading", "Travel", "Technology"];

pub fn enhance_resume_data(data: &ResumeData) -> ResumeData {
    ResumeData {
        personal_info: enhance_personal_info(&data.personal_info),
        experience: or_placeholder(&data.experience, placeholder_experience),
        education: or_placeholder(&data.education, placeholder_education),
        certifications: or_placeholder(&data.certifications, placeholder_certification),
        languages: or_placeholder(&data.languages, || Language {
            id: 1,
            language: "English".to_string(),
            proficiency: "Native".to_string(),
        }),
        projects: or_placeholder(&data.projects, placeholder_project),
        references: or_placeholder(&data.references, || Reference {
            id: 1,
            name: "Available upon request".to_string(),
            ..Default::default()
        }),
        skills: Skills::Names(enhance_skills(&data.skills)),
        interests: enhance_interests(&data.interests),
    }
}

/// Blank interests are dropped; defaults fill in when none are left.
fn enhance_interests(interests: &[String]) -> Vec<String> {
    let kept: Vec<String> = interests
        .iter()
        .map(|i| i.trim())
        .filter(|i| !i.is_empty())
        .map(str::to_string)
        .collect();
    if kept.is_empty() {
        DEFAULT_INTERESTS.iter().map(|s| s.to_string()).collect()
    } else {
        kept
    }
}

fn or_placeholder<T: Clone>(items: &[T], placeholder: impl FnOnce() -> T) -> Vec<T> {
    if items.is_empty() {
        vec![placeholder()]
    } else {
        items.to_vec()
    }
}

/// Coerces either skills shape to names, defaulting when nothing usable is left.
fn enhance_skills(skills: &Skills) -> Vec<String> {
    let names = skills.names();
    if names.is_empty() {
        DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect()
    } else {
        names
    }
}

fn enhance_personal_info(info: &PersonalInfo) -> PersonalInfo {
    let fill = |value: &str, placeholder: &str| {
        if value.trim().is_empty() {
            placeholder.to_string()
        } else {
            value.to_string()
        }
    };

    PersonalInfo {
        full_name: fill(&info.full_name, "Your Name"),
        title: fill(&info.title, "Professional Title"),
        summary: fill(
            &info.summary,
            "Results-driven professional with a track record of delivering high-quality work \
             and collaborating across teams.",
        ),
        ..info.clone()
    }
}

fn placeholder_experience() -> Experience {
    Experience {
        id: 1,
        company: "Company Name".to_string(),
        position: "Job Title".to_string(),
        location: "City, Country".to_string(),
        start_date: "2020-01".to_string(),
        end_date: String::new(),
        current: true,
        description: "Describe your responsibilities and the impact you had in this role."
            .to_string(),
        achievements: vec!["Highlight a measurable achievement".to_string()],
    }
}

fn placeholder_education() -> Education {
    Education {
        id: 1,
        institution: "University Name".to_string(),
        degree: "Bachelor's Degree".to_string(),
        field: "Field of Study".to_string(),
        start_date: "2016-09".to_string(),
        end_date: "2020-06".to_string(),
        ..Default::default()
    }
}

fn placeholder_certification() -> Certification {
    Certification {
        id: 1,
        name: "Professional Certification".to_string(),
        issuer: "Issuing Organization".to_string(),
        date: "2023".to_string(),
        ..Default::default()
    }
}

fn placeholder_project() -> Project {
    Project {
        id: 1,
        name: "Project Name".to_string(),
        description: "Briefly describe the project and your contribution.".to_string(),
        technologies: vec!["Technology".to_string()],
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::SkillRecord;

    fn populated() -> ResumeData {
        ResumeData {
            personal_info: PersonalInfo {
                full_name: "Grace Hopper".into(),
                title: "Rear Admiral".into(),
                summary: "Compiler pioneer.".into(),
                email: "grace@example.com".into(),
                ..Default::default()
            },
            experience: vec![Experience {
                id: 10,
                company: "US Navy".into(),
                ..Default::default()
            }],
            education: vec![Education {
                id: 11,
                institution: "Yale".into(),
                ..Default::default()
            }],
            certifications: vec![Certification {
                id: 12,
                name: "Mathematics PhD".into(),
                ..Default::default()
            }],
            languages: vec![Language {
                id: 13,
                language: "German".into(),
                proficiency: "Fluent".into(),
            }],
            projects: vec![Project {
                id: 14,
                name: "COBOL".into(),
                ..Default::default()
            }],
            references: vec![Reference {
                id: 15,
                name: "Howard Aiken".into(),
                ..Default::default()
            }],
            skills: Skills::Names(vec!["Compilers".into()]),
            interests: vec!["Nanoseconds".into()],
        }
    }

    #[test]
    fn test_empty_skills_default_to_five() {
        let out = enhance_resume_data(&ResumeData::default());
        assert_eq!(
            out.skills,
            Skills::Names(vec![
                "Communication".into(),
                "Leadership".into(),
                "Problem Solving".into(),
                "Teamwork".into(),
                "Time Management".into(),
            ])
        );
    }

    #[test]
    fn test_empty_languages_become_english_native() {
        let out = enhance_resume_data(&ResumeData::default());
        assert_eq!(out.languages.len(), 1);
        assert_eq!(out.languages[0].language, "English");
        assert_eq!(out.languages[0].proficiency, "Native");
    }

    #[test]
    fn test_structured_skills_are_flattened() {
        let data = ResumeData {
            skills: Skills::Records(vec![
                SkillRecord {
                    id: 1,
                    name: "Rust".into(),
                    level: "Expert".into(),
                },
                SkillRecord {
                    id: 2,
                    name: " ".into(),
                    level: String::new(),
                },
            ]),
            ..Default::default()
        };
        let out = enhance_resume_data(&data);
        assert_eq!(out.skills, Skills::Names(vec!["Rust".into()]));
    }

    #[test]
    fn test_blank_structured_skills_fall_back_to_defaults() {
        let data = ResumeData {
            skills: Skills::Records(vec![SkillRecord::default()]),
            ..Default::default()
        };
        assert_eq!(enhance_resume_data(&data).skills.names().len(), 5);
    }

    #[test]
    fn test_never_returns_empty_defaulted_sections() {
        let out = enhance_resume_data(&ResumeData::default());
        assert!(!out.experience.is_empty());
        assert!(!out.education.is_empty());
        assert!(!out.certifications.is_empty());
        assert!(!out.languages.is_empty());
        assert!(!out.projects.is_empty());
        assert!(!out.references.is_empty());
        assert!(!out.skills.is_empty());
        assert!(!out.interests.is_empty());
        assert_eq!(out.personal_info.full_name, "Your Name");
    }

    #[test]
    fn test_populated_data_passes_through() {
        let data = populated();
        assert_eq!(enhance_resume_data(&data), data);
    }

    /// Partly filled inputs: blank skill names, whitespace-only interests and
    /// personal-info fields, and some sections left empty.
    fn mixed_shapes() -> Vec<ResumeData> {
        let mut blank_skill_records = populated();
        blank_skill_records.skills = Skills::Records(vec![
            SkillRecord {
                id: 1,
                name: "  ".into(),
                level: "Expert".into(),
            },
            SkillRecord {
                id: 2,
                name: " SQL ".into(),
                level: String::new(),
            },
            SkillRecord::default(),
        ]);

        let mut whitespace_interests = populated();
        whitespace_interests.interests = vec!["   ".into(), "\t".into()];

        let mut some_blank_interests = populated();
        some_blank_interests.interests = vec![" ".into(), "Sailing".into()];

        let whitespace_info = ResumeData {
            personal_info: PersonalInfo {
                full_name: "   ".into(),
                title: "\n".into(),
                summary: " ".into(),
                phone: "555-0100".into(),
                ..Default::default()
            },
            skills: Skills::Names(vec![" ".into(), String::new()]),
            interests: vec![" ".into()],
            ..Default::default()
        };

        let mut half_filled = populated();
        half_filled.experience.clear();
        half_filled.references.clear();
        half_filled.skills = Skills::Names(vec!["Go".into(), "   ".into()]);

        vec![
            blank_skill_records,
            whitespace_interests,
            some_blank_interests,
            whitespace_info,
            half_filled,
        ]
    }

    fn assert_nothing_blank(out: &ResumeData) {
        assert!(!out.experience.is_empty());
        assert!(!out.education.is_empty());
        assert!(!out.certifications.is_empty());
        assert!(!out.languages.is_empty());
        assert!(!out.projects.is_empty());
        assert!(!out.references.is_empty());
        let Skills::Names(skills) = &out.skills else {
            panic!("skills not flattened");
        };
        assert!(!skills.is_empty());
        assert!(skills.iter().all(|s| !s.trim().is_empty()));
        assert!(!out.interests.is_empty());
        assert!(out.interests.iter().all(|i| !i.trim().is_empty()));
        assert!(!out.personal_info.full_name.trim().is_empty());
        assert!(!out.personal_info.title.trim().is_empty());
        assert!(!out.personal_info.summary.trim().is_empty());
    }

    #[test]
    fn test_idempotent() {
        let inputs = [ResumeData::default(), populated()]
            .into_iter()
            .chain(mixed_shapes());
        for data in inputs {
            let once = enhance_resume_data(&data);
            let twice = enhance_resume_data(&once);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_mixed_shapes_never_render_blank() {
        for data in mixed_shapes() {
            assert_nothing_blank(&enhance_resume_data(&data));
        }
    }

    #[test]
    fn test_blank_values_are_replaced_not_kept() {
        let shapes = mixed_shapes();
        let (blank_skill_records, whitespace_interests, some_blank_interests) =
            (&shapes[0], &shapes[1], &shapes[2]);
        let (whitespace_info, half_filled) = (&shapes[3], &shapes[4]);

        assert_eq!(
            enhance_resume_data(blank_skill_records).skills,
            Skills::Names(vec!["SQL".into()])
        );
        assert_eq!(
            enhance_resume_data(whitespace_interests).interests,
            DEFAULT_INTERESTS.map(String::from).to_vec()
        );
        assert_eq!(
            enhance_resume_data(some_blank_interests).interests,
            vec!["Sailing".to_string()]
        );

        let info = enhance_resume_data(whitespace_info).personal_info;
        assert_eq!(info.full_name, "Your Name");
        assert_eq!(info.title, "Professional Title");
        assert_eq!(info.phone, "555-0100");

        let out = enhance_resume_data(half_filled);
        assert_eq!(out.skills, Skills::Names(vec!["Go".into()]));
        assert_eq!(out.experience[0].company, "Company Name");
        assert_eq!(out.education, half_filled.education);
    }

    #[test]
    fn test_personal_info_keeps_contact_fields() {
        let data = ResumeData {
            personal_info: PersonalInfo {
                email: "x@example.com".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        let out = enhance_resume_data(&data);
        assert_eq!(out.personal_info.email, "x@example.com");
        assert_eq!(out.personal_info.title, "Professional Title");
    }
}
