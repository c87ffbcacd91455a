use serde::{Deserialize, Serialize};

/// Locally unique, creation-time based identifier of a collection entry.
/// Only used for stable list-item identity while editing.
pub type EntryId = i64;

/// The full resume aggregate edited by the form layer and posted to every endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeData {
    pub personal_info: PersonalInfo,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub certifications: Vec<Certification>,
    pub languages: Vec<Language>,
    pub projects: Vec<Project>,
    pub references: Vec<Reference>,
    pub skills: Skills,
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: String,
    pub linkedin: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub id: EntryId,
    pub company: String,
    pub position: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub id: EntryId,
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
    pub gpa: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certification {
    pub id: EntryId,
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub credential_id: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Language {
    pub id: EntryId,
    pub language: String,
    pub proficiency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: EntryId,
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub url: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Reference {
    pub id: EntryId,
    pub name: String,
    pub position: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub relationship: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillRecord {
    pub id: EntryId,
    pub name: String,
    pub level: String,
}

/// Skills arrive either as plain names or as structured records, depending on
/// which form produced them. Both shapes are accepted on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Skills {
    Names(Vec<String>),
    Records(Vec<SkillRecord>),
}

impl Default for Skills {
    fn default() -> Self {
        Skills::Names(Vec::new())
    }
}

impl Skills {
    /// Flattens either shape into skill names, dropping blank ones.
    pub fn names(&self) -> Vec<String> {
        let names: Vec<&str> = match self {
            Skills::Names(names) => names.iter().map(String::as_str).collect(),
            Skills::Records(records) => records.iter().map(|r| r.name.as_str()).collect(),
        };
        names
            .into_iter()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Skills::Names(names) => names.is_empty(),
            Skills::Records(records) => records.is_empty(),
        }
    }
}

/// An entry of an ordered record collection, addressable by its id.
pub trait Entry {
    fn id(&self) -> EntryId;
    fn set_id(&mut self, id: EntryId);
}

macro_rules! impl_entry {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Entry for $ty {
                fn id(&self) -> EntryId {
                    self.id
                }

                fn set_id(&mut self, id: EntryId) {
                    self.id = id;
                }
            }
        )+
    };
}

impl_entry!(
    Experience,
    Education,
    Certification,
    Language,
    Project,
    Reference,
    SkillRecord,
);

impl ResumeData {
    /// Largest id currently in use across all record collections.
    pub fn max_entry_id(&self) -> EntryId {
        fn max_of<T: Entry>(items: &[T]) -> EntryId {
            items.iter().map(Entry::id).max().unwrap_or(0)
        }

        let skills = match &self.skills {
            Skills::Records(records) => max_of(records),
            Skills::Names(_) => 0,
        };

        [
            max_of(&self.experience),
            max_of(&self.education),
            max_of(&self.certifications),
            max_of(&self.languages),
            max_of(&self.projects),
            max_of(&self.references),
            skills,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }

    /// Flattens every user-entered string into one lower-cased blob.
    /// Used for keyword matching.
    pub fn searchable_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        let p = &self.personal_info;
        parts.extend([p.title.as_str(), p.summary.as_str()]);

        for e in &self.experience {
            parts.extend([e.company.as_str(), e.position.as_str(), e.description.as_str()]);
            parts.extend(e.achievements.iter().map(String::as_str));
        }
        for e in &self.education {
            parts.extend([e.institution.as_str(), e.degree.as_str(), e.field.as_str()]);
            parts.push(e.description.as_str());
        }
        for c in &self.certifications {
            parts.extend([c.name.as_str(), c.issuer.as_str()]);
        }
        for l in &self.languages {
            parts.push(l.language.as_str());
        }
        for pr in &self.projects {
            parts.extend([pr.name.as_str(), pr.description.as_str()]);
            parts.extend(pr.technologies.iter().map(String::as_str));
        }
        let skills = self.skills.names();
        parts.extend(skills.iter().map(String::as_str));
        parts.extend(self.interests.iter().map(String::as_str));

        parts
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n")
            .to_lowercase()
    }
}
