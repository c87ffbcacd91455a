use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::editor::collection::{self, EditError, Notice};
use crate::editor::ids::IdGenerator;
use crate::models::resume::{
    Certification, Education, Entry, EntryId, Experience, Language, Project, Reference,
    ResumeData, SkillRecord, Skills,
};

/// A record type that lives in one of the aggregate's ordered collections.
pub trait SectionEntry: Entry + Serialize + DeserializeOwned + Default {
    /// Singular label used in user-facing notices.
    const LABEL: &'static str;

    fn collection(data: &mut ResumeData) -> &mut Vec<Self>;
}

macro_rules! section_entry {
    ($ty:ty, $label:literal, $field:ident) => {
        impl SectionEntry for $ty {
            const LABEL: &'static str = $label;

            fn collection(data: &mut ResumeData) -> &mut Vec<Self> {
                &mut data.$field
            }
        }
    };
}

section_entry!(Experience, "experience", experience);
section_entry!(Education, "education", education);
section_entry!(Certification, "certification", certifications);
section_entry!(Language, "language", languages);
section_entry!(Project, "project", projects);
section_entry!(Reference, "reference", references);

/// Single owner of a `ResumeData` for the length of an editing session.
///
/// All form sections mutate the aggregate through this type so id generation
/// stays consistent across collections.
#[derive(Debug, Clone)]
pub struct ResumeEditor {
    data: ResumeData,
    ids: IdGenerator,
}

impl Default for ResumeEditor {
    fn default() -> Self {
        Self::new(ResumeData::default())
    }
}

impl ResumeEditor {
    pub fn new(data: ResumeData) -> Self {
        let ids = IdGenerator::seeded_from(&data);
        Self { data, ids }
    }

    pub fn data(&self) -> &ResumeData {
        &self.data
    }

    pub fn into_data(self) -> ResumeData {
        self.data
    }

    // ── record collections ──────────────────────────────────────────────────

    pub fn add<T: SectionEntry>(&mut self, draft: T) -> Result<EntryId, EditError> {
        collection::add_entry(T::collection(&mut self.data), &mut self.ids, draft)
    }

    pub fn update<T: SectionEntry>(
        &mut self,
        id: EntryId,
        field: &str,
        value: Value,
    ) -> Result<Notice, EditError> {
        collection::update_field(T::collection(&mut self.data), id, field, value)
    }

    pub fn remove<T: SectionEntry>(&mut self, id: EntryId) -> Notice {
        collection::remove_entry(T::collection(&mut self.data), id)
    }

    // ── interests ───────────────────────────────────────────────────────────

    pub fn add_interest(&mut self, value: &str) -> Notice {
        collection::add_value(&mut self.data.interests, value)
    }

    pub fn remove_interest(&mut self, value: &str) -> Notice {
        collection::remove_value(&mut self.data.interests, value)
    }

    // ── skills ──────────────────────────────────────────────────────────────

    /// Adds a skill by name to whichever shape the skills collection has.
    /// Structured records get a fresh id.
    pub fn add_skill(&mut self, name: &str) -> Result<Notice, EditError> {
        match &mut self.data.skills {
            Skills::Names(names) => Ok(collection::add_value(names, name)),
            Skills::Records(records) => {
                let name = name.trim();
                if name.is_empty() {
                    return Ok(Notice::Empty);
                }
                if records.iter().any(|r| collection::same_value(&r.name, name)) {
                    return Ok(Notice::Duplicate);
                }
                let draft = SkillRecord {
                    name: name.to_string(),
                    ..Default::default()
                };
                collection::add_entry(records, &mut self.ids, draft)?;
                Ok(Notice::Added)
            }
        }
    }

    pub fn update_skill(
        &mut self,
        id: EntryId,
        field: &str,
        value: Value,
    ) -> Result<Notice, EditError> {
        match &mut self.data.skills {
            Skills::Records(records) => collection::update_field(records, id, field, value),
            Skills::Names(_) => Err(EditError::EntryNotFound(id)),
        }
    }

    pub fn remove_skill(&mut self, name: &str) -> Notice {
        match &mut self.data.skills {
            Skills::Names(names) => collection::remove_value(names, name),
            Skills::Records(records) => {
                let name = name.trim();
                let before = records.len();
                records.retain(|r| !collection::same_value(&r.name, name));
                if records.len() == before {
                    Notice::NotFound
                } else {
                    Notice::Removed
                }
            }
        }
    }

    pub fn remove_skill_by_id(&mut self, id: EntryId) -> Notice {
        match &mut self.data.skills {
            Skills::Records(records) => collection::remove_entry(records, id),
            Skills::Names(_) => Notice::NotFound,
        }
    }
}
