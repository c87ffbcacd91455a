//! Wire form of a single form operation, applied to a posted `ResumeData`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::editor::collection::{EditError, Notice};
use crate::editor::sections::{ResumeEditor, SectionEntry};
use crate::models::resume::{
    Certification, Education, EntryId, Experience, Language, Project, Reference,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    Experience,
    Education,
    Certifications,
    Languages,
    Projects,
    References,
    Skills,
    Interests,
}

impl Section {
    pub fn label(&self) -> &'static str {
        match self {
            Section::Experience => Experience::LABEL,
            Section::Education => Education::LABEL,
            Section::Certifications => Certification::LABEL,
            Section::Languages => Language::LABEL,
            Section::Projects => Project::LABEL,
            Section::References => Reference::LABEL,
            Section::Skills => "skill",
            Section::Interests => "interest",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum EditCommand {
    /// `value` is a draft record for record sections (null = blank entry) or a
    /// string for skills and interests.
    Add {
        section: Section,
        #[serde(default)]
        value: Value,
    },
    Update {
        section: Section,
        id: EntryId,
        field: String,
        value: Value,
    },
    /// Record sections remove by `id`; skills and interests by `value`
    /// (structured skills accept either).
    Remove {
        section: Section,
        #[serde(default)]
        id: Option<EntryId>,
        #[serde(default)]
        value: Option<String>,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct EditOutcome {
    pub notice: Notice,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntryId>,
}

impl EditOutcome {
    fn new(notice: Notice, section: Section, id: Option<EntryId>) -> Self {
        Self {
            notice,
            message: notice.message(section.label()),
            id,
        }
    }
}

impl EditCommand {
    pub fn section(&self) -> Section {
        match self {
            EditCommand::Add { section, .. }
            | EditCommand::Update { section, .. }
            | EditCommand::Remove { section, .. } => *section,
        }
    }

    pub fn apply(self, editor: &mut ResumeEditor) -> Result<EditOutcome, EditError> {
        let section = self.section();
        match self {
            EditCommand::Add { value, .. } => apply_add(editor, section, value),
            EditCommand::Update {
                id, field, value, ..
            } => {
                let notice = match section {
                    Section::Experience => editor.update::<Experience>(id, &field, value)?,
                    Section::Education => editor.update::<Education>(id, &field, value)?,
                    Section::Certifications => {
                        editor.update::<Certification>(id, &field, value)?
                    }
                    Section::Languages => editor.update::<Language>(id, &field, value)?,
                    Section::Projects => editor.update::<Project>(id, &field, value)?,
                    Section::References => editor.update::<Reference>(id, &field, value)?,
                    Section::Skills => editor.update_skill(id, &field, value)?,
                    Section::Interests => {
                        return Err(EditError::Unsupported(section.label().to_string()))
                    }
                };
                Ok(EditOutcome::new(notice, section, Some(id)))
            }
            EditCommand::Remove { id, value, .. } => apply_remove(editor, section, id, value),
        }
    }
}

fn apply_add(
    editor: &mut ResumeEditor,
    section: Section,
    value: Value,
) -> Result<EditOutcome, EditError> {
    fn draft<T: SectionEntry>(value: Value) -> Result<T, EditError> {
        if value.is_null() {
            return Ok(T::default());
        }
        serde_json::from_value(value).map_err(|e| EditError::InvalidValue {
            field: "value".to_string(),
            reason: e.to_string(),
        })
    }

    let id = match section {
        Section::Experience => editor.add(draft::<Experience>(value)?)?,
        Section::Education => editor.add(draft::<Education>(value)?)?,
        Section::Certifications => editor.add(draft::<Certification>(value)?)?,
        Section::Languages => editor.add(draft::<Language>(value)?)?,
        Section::Projects => editor.add(draft::<Project>(value)?)?,
        Section::References => editor.add(draft::<Reference>(value)?)?,
        Section::Skills | Section::Interests => {
            let text = value.as_str().unwrap_or_default();
            let notice = if section == Section::Skills {
                editor.add_skill(text)?
            } else {
                editor.add_interest(text)
            };
            return Ok(EditOutcome::new(notice, section, None));
        }
    };
    Ok(EditOutcome::new(Notice::Added, section, Some(id)))
}

fn apply_remove(
    editor: &mut ResumeEditor,
    section: Section,
    id: Option<EntryId>,
    value: Option<String>,
) -> Result<EditOutcome, EditError> {
    let notice = match (section, id, value.as_deref()) {
        (Section::Interests, _, Some(v)) => editor.remove_interest(v),
        (Section::Skills, _, Some(v)) => editor.remove_skill(v),
        (Section::Skills, Some(id), None) => editor.remove_skill_by_id(id),
        (Section::Experience, Some(id), _) => editor.remove::<Experience>(id),
        (Section::Education, Some(id), _) => editor.remove::<Education>(id),
        (Section::Certifications, Some(id), _) => editor.remove::<Certification>(id),
        (Section::Languages, Some(id), _) => editor.remove::<Language>(id),
        (Section::Projects, Some(id), _) => editor.remove::<Project>(id),
        (Section::References, Some(id), _) => editor.remove::<Reference>(id),
        _ => Notice::NotFound,
    };
    Ok(EditOutcome::new(notice, section, id))
}
