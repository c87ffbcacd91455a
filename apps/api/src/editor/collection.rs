//! Collection primitives shared by every form section.
//!
//! Flat-string collections (interests, plain skills) are edited by value;
//! record collections (experience, references, ...) are edited by entry id.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::editor::ids::IdGenerator;
use crate::models::resume::{Entry, EntryId};

/// Transient outcome of a form operation, surfaced to the user as a short notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    Added,
    Duplicate,
    Empty,
    Updated,
    Removed,
    NotFound,
}

impl Notice {
    /// Whether the collection was changed by the operation.
    pub fn is_change(&self) -> bool {
        matches!(self, Notice::Added | Notice::Updated | Notice::Removed)
    }

    /// User-facing notice text for an item label such as "interest".
    pub fn message(&self, item: &str) -> String {
        match self {
            Notice::Added => format!("{} added", capitalize(item)),
            Notice::Duplicate => format!("This {item} already exists"),
            Notice::Empty => format!("Please enter a {item}"),
            Notice::Updated => format!("{} updated", capitalize(item)),
            Notice::Removed => format!("{} removed", capitalize(item)),
            Notice::NotFound => format!("No matching {item} found"),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum EditError {
    #[error("No entry with id {0}")]
    EntryNotFound(EntryId),

    #[error("Unknown field '{0}'")]
    UnknownField(String),

    #[error("Field '{0}' cannot be edited")]
    ImmutableField(String),

    #[error("Invalid value for field '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Section '{0}' does not support this operation")]
    Unsupported(String),

    #[error("No entry id is left above {0}")]
    IdsExhausted(EntryId),
}

// ────────────────────────────────────────────────────────────────────────────
// Flat-string collections
// ────────────────────────────────────────────────────────────────────────────

/// Appends `value` unless it is blank or already present (case-insensitive).
pub fn add_value(list: &mut Vec<String>, value: &str) -> Notice {
    let value = value.trim();
    if value.is_empty() {
        return Notice::Empty;
    }
    if contains_value(list, value) {
        debug!("Rejected duplicate value '{value}'");
        return Notice::Duplicate;
    }
    list.push(value.to_string());
    debug!("Appended '{value}' at position {}", list.len() - 1);
    Notice::Added
}

/// Drops the entries matching `value` (same comparison as duplicate detection),
/// keeping the order of everything else.
pub fn remove_value(list: &mut Vec<String>, value: &str) -> Notice {
    let value = value.trim();
    let before = list.len();
    list.retain(|v| !same_value(v, value));
    if list.len() == before {
        Notice::NotFound
    } else {
        debug!("Removed '{value}'");
        Notice::Removed
    }
}

pub fn contains_value(list: &[String], value: &str) -> bool {
    list.iter().any(|v| same_value(v, value))
}

/// Trimmed, Unicode case-insensitive equality.
pub fn same_value(a: &str, b: &str) -> bool {
    let (a, b) = (a.trim(), b.trim());
    a == b || a.to_lowercase() == b.to_lowercase()
}

// ────────────────────────────────────────────────────────────────────────────
// Record collections
// ────────────────────────────────────────────────────────────────────────────

/// Appends `draft` with a freshly generated id and returns that id.
pub fn add_entry<T: Entry>(
    list: &mut Vec<T>,
    ids: &mut IdGenerator,
    mut draft: T,
) -> Result<EntryId, EditError> {
    let id = ids.next_id()?;
    draft.set_id(id);
    list.push(draft);
    debug!("Appended entry {id} at position {}", list.len() - 1);
    Ok(id)
}

/// Replaces one field of the entry with the given id.
///
/// `field` is the wire (camelCase) field name. The value must have the field's type;
/// nothing else about it is validated.
pub fn update_field<T>(
    list: &mut [T],
    id: EntryId,
    field: &str,
    value: Value,
) -> Result<Notice, EditError>
where
    T: Entry + Serialize + DeserializeOwned,
{
    if field == "id" {
        return Err(EditError::ImmutableField(field.to_string()));
    }

    let entry = list
        .iter_mut()
        .find(|e| e.id() == id)
        .ok_or(EditError::EntryNotFound(id))?;

    let invalid = |reason: String| EditError::InvalidValue {
        field: field.to_string(),
        reason,
    };

    let mut fields = match serde_json::to_value(&*entry).map_err(|e| invalid(e.to_string()))? {
        Value::Object(map) => map,
        _ => return Err(EditError::UnknownField(field.to_string())),
    };

    if !fields.contains_key(field) {
        return Err(EditError::UnknownField(field.to_string()));
    }
    fields.insert(field.to_string(), value);

    *entry = serde_json::from_value(Value::Object(fields)).map_err(|e| invalid(e.to_string()))?;
    debug!("Updated field '{field}' of entry {id}");
    Ok(Notice::Updated)
}

/// Drops the entry with the given id, keeping the order of everything else.
pub fn remove_entry<T: Entry>(list: &mut Vec<T>, id: EntryId) -> Notice {
    let before = list.len();
    list.retain(|e| e.id() != id);
    if list.len() == before {
        Notice::NotFound
    } else {
        debug!("Removed entry {id}");
        Notice::Removed
    }
}
