use chrono::Utc;

use crate::editor::collection::EditError;
use crate::models::resume::{EntryId, ResumeData};

/// Hands out creation-time based entry ids (milliseconds since the Unix epoch).
///
/// Ids are strictly increasing: two entries created within the same millisecond
/// get `last + 1`, so they never collide inside a collection. A posted id at
/// `i64::MAX` leaves nothing above it and every further add fails.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: EntryId,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts above every id already present in `data`, so entries loaded from a
    /// prior save keep their identity.
    pub fn seeded_from(data: &ResumeData) -> Self {
        Self {
            last: data.max_entry_id(),
        }
    }

    pub fn next_id(&mut self) -> Result<EntryId, EditError> {
        let now = Utc::now().timestamp_millis();
        let id = if now > self.last {
            now
        } else {
            self.last
                .checked_add(1)
                .ok_or(EditError::IdsExhausted(self.last))?
        };
        self.last = id;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::Language;

    #[test]
    fn test_ids_are_strictly_increasing() {
        let mut ids = IdGenerator::new();
        let generated: Vec<EntryId> = (0..1000).map(|_| ids.next_id().unwrap()).collect();
        assert!(generated.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_ids_are_time_based() {
        let before = Utc::now().timestamp_millis();
        let id = IdGenerator::new().next_id().unwrap();
        assert!(id >= before);
    }

    #[test]
    fn test_seeded_generator_skips_future_ids() {
        let far_future = Utc::now().timestamp_millis() + 1_000_000;
        let data = ResumeData {
            languages: vec![Language {
                id: far_future,
                ..Default::default()
            }],
            ..Default::default()
        };
        let mut ids = IdGenerator::seeded_from(&data);
        assert_eq!(ids.next_id().unwrap(), far_future + 1);
    }

    #[test]
    fn test_max_seed_fails_instead_of_wrapping() {
        let data = ResumeData {
            languages: vec![Language {
                id: EntryId::MAX,
                ..Default::default()
            }],
            ..Default::default()
        };
        let mut ids = IdGenerator::seeded_from(&data);
        assert_eq!(ids.next_id(), Err(EditError::IdsExhausted(EntryId::MAX)));
        // the generator does not move, so later calls fail the same way
        assert_eq!(ids.next_id(), Err(EditError::IdsExhausted(EntryId::MAX)));
    }
}
