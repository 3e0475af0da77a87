use std::{collections::BTreeSet, sync::RwLock};

use coachkit_domain as domain;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseRecord {
    pub entry: domain::ExerciseEntry,
    pub owner: Option<domain::CoachID>,
    pub public: bool,
}

impl ExerciseRecord {
    fn is_visible_to(&self, coach_id: &domain::CoachID) -> bool {
        self.public || self.owner.as_ref() == Some(coach_id)
    }
}

/// Exercise store kept in process memory.
#[derive(Debug, Default)]
pub struct InMemory {
    records: RwLock<Vec<ExerciseRecord>>,
}

impl InMemory {
    #[must_use]
    pub fn new(records: Vec<ExerciseRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Add an exercise. The ID is assigned here and never changes afterwards.
    pub fn create_exercise(
        &self,
        owner: Option<domain::CoachID>,
        public: bool,
        name: domain::Name,
        category: &str,
        muscle_groups: BTreeSet<String>,
    ) -> Result<domain::ExerciseEntry, domain::StorageError> {
        let entry = domain::ExerciseEntry {
            id: Uuid::new_v4().to_string().into(),
            name,
            category: category.to_string(),
            muscle_groups,
            equipment_needed: None,
            difficulty: None,
        };

        self.records
            .write()
            .map_err(|err| domain::StorageError::Other(err.to_string().into()))?
            .push(ExerciseRecord {
                entry: entry.clone(),
                owner,
                public,
            });

        Ok(entry)
    }
}

impl domain::ExerciseLibraryRepository for InMemory {
    async fn read_library(
        &self,
        coach_id: &domain::CoachID,
    ) -> Result<Vec<domain::ExerciseEntry>, domain::ReadError> {
        let records = self
            .records
            .read()
            .map_err(|err| domain::StorageError::Other(err.to_string().into()))?;

        let mut library = records
            .iter()
            .filter(|r| r.is_visible_to(coach_id))
            .map(|r| r.entry.clone())
            .collect::<Vec<_>>();
        library.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(library)
    }
}
