use std::collections::{BTreeSet, HashMap};

use derive_more::{Deref, Display};

use crate::{CoachID, Name, ReadError};

#[allow(async_fn_in_trait)]
pub trait ExerciseLibraryService {
    /// All exercises the coach may prescribe.
    ///
    /// Never fails. A library that cannot be read is reported as empty, so a generated program
    /// against it ends up with every exercise removed and explained by warnings.
    async fn get_library(&self, coach_id: &CoachID) -> Vec<ExerciseEntry>;
}

#[allow(async_fn_in_trait)]
pub trait ExerciseLibraryRepository {
    /// Exercises owned by the coach or flagged public.
    async fn read_library(&self, coach_id: &CoachID) -> Result<Vec<ExerciseEntry>, ReadError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseEntry {
    pub id: ExerciseID,
    pub name: Name,
    pub category: String,
    pub muscle_groups: BTreeSet<String>,
    pub equipment_needed: Option<String>,
    pub difficulty: Option<String>,
}

#[derive(Deref, Display, Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExerciseID(String);

impl ExerciseID {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ExerciseID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ExerciseID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Lookup tables over one snapshot of a coach's library.
///
/// Names are not unique. For duplicates the entry that comes first in library order wins, both
/// in the name index and in substring scans.
pub struct ExerciseLibrary {
    entries: Vec<ExerciseEntry>,
    by_id: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
    lowercase_names: Vec<String>,
}

impl ExerciseLibrary {
    #[must_use]
    pub fn new(entries: Vec<ExerciseEntry>) -> Self {
        let mut by_id = HashMap::with_capacity(entries.len());
        let mut by_name = HashMap::with_capacity(entries.len());
        let mut lowercase_names = Vec::with_capacity(entries.len());

        for (index, entry) in entries.iter().enumerate() {
            by_id.entry(entry.id.as_str().to_string()).or_insert(index);
            let name = entry.name.as_str().to_lowercase();
            by_name.entry(name.clone()).or_insert(index);
            lowercase_names.push(name);
        }

        Self {
            entries,
            by_id,
            by_name,
            lowercase_names,
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[ExerciseEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn by_id(&self, id: &str) -> Option<&ExerciseEntry> {
        self.by_id.get(id).map(|index| &self.entries[*index])
    }

    /// Case-insensitive exact name lookup. `name` must already be lower-cased.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&ExerciseEntry> {
        self.by_name.get(name).map(|index| &self.entries[*index])
    }

    /// First entry whose lower-cased name contains `text` or is contained in it. `text` must
    /// already be lower-cased and non-empty.
    #[must_use]
    pub fn by_partial_name(&self, text: &str) -> Option<&ExerciseEntry> {
        self.lowercase_names
            .iter()
            .position(|name| name.contains(text) || text.contains(name.as_str()))
            .map(|index| &self.entries[index])
    }
}

impl From<Vec<ExerciseEntry>> for ExerciseLibrary {
    fn from(entries: Vec<ExerciseEntry>) -> Self {
        Self::new(entries)
    }
}
