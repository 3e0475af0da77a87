use std::fmt;

use crate::{ExerciseEntry, ExerciseLibrary, ProposedBlock, ProposedExercise};

/// Outcome of reconciling a proposed program with an exercise library.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub blocks: Vec<ProposedBlock>,
    pub warnings: Vec<Warning>,
}

impl Resolution {
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }

    #[must_use]
    pub fn corrected(&self) -> usize {
        self.warnings.iter().filter(|w| !w.is_removal()).count()
    }

    #[must_use]
    pub fn removed(&self) -> usize {
        self.warnings.iter().filter(|w| w.is_removal()).count()
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// One correction or removal, meant to be read by the coach reviewing the proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    NameMatch { text: String },
    PartialMatch { text: String, matched: String },
    NotFound { text: String },
}

impl Warning {
    #[must_use]
    pub fn is_removal(&self) -> bool {
        matches!(self, Warning::NotFound { .. })
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Warning::NameMatch { text } => {
                write!(f, "Exercise \"{text}\" had an invalid ID, corrected via name match.")
            }
            Warning::PartialMatch { text, matched } => write!(
                f,
                "Exercise \"{text}\" had an invalid ID, corrected via partial match: \"{matched}\"."
            ),
            Warning::NotFound { text } => write!(
                f,
                "Exercise \"{text}\" not found in the library — removed from program."
            ),
        }
    }
}

/// Rewrite every exercise reference so it points to a library entry, or drop it.
///
/// Days and blocks are kept even if their exercise list ends up empty.
#[must_use]
pub fn resolve_program(library: &[ExerciseEntry], blocks: Vec<ProposedBlock>) -> Resolution {
    ExerciseLibrary::new(library.to_vec()).resolve(blocks)
}

impl ExerciseLibrary {
    #[must_use]
    pub fn resolve(&self, mut blocks: Vec<ProposedBlock>) -> Resolution {
        let mut warnings = vec![];

        for day in blocks.iter_mut().flat_map(|b| b.days.iter_mut()) {
            let exercises = std::mem::take(&mut day.exercises);
            day.exercises = exercises
                .into_iter()
                .filter_map(|exercise| self.resolve_exercise(exercise, &mut warnings))
                .collect();
        }

        Resolution { blocks, warnings }
    }

    fn resolve_exercise(
        &self,
        mut exercise: ProposedExercise,
        warnings: &mut Vec<Warning>,
    ) -> Option<ProposedExercise> {
        if let Some(entry) = self.by_id(&exercise.exercise_id) {
            exercise.exercise_name = Some(entry.name.to_string());
            return Some(exercise);
        }

        let text = exercise.match_text().trim().to_string();
        let lowercase_text = text.to_lowercase();

        if lowercase_text.is_empty() {
            warnings.push(Warning::NotFound { text });
            return None;
        }

        if let Some(entry) = self.by_name(&lowercase_text) {
            assign(&mut exercise, entry);
            warnings.push(Warning::NameMatch { text });
            return Some(exercise);
        }

        if let Some(entry) = self.by_partial_name(&lowercase_text) {
            assign(&mut exercise, entry);
            warnings.push(Warning::PartialMatch {
                text,
                matched: entry.name.to_string(),
            });
            return Some(exercise);
        }

        warnings.push(Warning::NotFound { text });
        None
    }
}

fn assign(exercise: &mut ProposedExercise, entry: &ExerciseEntry) {
    exercise.exercise_id = entry.id.to_string();
    exercise.exercise_name = Some(entry.name.to_string());
}
