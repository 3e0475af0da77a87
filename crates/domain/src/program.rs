use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    AuthContext, AuthorizationError, GenerateError, ProgramRequest, Prompt, ProposalError,
    Resolution,
};

#[allow(async_fn_in_trait)]
pub trait ProgramService {
    /// Generate a program for a client and reconcile it with the coach's exercise library.
    ///
    /// There is no regeneration. The returned warnings tell the coach what was corrected or
    /// removed, and it is up to the coach to accept or discard the result.
    async fn generate_program(
        &self,
        context: &AuthContext,
        request: &ProgramRequest,
    ) -> Result<Resolution, ProgramError>;

    /// Reconcile an already existing proposal, e.g. after it has been edited by the coach.
    async fn review_program(
        &self,
        context: &AuthContext,
        blocks: Vec<ProposedBlock>,
    ) -> Result<Resolution, ProgramError>;
}

/// The external text generation call.
#[allow(async_fn_in_trait)]
pub trait ProgramGenerator {
    async fn generate(&self, prompt: &Prompt) -> Result<String, GenerateError>;
}

#[derive(thiserror::Error, Debug)]
pub enum ProgramError {
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),
    #[error("failed to generate program: {0}")]
    Generate(#[from] GenerateError),
    #[error("failed to parse program: {0}")]
    Proposal(#[from] ProposalError),
}

/// A training block as proposed by the generator.
///
/// Only the exercise lists inside the days are ever changed by resolution. Fields not modeled
/// here are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposedBlock {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_weeks: Option<u32>,
    #[serde(default)]
    pub days: Vec<ProposedDay>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProposedBlock {
    pub fn exercises(&self) -> impl Iterator<Item = &ProposedExercise> {
        self.days.iter().flat_map(|d| d.exercises.iter())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposedDay {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_rest_day: bool,
    #[serde(default)]
    pub exercises: Vec<ProposedExercise>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposedExercise {
    /// Claimed library ID. May be hallucinated, malformed or hold an exercise name.
    #[serde(default)]
    pub exercise_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise_name: Option<String>,
    /// Sets, reps, rest, tempo, notes and anything else the generator prescribed.
    #[serde(flatten)]
    pub prescription: Map<String, Value>,
}

impl ProposedExercise {
    #[must_use]
    pub fn new(exercise_id: &str, exercise_name: Option<&str>) -> Self {
        Self {
            exercise_id: exercise_id.to_string(),
            exercise_name: exercise_name.map(str::to_string),
            prescription: Map::new(),
        }
    }

    /// The text used for name and substring matching.
    ///
    /// Generators sometimes put a name into the ID field, so the ID is used when no name is
    /// given.
    #[must_use]
    pub fn match_text(&self) -> &str {
        match self.exercise_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.exercise_id,
        }
    }
}
