#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod error;
mod exercise;
mod name;
mod program;
mod prompt;
mod proposal;
mod resolution;
mod service;
mod user;

pub use error::{GenerateError, ReadError, StorageError};
pub use exercise::{
    ExerciseEntry, ExerciseID, ExerciseLibrary, ExerciseLibraryRepository, ExerciseLibraryService,
};
pub use name::{Name, NameError};
pub use program::{
    ProgramError, ProgramGenerator, ProgramService, ProposedBlock, ProposedDay, ProposedExercise,
};
pub use prompt::{ClientContext, ProgramRequest, Prompt, assemble_prompt};
pub use proposal::{ProposalError, parse_proposal};
pub use resolution::{Resolution, Warning, resolve_program};
pub use service::Service;
pub use user::{AuthContext, AuthorizationError, CoachID, Role, UserID};
