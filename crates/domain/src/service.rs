use log::{debug, error, info, warn};

use crate::{
    AuthContext, CoachID, ExerciseEntry, ExerciseLibrary, ExerciseLibraryRepository,
    ExerciseLibraryService, GenerateError, ProgramError, ProgramGenerator, ProgramRequest,
    ProgramService, ProposedBlock, ReadError, Resolution, assemble_prompt, parse_proposal,
};

pub struct Service<R, G> {
    repository: R,
    generator: G,
}

impl<R, G> Service<R, G> {
    pub fn new(repository: R, generator: G) -> Self {
        Self {
            repository,
            generator,
        }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: ExerciseLibraryRepository, G> ExerciseLibraryService for Service<R, G> {
    async fn get_library(&self, coach_id: &CoachID) -> Vec<ExerciseEntry> {
        log_on_error!(
            self.repository.read_library(coach_id),
            ReadError,
            "read",
            "exercise library"
        )
        .unwrap_or_default()
    }
}

impl<R: ExerciseLibraryRepository, G: ProgramGenerator> ProgramService for Service<R, G> {
    async fn generate_program(
        &self,
        context: &AuthContext,
        request: &ProgramRequest,
    ) -> Result<Resolution, ProgramError> {
        let coach_id = context.coach_id()?;
        let library = self.get_library(&coach_id).await;

        if library.is_empty() {
            warn!("exercise library of coach {coach_id} is empty");
        }

        let prompt = assemble_prompt(request, &library);
        let response = log_on_error!(
            self.generator.generate(&prompt),
            GenerateError,
            "generate",
            "program"
        )?;
        let blocks = parse_proposal(&response).inspect_err(|err| {
            error!("failed to parse generated program: {err}");
        })?;

        Ok(summarize(ExerciseLibrary::new(library).resolve(blocks)))
    }

    async fn review_program(
        &self,
        context: &AuthContext,
        blocks: Vec<ProposedBlock>,
    ) -> Result<Resolution, ProgramError> {
        let coach_id = context.coach_id()?;
        let library = self.get_library(&coach_id).await;

        Ok(summarize(ExerciseLibrary::new(library).resolve(blocks)))
    }
}

fn summarize(resolution: Resolution) -> Resolution {
    if resolution.is_clean() {
        debug!("resolved program without corrections");
    } else {
        info!(
            "resolved program with {} corrected and {} removed exercises",
            resolution.corrected(),
            resolution.removed()
        );
    }
    resolution
}
