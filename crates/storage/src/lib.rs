#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod config;
pub mod memory;
pub mod rest;

pub use config::{BACKEND_KEY, BACKEND_URL, Config, ConfigError, EXERCISE_TABLE};
pub use memory::{ExerciseRecord, InMemory};
pub use rest::{REST, ReqwestSendRequest, SendRequest};

#[cfg(test)]
mod tests {
    pub mod data;
}
