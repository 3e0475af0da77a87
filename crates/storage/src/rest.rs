//! REST
//!
//! Reads the exercise library from a PostgREST-style API of the hosted backend. The backend is
//! the authoritative source, nothing is cached.

use std::collections::BTreeSet;

use coachkit_domain as domain;
use log::warn;
use reqwest::{
    Method, Request, Response,
    header::{AUTHORIZATION, HeaderValue},
};
use serde::{Deserialize, Serialize};

use crate::Config;

const SELECT: &str = "id,name,category,muscle_groups,equipment_needed,difficulty";

#[allow(async_fn_in_trait)]
pub trait SendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, domain::StorageError>;
}

#[derive(Clone, Default)]
pub struct ReqwestSendRequest {
    client: reqwest::Client,
}

impl SendRequest for ReqwestSendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, domain::StorageError> {
        self.client.execute(request).await.map_err(|err| {
            if err.is_connect() || err.is_timeout() {
                domain::StorageError::NoConnection
            } else {
                domain::StorageError::Other(Box::new(err))
            }
        })
    }
}

#[derive(Clone)]
pub struct REST<S: SendRequest> {
    pub sender: S,
    pub config: Config,
}

impl REST<ReqwestSendRequest> {
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        Self {
            sender: ReqwestSendRequest::default(),
            config,
        }
    }
}

impl<S: SendRequest> REST<S> {
    fn library_request(&self, coach_id: &domain::CoachID) -> Result<Request, domain::ReadError> {
        let mut url = self
            .config
            .url
            .join(&format!("rest/v1/{}", self.config.table))
            .map_err(|err| domain::ReadError::Other(Box::new(err)))?;
        url.query_pairs_mut()
            .append_pair("select", SELECT)
            .append_pair(
                "or",
                &format!("(coach_id.eq.{},is_public.eq.true)", quote(coach_id)),
            )
            .append_pair("order", "name.asc");

        let mut request = Request::new(Method::GET, url);
        let headers = request.headers_mut();
        headers.insert(
            "apikey",
            HeaderValue::from_str(&self.config.api_key)
                .map_err(|err| domain::ReadError::Other(Box::new(err)))?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.config.api_key))
                .map_err(|err| domain::ReadError::Other(Box::new(err)))?,
        );

        Ok(request)
    }
}

impl<S: SendRequest> domain::ExerciseLibraryRepository for REST<S> {
    async fn read_library(
        &self,
        coach_id: &domain::CoachID,
    ) -> Result<Vec<domain::ExerciseEntry>, domain::ReadError> {
        let response = self
            .sender
            .send_request(self.library_request(coach_id)?)
            .await?;

        if !response.status().is_success() {
            return Err(domain::StorageError::Status(response.status().as_u16()).into());
        }

        let exercises = response
            .json::<Vec<Exercise>>()
            .await
            .map_err(|err| domain::ReadError::Other(Box::new(err)))?;

        Ok(exercises
            .into_iter()
            .filter_map(|exercise| {
                let id = exercise.id.clone();
                domain::ExerciseEntry::try_from(exercise)
                    .inspect_err(|err| warn!("skipping exercise {id}: {err}"))
                    .ok()
            })
            .collect())
    }
}

/// Quote a value for use inside a PostgREST logical filter.
fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub muscle_groups: Option<Vec<String>>,
    #[serde(default)]
    pub equipment_needed: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
}

impl TryFrom<Exercise> for domain::ExerciseEntry {
    type Error = domain::NameError;

    fn try_from(value: Exercise) -> Result<Self, Self::Error> {
        Ok(domain::ExerciseEntry {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            category: value.category.unwrap_or_default(),
            muscle_groups: value
                .muscle_groups
                .unwrap_or_default()
                .into_iter()
                .collect::<BTreeSet<_>>(),
            equipment_needed: value.equipment_needed,
            difficulty: value.difficulty,
        })
    }
}

impl From<domain::ExerciseEntry> for Exercise {
    fn from(value: domain::ExerciseEntry) -> Self {
        Exercise {
            id: value.id.to_string(),
            name: value.name.to_string(),
            category: Some(value.category),
            muscle_groups: Some(value.muscle_groups.into_iter().collect()),
            equipment_needed: value.equipment_needed,
            difficulty: value.difficulty,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use coachkit_domain::ExerciseLibraryRepository;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use crate::tests::data::{COACH, CONFIG, EXERCISES};

    use super::*;

    #[tokio::test]
    async fn test_read_library() {
        let rest = rest_with_response(Some(response(
            200,
            &serde_json::to_string(
                &EXERCISES
                    .iter()
                    .cloned()
                    .map(Exercise::from)
                    .collect::<Vec<_>>(),
            )
            .unwrap(),
        )));

        assert_eq!(rest.read_library(&COACH).await.unwrap(), *EXERCISES);

        let request = rest.sender.request.borrow_mut().take().unwrap();
        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.url().path(), "/rest/v1/exercises");
        assert_eq!(
            request.url().query_pairs().into_owned().collect::<Vec<_>>(),
            vec![
                ("select".to_string(), SELECT.to_string()),
                (
                    "or".to_string(),
                    "(coach_id.eq.\"coach-1\",is_public.eq.true)".to_string()
                ),
                ("order".to_string(), "name.asc".to_string()),
            ]
        );
        assert_eq!(request.headers()["apikey"], "secret");
        assert_eq!(request.headers()[AUTHORIZATION], "Bearer secret");
    }

    #[tokio::test]
    async fn test_read_library_skips_invalid_rows() {
        let rest = rest_with_response(Some(response(
            200,
            &json!([
                { "id": "e1", "name": "Bench Press", "category": "strength",
                  "muscle_groups": ["chest"], "equipment_needed": null, "difficulty": null },
                { "id": "e2", "name": "  " },
                { "id": "e3", "name": "Plank" }
            ])
            .to_string(),
        )));

        let library = rest.read_library(&COACH).await.unwrap();

        assert_eq!(
            library
                .iter()
                .map(|e| (e.id.as_str(), e.name.as_str(), e.category.as_str()))
                .collect::<Vec<_>>(),
            vec![("e1", "Bench Press", "strength"), ("e3", "Plank", "")]
        );
        assert!(library[1].muscle_groups.is_empty());
    }

    #[tokio::test]
    async fn test_read_library_keeps_long_names() {
        let name = format!("Single-Leg Romanian Deadlift {}", "with Pause ".repeat(12));
        let rest = rest_with_response(Some(response(
            200,
            &json!([{ "id": "e9", "name": name }]).to_string(),
        )));

        let library = rest.read_library(&COACH).await.unwrap();

        assert!(name.len() > 128);
        assert_eq!(
            library
                .iter()
                .map(|e| (e.id.as_str(), e.name.as_str()))
                .collect::<Vec<_>>(),
            vec![("e9", name.trim())]
        );
    }

    #[tokio::test]
    async fn test_read_library_no_connection() {
        assert!(matches!(
            rest_with_response(None).read_library(&COACH).await,
            Err(domain::ReadError::Storage(domain::StorageError::NoConnection))
        ));
    }

    #[rstest]
    #[case(401)]
    #[case(500)]
    #[tokio::test]
    async fn test_read_library_unexpected_status(#[case] status: u16) {
        assert!(matches!(
            rest_with_response(Some(response(status, "{}")))
                .read_library(&COACH)
                .await,
            Err(domain::ReadError::Storage(domain::StorageError::Status(s))) if s == status
        ));
    }

    #[tokio::test]
    async fn test_read_library_invalid_body() {
        assert!(matches!(
            rest_with_response(Some(response(200, "{\"message\": \"oops\"}")))
                .read_library(&COACH)
                .await,
            Err(domain::ReadError::Other(_))
        ));
    }

    #[rstest]
    #[case("coach-1", "\"coach-1\"")]
    #[case("a,b)", "\"a,b)\"")]
    #[case("say \"hi\"", "\"say \\\"hi\\\"\"")]
    #[case("back\\slash", "\"back\\\\slash\"")]
    fn test_quote(#[case] value: &str, #[case] expected: &str) {
        assert_eq!(quote(value), expected);
    }

    fn response(status: u16, body: &str) -> Response {
        Response::from(
            http::Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(body.to_string())
                .unwrap(),
        )
    }

    fn rest_with_response(response: Option<Response>) -> REST<MockSendRequest> {
        REST {
            sender: MockSendRequest {
                request: RefCell::new(None),
                response: RefCell::new(response),
            },
            config: CONFIG.clone(),
        }
    }

    struct MockSendRequest {
        request: RefCell<Option<Request>>,
        response: RefCell<Option<Response>>,
    }

    impl SendRequest for MockSendRequest {
        async fn send_request(&self, request: Request) -> Result<Response, domain::StorageError> {
            *self.request.borrow_mut() = Some(request);
            (*self.response.borrow_mut())
                .take()
                .ok_or(domain::StorageError::NoConnection)
        }
    }
}
