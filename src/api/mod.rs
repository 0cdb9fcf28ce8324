// API module entry
// Route table for the project/task REST surface

mod error;
mod projects;
mod tasks;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response};
use serde::de::DeserializeOwned;

use crate::config::AppState;
use crate::http;

pub use error::ApiError;

/// Resolved API path. Ids that do not parse as unsigned integers are `None`
/// and end up as "not found" in the handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Health,
    Projects,
    Project(Option<u64>),
    ProjectTasks(Option<u64>),
    ProjectTask(Option<u64>, Option<u64>),
}

impl Route {
    fn parse(path: &str, health_path: &str) -> Option<Self> {
        if !health_path.is_empty() && path == health_path {
            return Some(Self::Health);
        }

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            ["projects"] => Some(Self::Projects),
            ["projects", project] => Some(Self::Project(parse_id(project))),
            ["projects", project, "tasks"] => Some(Self::ProjectTasks(parse_id(project))),
            ["projects", project, "tasks", task] => {
                Some(Self::ProjectTask(parse_id(project), parse_id(task)))
            }
            _ => None,
        }
    }

    /// Value of the `Allow` header for this route
    const fn allow(self) -> &'static str {
        match self {
            Self::Health => "GET, OPTIONS",
            Self::Projects | Self::ProjectTasks(_) => "GET, POST, OPTIONS",
            Self::Project(_) => "GET, DELETE, OPTIONS",
            Self::ProjectTask(..) => "PUT, DELETE, OPTIONS",
        }
    }
}

fn parse_id(segment: &str) -> Option<u64> {
    segment.parse::<u64>().ok()
}

/// Decode a JSON request body; an empty body reads as `{}`
fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_slice(b"{}")?);
    }
    Ok(serde_json::from_slice(body)?)
}

/// Dispatch an already-read request to its handler
pub async fn dispatch(
    method: &Method,
    path: &str,
    body: &[u8],
    state: &AppState,
) -> Response<Full<Bytes>> {
    let Some(route) = Route::parse(path, &state.config.http.health_path) else {
        return http::build_404_response();
    };

    let store = &state.store;
    let result = match (method, route) {
        (&Method::GET, Route::Health) => Ok(http::build_health_response()),
        (&Method::GET, Route::Projects) => projects::list(store),
        (&Method::POST, Route::Projects) => projects::create(store, body).await,
        (&Method::GET, Route::Project(id)) => projects::get(store, id),
        (&Method::DELETE, Route::Project(id)) => projects::delete(store, id).await,
        (&Method::GET, Route::ProjectTasks(id)) => tasks::list(store, id),
        (&Method::POST, Route::ProjectTasks(id)) => tasks::create(store, id, body).await,
        (&Method::PUT, Route::ProjectTask(project, task)) => {
            tasks::update(store, project, task, body).await
        }
        (&Method::DELETE, Route::ProjectTask(project, task)) => {
            tasks::delete(store, project, task).await
        }
        (_, route) => Ok(http::build_405_response(route.allow())),
    };

    result.unwrap_or_else(ApiError::into_response)
}
