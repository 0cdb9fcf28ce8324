// Project handlers

use hyper::StatusCode;

use super::error::{ApiError, ApiResult};
use super::parse_body;
use crate::http;
use crate::model::{NewProject, Project, ValidationError};
use crate::store::Store;

/// `POST /projects`
pub async fn create(store: &Store, body: &[u8]) -> ApiResult {
    let fields = parse_body::<NewProject>(body)?.validate()?;

    let _writes = store.lock_writes().await;
    let mut projects = store.projects.load_all()?;
    let project = Project::new(store.projects.next_id(&projects)?, fields);
    projects.push(project.clone());
    store.projects.save_all(&projects)?;

    Ok(http::json_response(StatusCode::CREATED, &project))
}

/// `GET /projects`
pub fn list(store: &Store) -> ApiResult {
    let projects = store.projects.load_all()?;
    Ok(http::json_response(StatusCode::OK, &projects))
}

/// `GET /projects/{id}`
pub fn get(store: &Store, project_id: Option<u64>) -> ApiResult {
    let id = project_id.ok_or_else(ApiError::project_not_found)?;
    let project = store
        .projects
        .load_all()?
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(ApiError::project_not_found)?;

    Ok(http::json_response(StatusCode::OK, &project))
}

/// `DELETE /projects/{id}`; refused while the project still lists tasks
pub async fn delete(store: &Store, project_id: Option<u64>) -> ApiResult {
    let id = project_id.ok_or_else(ApiError::project_not_found)?;

    let _writes = store.lock_writes().await;
    let mut projects = store.projects.load_all()?;
    let index = projects
        .iter()
        .position(|p| p.id == id)
        .ok_or_else(ApiError::project_not_found)?;

    if projects[index].has_tasks() {
        return Err(ValidationError::ProjectHasTasks.into());
    }

    projects.remove(index);
    store.projects.save_all(&projects)?;

    Ok(http::message_response(
        StatusCode::OK,
        "Project successfully deleted.",
    ))
}
