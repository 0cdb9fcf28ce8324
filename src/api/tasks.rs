// Task handlers
//
// Tasks live in their own collection; the owning project keeps a list of
// task ids. Both sides are written here, tasks first.

use hyper::StatusCode;

use super::error::{ApiError, ApiResult};
use super::parse_body;
use crate::http;
use crate::logger;
use crate::model::{NewTask, Task, TaskPatch};
use crate::store::Store;

/// `POST /projects/{id}/tasks`
pub async fn create(store: &Store, project_id: Option<u64>, body: &[u8]) -> ApiResult {
    let fields = parse_body::<NewTask>(body)?.validate(project_id)?;

    let _writes = store.lock_writes().await;
    let mut projects = store.projects.load_all()?;
    let project_index = projects
        .iter()
        .position(|p| p.id == fields.pj_id)
        .ok_or_else(ApiError::project_not_found)?;

    let mut tasks = store.tasks.load_all()?;
    let task = Task::new(store.tasks.next_id(&tasks)?, fields);
    tasks.push(task.clone());
    store.tasks.save_all(&tasks)?;

    projects[project_index].tasks.push(task.id);
    if let Err(err) = store.projects.save_all(&projects) {
        // Undo the task write so no task exists without its project link
        tasks.pop();
        if let Err(rollback) = store.tasks.save_all(&tasks) {
            logger::log_error(&format!(
                "Task {} persisted without project link: {rollback}",
                task.id
            ));
        }
        return Err(err.into());
    }

    Ok(http::json_response(StatusCode::CREATED, &task))
}

/// `GET /projects/{id}/tasks`; unknown projects simply have no tasks
pub fn list(store: &Store, project_id: Option<u64>) -> ApiResult {
    let tasks: Vec<Task> = match project_id {
        Some(id) => store
            .tasks
            .load_all()?
            .into_iter()
            .filter(|t| t.pj_id == id)
            .collect(),
        None => Vec::new(),
    };
    Ok(http::json_response(StatusCode::OK, &tasks))
}

/// `PUT /projects/{id}/tasks/{task_id}`
pub async fn update(
    store: &Store,
    project_id: Option<u64>,
    task_id: Option<u64>,
    body: &[u8],
) -> ApiResult {
    let patch = parse_body::<TaskPatch>(body)?;
    let (Some(project_id), Some(task_id)) = (project_id, task_id) else {
        return Err(ApiError::task_not_found());
    };

    let _writes = store.lock_writes().await;
    let mut tasks = store.tasks.load_all()?;
    let task = tasks
        .iter_mut()
        .find(|t| t.matches(project_id, task_id))
        .ok_or_else(ApiError::task_not_found)?;

    patch.apply(task)?;
    let updated = task.clone();
    store.tasks.save_all(&tasks)?;

    Ok(http::json_response(StatusCode::OK, &updated))
}

/// `DELETE /projects/{id}/tasks/{task_id}`; also drops the id from the project's list
pub async fn delete(store: &Store, project_id: Option<u64>, task_id: Option<u64>) -> ApiResult {
    let (Some(project_id), Some(task_id)) = (project_id, task_id) else {
        return Err(ApiError::task_not_found());
    };

    let _writes = store.lock_writes().await;
    let mut tasks = store.tasks.load_all()?;
    let index = tasks
        .iter()
        .position(|t| t.matches(project_id, task_id))
        .ok_or_else(ApiError::task_not_found)?;

    let mut projects = store.projects.load_all()?;
    let removed = tasks.remove(index);
    store.tasks.save_all(&tasks)?;

    if let Some(project) = projects.iter_mut().find(|p| p.id == project_id) {
        let before = project.tasks.len();
        project.tasks.retain(|&id| id != task_id);
        if project.tasks.len() != before {
            if let Err(err) = store.projects.save_all(&projects) {
                // Put the task back so the project's list still resolves
                tasks.insert(index, removed);
                if let Err(rollback) = store.tasks.save_all(&tasks) {
                    logger::log_error(&format!(
                        "Task {task_id} removed but still listed by project {project_id}: {rollback}"
                    ));
                }
                return Err(err.into());
            }
        }
    }

    Ok(http::message_response(
        StatusCode::OK,
        "Task successfully deleted.",
    ))
}
