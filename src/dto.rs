//! Transfer objects returned by the API, converted explicitly from the
//! persisted rows. No business logic lives here.

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Gender, Project, Role, Status, Task, User};

#[derive(Debug, Serialize)]
pub struct RoleDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

impl From<Role> for RoleDto {
    fn from(role: Role) -> Self {
        Self {
            id: role.id,
            name: role.name,
            description: role.description,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: Uuid,
    pub username: String,
    pub enabled: bool,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub gender: Gender,
    pub role_id: Uuid,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            enabled: user.enabled,
            first_name: user.first_name,
            last_name: user.last_name,
            phone: user.phone,
            gender: user.gender,
            role_id: user.role_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectDto {
    pub id: Uuid,
    pub project_code: String,
    pub name: String,
    pub detail: String,
    pub status: Status,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub manager_id: Uuid,
    /// Populated only by the manager detail view.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complete_task_counts: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unfinished_task_counts: Option<i64>,
}

impl From<Project> for ProjectDto {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            project_code: project.project_code,
            name: project.name,
            detail: project.detail,
            status: project.status,
            start_date: project.start_date,
            end_date: project.end_date,
            manager_id: project.manager_id,
            complete_task_counts: None,
            unfinished_task_counts: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TaskDto {
    pub id: Uuid,
    pub project_id: Uuid,
    pub assignee_id: Uuid,
    pub subject: String,
    pub detail: String,
    pub status: Status,
    pub assigned_date: NaiveDate,
}

impl From<Task> for TaskDto {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            project_id: task.project_id,
            assignee_id: task.assignee_id,
            subject: task.subject,
            detail: task.detail,
            status: task.status,
            assigned_date: task.assigned_date,
        }
    }
}
