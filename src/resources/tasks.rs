//! Deferred-task resources.
//!
//! Long-running operations answer `202 Accepted` with an `X-Task-Id` header;
//! the transport resolves those transparently, but tasks can also be
//! inspected and managed directly through this handle.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::query_path;
use crate::client::Core;
use crate::error::Result;
use crate::pagination::{self, ListOutcome, QueryInfo, ResultInfo};

/// Lifecycle state reported for a deferred task.
///
/// The wire value is an open string enum; anything unrecognized maps to
/// [`Other`](Self::Other) and is treated as non-terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    InProcess,
    Complete,
    Error,
    Other(String),
}

impl From<&str> for TaskStatus {
    fn from(code: &str) -> Self {
        match code {
            "PENDING" => Self::Pending,
            "IN_PROCESS" => Self::InProcess,
            "COMPLETE" => Self::Complete,
            "ERROR" => Self::Error,
            other => Self::Other(other.to_owned()),
        }
    }
}

/// A deferred task as reported by the service. Read-only on the client side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Task {
    pub task_id: String,
    pub task_status_code: String,
    pub message: String,
    pub result_uri: String,
}

impl Task {
    /// The parsed form of `task_status_code`.
    pub fn status(&self) -> TaskStatus {
        TaskStatus::from(self.task_status_code.as_str())
    }
}

pub(crate) fn task_path(task_id: &str) -> String {
    format!("tasks/{}", urlencoding::encode(task_id))
}

pub(crate) fn task_result_path(task_id: &str) -> String {
    format!("tasks/{}/result", urlencoding::encode(task_id))
}

/// One page of a task index response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskPage {
    pub tasks: Vec<Task>,
    pub query_info: QueryInfo,
    pub result_info: ResultInfo,
}

/// Access to the tasks API.
pub struct Tasks {
    pub(crate) core: Arc<Core>,
}

impl Tasks {
    /// Current status of one task.
    pub async fn status(&self, task_id: &str) -> Result<Task> {
        self.core.transport.get_json(&task_path(task_id)).await
    }

    /// Raw result body of a task, addressed by id.
    pub async fn result_by_id(&self, task_id: &str) -> Result<Vec<u8>> {
        self.core.transport.get_bytes(&task_result_path(task_id)).await
    }

    /// Raw result body of a task, addressed by a result path as reported by
    /// the service (relative, no leading slash).
    pub async fn result_by_uri(&self, uri: &str) -> Result<Vec<u8>> {
        self.core.transport.get_bytes(uri).await
    }

    /// Raw result body for a task, preferring its reported `resultUri`.
    pub async fn result_for(&self, task: &Task) -> Result<Vec<u8>> {
        if task.result_uri.is_empty() {
            self.result_by_id(&task.task_id).await
        } else {
            self.result_by_uri(&task.result_uri).await
        }
    }

    /// All tasks matching `query` (empty for everything), walking all pages.
    pub async fn select_all(&self, query: &str) -> ListOutcome<Task> {
        pagination::select_all(&self.core.list_retry, |offset| self.page(query, offset)).await
    }

    /// One page of the task index.
    pub async fn select_page(&self, query: &str, offset: u64) -> Result<TaskPage> {
        self.core
            .transport
            .get_json(&query_path("tasks", query, offset))
            .await
    }

    async fn page(&self, query: &str, offset: u64) -> Result<(Vec<Task>, ResultInfo)> {
        let page = self.select_page(query, offset).await?;
        Ok((page.tasks, page.result_info))
    }

    /// Delete a finished task record.
    pub async fn delete(&self, task_id: &str) -> Result<()> {
        self.core.transport.delete(&task_path(task_id)).await
    }
}
