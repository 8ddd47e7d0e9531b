//! Tasks tab: status tabs, owner selector, text search and per-item
//! completion.

use roster_client::ClientError;
use roster_core::filter::{filter_tasks, TaskFilter, TaskQuery};
use roster_core::models::personnel::Personnel;
use roster_core::models::task::Task;
use roster_core::presentation::ButtonVariant;
use roster_core::types::DbId;

use crate::error::ScreenResult;
use crate::list::{ListStateMachine, LoadOutcome, StalePolicy};
use crate::navigation::Route;
use crate::screens::{ActionButton, Clients, CompleteOutcome};

pub const EMPTY_TITLE: &str = "Aucune tâche trouvée";
pub const EMPTY_HINT_FILTERED: &str = "Essayez de modifier vos filtres";
pub const EMPTY_HINT_NO_DATA: &str = "Ajoutez votre première tâche";

/// Tasks plus the personnel list feeding the owner selector.
#[derive(Debug, Clone, Default)]
pub struct TaskListData {
    pub tasks: Vec<Task>,
    pub personnel: Vec<Personnel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyState {
    pub title: &'static str,
    pub hint: &'static str,
    /// Only offered when no filter is set.
    pub create: Option<ActionButton>,
}

pub struct TaskListScreen {
    clients: Clients,
    list: ListStateMachine<TaskListData>,
    query: TaskQuery,
}

impl TaskListScreen {
    /// * `filter_param` - the `filter` navigation parameter, if any.
    pub fn new(clients: Clients, filter_param: Option<&str>) -> Self {
        Self::with_policy(clients, filter_param, StalePolicy::default())
    }

    pub fn with_policy(clients: Clients, filter_param: Option<&str>, policy: StalePolicy) -> Self {
        Self {
            clients,
            list: ListStateMachine::with_policy("tasks", policy),
            query: TaskQuery {
                status: TaskFilter::from_param(filter_param),
                ..TaskQuery::default()
            },
        }
    }

    /// Tasks first, then personnel. A failure on either discards the whole
    /// refresh, so the selector never disagrees with the task list.
    async fn fetch(clients: &Clients) -> Result<TaskListData, ClientError> {
        let tasks = clients.tasks.get_all().await?;
        let personnel = clients.personnel.get_all().await?;
        Ok(TaskListData { tasks, personnel })
    }

    pub async fn on_focus(&self) -> ScreenResult<LoadOutcome> {
        Ok(self.list.load(|| Self::fetch(&self.clients)).await?)
    }

    pub async fn refresh(&self) -> ScreenResult<LoadOutcome> {
        Ok(self.list.refresh(|| Self::fetch(&self.clients)).await?)
    }

    /// Item-level "mark completed". Tasks that are not listed or already
    /// completed are skipped without a request. A failure is logged only;
    /// on success the whole list is reloaded.
    pub async fn mark_completed(&self, id: DbId) -> ScreenResult<CompleteOutcome> {
        let pending = self
            .list
            .with_items(|d| d.tasks.iter().any(|t| t.id == Some(id) && !t.completed));
        if !pending {
            return Ok(CompleteOutcome::Skipped);
        }

        if let Err(e) = self.clients.tasks.mark_as_completed(id).await {
            tracing::error!(task_id = id, error = %e, "Failed to mark task as completed");
            return Err(e.into());
        }
        self.list
            .reload_after_mutation(|| Self::fetch(&self.clients))
            .await?;
        Ok(CompleteOutcome::Completed)
    }

    pub fn list(&self) -> &ListStateMachine<TaskListData> {
        &self.list
    }

    pub fn query(&self) -> &TaskQuery {
        &self.query
    }

    pub fn set_status(&mut self, status: TaskFilter) {
        self.query.status = status;
    }

    pub fn set_personnel(&mut self, personnel_id: Option<DbId>) {
        self.query.personnel_id = personnel_id;
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.query.text = text.into();
    }

    /// Options of the owner selector.
    pub fn personnel_options(&self) -> Vec<Personnel> {
        self.list.with_items(|d| d.personnel.clone())
    }

    pub fn visible(&self) -> Vec<Task> {
        self.list.with_items(|d| {
            filter_tasks(&d.tasks, &self.query)
                .into_iter()
                .cloned()
                .collect()
        })
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        if !self.visible().is_empty() {
            return None;
        }
        let narrowed = self.query.is_narrowing();
        Some(EmptyState {
            title: EMPTY_TITLE,
            hint: if narrowed {
                EMPTY_HINT_FILTERED
            } else {
                EMPTY_HINT_NO_DATA
            },
            create: (!narrowed).then(|| {
                ActionButton::push(
                    "Ajouter une tâche",
                    ButtonVariant::Primary,
                    Route::TaskNew { personnel_id: None },
                )
            }),
        })
    }
}
