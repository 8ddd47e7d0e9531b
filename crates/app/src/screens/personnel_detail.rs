//! One member of staff with their tasks.

use std::sync::Arc;

use roster_client::ClientError;
use roster_core::filter::TaskFilter;
use roster_core::models::personnel::Personnel;
use roster_core::models::task::Task;
use roster_core::types::DbId;

use crate::alert::{Alert, AlertSink, Confirmation};
use crate::error::{ScreenError, ScreenResult};
use crate::list::{ListStateMachine, LoadOutcome, StalePolicy};
use crate::navigation::{Navigation, Route};
use crate::screens::Clients;

pub const MSG_LOAD_FAILED: &str = "Impossible de charger les détails du personnel";
pub const MSG_DELETED: &str = "Le membre du personnel a été supprimé avec succès";
pub const MSG_DELETE_FAILED: &str = "Impossible de supprimer le membre du personnel";
pub const JOB_TITLE_UNSET: &str = "Poste non spécifié";

#[derive(Debug, Clone, Default)]
pub struct PersonnelDetailData {
    /// `None` until loaded, or when the record does not exist.
    pub personnel: Option<Personnel>,
    pub tasks: Vec<Task>,
}

pub struct PersonnelDetailScreen {
    clients: Clients,
    alerts: Arc<dyn AlertSink>,
    id: DbId,
    list: ListStateMachine<PersonnelDetailData>,
    filter: TaskFilter,
}

impl PersonnelDetailScreen {
    pub fn new(clients: Clients, alerts: Arc<dyn AlertSink>, id: DbId) -> Self {
        Self::with_policy(clients, alerts, id, StalePolicy::default())
    }

    pub fn with_policy(
        clients: Clients,
        alerts: Arc<dyn AlertSink>,
        id: DbId,
        policy: StalePolicy,
    ) -> Self {
        Self {
            clients,
            alerts,
            id,
            list: ListStateMachine::with_policy("personnel_detail", policy),
            filter: TaskFilter::All,
        }
    }

    /// The record with its embedded tasks, then the task list on its own
    /// for the fuller task representation.
    async fn fetch(clients: &Clients, id: DbId) -> Result<PersonnelDetailData, ClientError> {
        let personnel = clients.personnel.get_with_tasks(id).await?;
        let tasks = clients.tasks.get_by_personnel(id).await?;
        Ok(PersonnelDetailData {
            personnel: Some(personnel),
            tasks,
        })
    }

    pub async fn on_focus(&self) -> ScreenResult<LoadOutcome> {
        let result = self.list.load(|| Self::fetch(&self.clients, self.id)).await;
        if result.is_err() {
            self.alerts.show(Alert::error(MSG_LOAD_FAILED));
        }
        Ok(result?)
    }

    pub fn id(&self) -> DbId {
        self.id
    }

    pub fn list(&self) -> &ListStateMachine<PersonnelDetailData> {
        &self.list
    }

    pub fn personnel(&self) -> Option<Personnel> {
        self.list.with_items(|d| d.personnel.clone())
    }

    pub fn job_title(&self) -> String {
        self.personnel()
            .and_then(|p| p.job_title)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| JOB_TITLE_UNSET.to_string())
    }

    pub fn filter(&self) -> TaskFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: TaskFilter) {
        self.filter = filter;
    }

    pub fn visible_tasks(&self) -> Vec<Task> {
        self.list.with_items(|d| {
            d.tasks
                .iter()
                .filter(|t| self.filter.accepts(t))
                .cloned()
                .collect()
        })
    }

    /// "Add a task" preassigned to this member of staff.
    pub fn new_task_route(&self) -> Route {
        Route::TaskNew {
            personnel_id: Some(self.id),
        }
    }

    pub fn delete_prompt(&self) -> ScreenResult<Confirmation> {
        let personnel = self.personnel().ok_or(ScreenError::NotLoaded)?;
        Ok(Confirmation::destructive(format!(
            "Êtes-vous sûr de vouloir supprimer {} ?",
            personnel.full_name()
        )))
    }

    /// Delete the record (its tasks are the server's business) and go back.
    pub async fn delete(&self) -> ScreenResult<Navigation> {
        match self.clients.personnel.delete(self.id).await {
            Ok(_) => {
                self.alerts.show(Alert::success(MSG_DELETED));
                Ok(Navigation::Back)
            }
            Err(e) => {
                tracing::error!(personnel_id = self.id, error = %e, "Failed to delete personnel");
                self.alerts.show(Alert::error(MSG_DELETE_FAILED));
                Err(e.into())
            }
        }
    }
}
