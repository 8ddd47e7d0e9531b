//! One task with its completion, edit and delete actions.

use std::sync::Arc;

use roster_client::ClientError;
use roster_core::models::task::Task;
use roster_core::presentation::ButtonVariant;
use roster_core::types::DbId;

use crate::alert::{Alert, AlertSink, Confirmation};
use crate::error::{ScreenError, ScreenResult};
use crate::list::{ListStateMachine, LoadOutcome, StalePolicy};
use crate::navigation::{Navigation, Route};
use crate::screens::{ActionButton, ButtonAction, Clients, CompleteOutcome};

pub const MSG_LOAD_FAILED: &str = "Impossible de charger les détails de la tâche";
pub const MSG_COMPLETED: &str = "La tâche a été marquée comme terminée";
pub const MSG_COMPLETE_FAILED: &str = "Impossible de marquer la tâche comme terminée";
pub const MSG_DELETED: &str = "La tâche a été supprimée avec succès";
pub const MSG_DELETE_FAILED: &str = "Impossible de supprimer la tâche";

pub struct TaskDetailScreen {
    clients: Clients,
    alerts: Arc<dyn AlertSink>,
    id: DbId,
    list: ListStateMachine<Option<Task>>,
}

impl TaskDetailScreen {
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
            list: ListStateMachine::with_policy("task_detail", policy),
        }
    }

    async fn fetch(clients: &Clients, id: DbId) -> Result<Option<Task>, ClientError> {
        clients.tasks.get_by_id(id).await.map(Some)
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

    pub fn list(&self) -> &ListStateMachine<Option<Task>> {
        &self.list
    }

    pub fn task(&self) -> Option<Task> {
        self.list.items()
    }

    /// Buttons under the task card. Before the task is loaded only
    /// "Retour" is offered.
    pub fn actions(&self) -> Vec<ActionButton> {
        let Some(task) = self.task() else {
            return vec![ActionButton::new(
                "Retour",
                ButtonVariant::Primary,
                ButtonAction::Navigate(Navigation::Back),
            )];
        };
        let mut actions = Vec::with_capacity(3);
        if !task.completed {
            actions.push(ActionButton::new(
                "Marquer comme terminée",
                ButtonVariant::Primary,
                ButtonAction::MarkCompleted,
            ));
        }
        actions.push(ActionButton::push(
            "Modifier",
            ButtonVariant::Secondary,
            Route::TaskEdit(self.id),
        ));
        actions.push(ActionButton::new(
            "Supprimer",
            ButtonVariant::Danger,
            ButtonAction::Delete,
        ));
        actions
    }

    /// Sets the completion flag through the dedicated endpoint. The status
    /// label is left to the server.
    pub async fn mark_completed(&self) -> ScreenResult<CompleteOutcome> {
        match self.task() {
            Some(task) if !task.completed => {}
            _ => return Ok(CompleteOutcome::Skipped),
        }

        if let Err(e) = self.clients.tasks.mark_as_completed(self.id).await {
            tracing::error!(task_id = self.id, error = %e, "Failed to mark task as completed");
            self.alerts.show(Alert::error(MSG_COMPLETE_FAILED));
            return Err(e.into());
        }

        self.alerts.show(Alert::success(MSG_COMPLETED));
        let reload = self
            .list
            .reload_after_mutation(|| Self::fetch(&self.clients, self.id))
            .await;
        if reload.is_err() {
            self.alerts.show(Alert::error(MSG_LOAD_FAILED));
        }
        reload?;
        Ok(CompleteOutcome::Completed)
    }

    pub fn delete_prompt(&self) -> ScreenResult<Confirmation> {
        let task = self.task().ok_or(ScreenError::NotLoaded)?;
        Ok(Confirmation::destructive(format!(
            "Êtes-vous sûr de vouloir supprimer la tâche \"{}\" ?",
            task.title
        )))
    }

    /// Runs once the confirmation has been accepted.
    pub async fn delete(&self) -> ScreenResult<Navigation> {
        match self.clients.tasks.delete(self.id).await {
            Ok(_) => {
                self.alerts.show(Alert::success(MSG_DELETED));
                Ok(Navigation::Back)
            }
            Err(e) => {
                tracing::error!(task_id = self.id, error = %e, "Failed to delete task");
                self.alerts.show(Alert::error(MSG_DELETE_FAILED));
                Err(e.into())
            }
        }
    }
}
