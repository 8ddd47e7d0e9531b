//! Create and edit form for a task, with its owner selector.

use std::sync::Arc;

use chrono::SecondsFormat;
use roster_core::models::personnel::Personnel;
use roster_core::models::task::{Priority, Task, TaskStatus};
use roster_core::presentation::{format_date_fr, DateStyle};
use roster_core::types::{DbId, Timestamp};
use roster_core::validation::{FieldErrors, TaskField, TaskForm};

use crate::alert::{Alert, AlertSink};
use crate::error::ScreenResult;
use crate::navigation::Navigation;
use crate::screens::{Clients, FormMode, SubmitOutcome};

pub const MSG_LOAD_FAILED: &str = "Impossible de charger les données de la tâche";
pub const MSG_PERSONNEL_LOAD_FAILED: &str = "Impossible de charger la liste du personnel";
pub const MSG_CREATED: &str = "La tâche a été créée avec succès";
pub const MSG_UPDATED: &str = "La tâche a été mise à jour avec succès";
pub const MSG_SAVE_FAILED: &str = "Une erreur est survenue lors de l'enregistrement";

/// One entry of a select field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption<V> {
    pub label: String,
    pub value: V,
}

pub struct TaskFormScreen {
    clients: Clients,
    alerts: Arc<dyn AlertSink>,
    mode: FormMode,
    form: TaskForm,
    errors: FieldErrors<TaskField>,
    personnel: Vec<Personnel>,
}

impl TaskFormScreen {
    /// * `personnel_id` - owner preassigned by the launching screen.
    pub fn create(clients: Clients, alerts: Arc<dyn AlertSink>, personnel_id: Option<DbId>) -> Self {
        Self {
            clients,
            alerts,
            mode: FormMode::Create,
            form: TaskForm::for_personnel(personnel_id),
            errors: FieldErrors::new(),
            personnel: Vec::new(),
        }
    }

    pub fn edit(clients: Clients, alerts: Arc<dyn AlertSink>, id: DbId) -> Self {
        Self {
            mode: FormMode::Edit(id),
            ..Self::create(clients, alerts, None)
        }
    }

    /// Fill the owner selector. A failure alerts and leaves it empty.
    pub async fn load_personnel(&mut self) -> ScreenResult<()> {
        match self.clients.personnel.get_all().await {
            Ok(personnel) => {
                self.personnel = personnel;
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load personnel for task form");
                self.alerts.show(Alert::error(MSG_PERSONNEL_LOAD_FAILED));
                Err(e.into())
            }
        }
    }

    /// Prefill from the stored task; alert and go back when it cannot be
    /// loaded.
    pub async fn load_for_edit(&mut self) -> ScreenResult<Navigation> {
        let FormMode::Edit(id) = self.mode else {
            return Ok(Navigation::Stay);
        };
        match self.clients.tasks.get_by_id(id).await {
            Ok(task) => {
                self.form = TaskForm::from_task(&task);
                Ok(Navigation::Stay)
            }
            Err(e) => {
                tracing::error!(task_id = id, error = %e, "Failed to load task for edit");
                self.alerts.show(Alert::error(MSG_LOAD_FAILED));
                Ok(Navigation::Back)
            }
        }
    }

    /// Mount handler: the record (when editing), then the owner selector.
    pub async fn on_mount(&mut self) -> ScreenResult<Navigation> {
        let navigation = self.load_for_edit().await?;
        if navigation == Navigation::Back {
            return Ok(navigation);
        }
        // A failed selector load has already alerted; the form stays usable.
        let _ = self.load_personnel().await;
        Ok(navigation)
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn form(&self) -> &TaskForm {
        &self.form
    }

    pub fn errors(&self) -> &FieldErrors<TaskField> {
        &self.errors
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.form.title = title.into();
        self.errors.clear(TaskField::Title);
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.form.description = description.into();
        self.errors.clear(TaskField::Description);
    }

    /// Date picker result, stored as an ISO-8601 UTC string.
    pub fn set_due_date(&mut self, due: Timestamp) {
        self.form.due_date = due.to_rfc3339_opts(SecondsFormat::Millis, true);
        self.errors.clear(TaskField::DueDate);
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.form.priority = priority;
        self.errors.clear(TaskField::Priority);
    }

    pub fn set_status(&mut self, status: TaskStatus) {
        self.form.status = status;
        self.errors.clear(TaskField::Status);
    }

    pub fn set_completed(&mut self, completed: bool) {
        self.form.completed = completed;
        self.errors.clear(TaskField::Completed);
    }

    pub fn set_personnel(&mut self, personnel_id: DbId) {
        self.form.personnel_id = personnel_id;
        self.errors.clear(TaskField::PersonnelId);
    }

    /// Due date as shown in the field, empty when unset.
    pub fn due_date_label(&self) -> String {
        format_date_fr(Some(self.form.due_date.as_str()), DateStyle::Long).unwrap_or_default()
    }

    pub fn personnel_options(&self) -> Vec<SelectOption<DbId>> {
        self.personnel
            .iter()
            .filter_map(|p| {
                Some(SelectOption {
                    label: p.full_name(),
                    value: p.id?,
                })
            })
            .collect()
    }

    pub fn priority_options() -> Vec<SelectOption<Priority>> {
        Priority::ALL
            .iter()
            .map(|&p| SelectOption {
                label: p.label().to_string(),
                value: p,
            })
            .collect()
    }

    pub fn status_options() -> Vec<SelectOption<TaskStatus>> {
        TaskStatus::ALL
            .iter()
            .map(|&s| SelectOption {
                label: s.label().to_string(),
                value: s,
            })
            .collect()
    }

    pub async fn submit(&mut self) -> SubmitOutcome<Task> {
        if let Err(errors) = self.form.validate() {
            tracing::debug!(errors = errors.len(), "Task form rejected");
            self.errors = errors;
            return SubmitOutcome::Rejected;
        }

        let draft = self.form.to_draft();
        let (result, message) = match self.mode {
            FormMode::Create => (self.clients.tasks.create(&draft).await, MSG_CREATED),
            FormMode::Edit(id) => (self.clients.tasks.update(id, &draft).await, MSG_UPDATED),
        };

        match result {
            Ok(saved) => {
                self.alerts.show(Alert::success(message));
                SubmitOutcome::Saved(saved)
            }
            Err(e) => {
                tracing::error!(mode = ?self.mode, error = %e, "Failed to save task");
                self.alerts.show(Alert::error(MSG_SAVE_FAILED));
                SubmitOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::TimeZone;
    use roster_client::memory::InMemoryTransport;
    use roster_core::validation::MSG_PERSONNEL_REQUIRED;

    use crate::alert::RecordingAlerts;

    fn clients() -> Clients {
        Clients::new(Arc::new(InMemoryTransport::seeded()))
    }

    #[test]
    fn defaults_and_preassigned_owner() {
        let screen = TaskFormScreen::create(clients(), Arc::new(RecordingAlerts::new()), Some(3));
        assert_eq!(screen.form().priority, Priority::Medium);
        assert_eq!(screen.form().status, TaskStatus::Todo);
        assert!(!screen.form().completed);
        assert_eq!(screen.form().personnel_id, 3);
    }

    #[test]
    fn due_date_is_stored_as_iso() {
        let mut screen = TaskFormScreen::create(clients(), Arc::new(RecordingAlerts::new()), None);
        screen.set_due_date(chrono::Utc.with_ymd_and_hms(2023, 6, 12, 0, 0, 0).unwrap());

        assert_eq!(screen.form().due_date, "2023-06-12T00:00:00.000Z");
        assert_eq!(screen.due_date_label(), "12 juin 2023");
    }

    #[tokio::test]
    async fn missing_owner_is_rejected_locally() {
        let mut screen = TaskFormScreen::create(clients(), Arc::new(RecordingAlerts::new()), None);
        screen.set_title("Relire la charte");

        assert_matches!(screen.submit().await, SubmitOutcome::Rejected);
        assert_eq!(
            screen.errors().get(TaskField::PersonnelId),
            Some(MSG_PERSONNEL_REQUIRED)
        );

        screen.set_personnel(4);
        assert!(screen.errors().is_empty());
    }

    #[tokio::test]
    async fn mount_fills_owner_selector() {
        let mut screen = TaskFormScreen::edit(clients(), Arc::new(RecordingAlerts::new()), 6);

        assert_eq!(screen.on_mount().await.unwrap(), Navigation::Stay);
        assert_eq!(screen.form().title, "Développer l'API REST");
        let options = screen.personnel_options();
        assert_eq!(options.len(), 5);
        assert_eq!(options[0].label, "Jean Dubois");
        assert_eq!(options[0].value, 1);
    }
}
