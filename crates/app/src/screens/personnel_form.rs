//! Create and edit form for a member of staff.

use std::sync::Arc;

use roster_core::models::personnel::Personnel;
use roster_core::validation::{FieldErrors, PersonnelField, PersonnelForm};

use crate::alert::{Alert, AlertSink};
use crate::error::ScreenResult;
use crate::navigation::Navigation;
use crate::screens::{Clients, FormMode, SubmitOutcome};

pub const MSG_LOAD_FAILED: &str = "Impossible de charger les données du personnel";
pub const MSG_CREATED: &str = "Le membre du personnel a été créé avec succès";
pub const MSG_UPDATED: &str = "Le membre du personnel a été mis à jour avec succès";
pub const MSG_SAVE_FAILED: &str = "Une erreur est survenue lors de l'enregistrement";

pub struct PersonnelFormScreen {
    clients: Clients,
    alerts: Arc<dyn AlertSink>,
    mode: FormMode,
    form: PersonnelForm,
    errors: FieldErrors<PersonnelField>,
}

impl PersonnelFormScreen {
    pub fn create(clients: Clients, alerts: Arc<dyn AlertSink>) -> Self {
        Self {
            clients,
            alerts,
            mode: FormMode::Create,
            form: PersonnelForm::default(),
            errors: FieldErrors::new(),
        }
    }

    /// Call [`load_for_edit`](Self::load_for_edit) before showing the form.
    pub fn edit(clients: Clients, alerts: Arc<dyn AlertSink>, id: roster_core::types::DbId) -> Self {
        Self {
            mode: FormMode::Edit(id),
            ..Self::create(clients, alerts)
        }
    }

    /// Prefill from the stored record. On failure an alert is shown and the
    /// screen asks to go back. A create form has nothing to load.
    pub async fn load_for_edit(&mut self) -> ScreenResult<Navigation> {
        let FormMode::Edit(id) = self.mode else {
            return Ok(Navigation::Stay);
        };
        match self.clients.personnel.get_by_id(id).await {
            Ok(personnel) => {
                self.form = PersonnelForm::from_personnel(&personnel);
                Ok(Navigation::Stay)
            }
            Err(e) => {
                tracing::error!(personnel_id = id, error = %e, "Failed to load personnel for edit");
                self.alerts.show(Alert::error(MSG_LOAD_FAILED));
                Ok(Navigation::Back)
            }
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn form(&self) -> &PersonnelForm {
        &self.form
    }

    pub fn errors(&self) -> &FieldErrors<PersonnelField> {
        &self.errors
    }

    /// Typing into a field clears its error.
    pub fn set_field(&mut self, field: PersonnelField, value: impl Into<String>) {
        self.form.set(field, value);
        self.errors.clear(field);
    }

    pub async fn submit(&mut self) -> SubmitOutcome<Personnel> {
        if let Err(errors) = self.form.validate() {
            tracing::debug!(errors = errors.len(), "Personnel form rejected");
            self.errors = errors;
            return SubmitOutcome::Rejected;
        }

        let draft = self.form.to_draft();
        let (result, message) = match self.mode {
            FormMode::Create => (self.clients.personnel.create(&draft).await, MSG_CREATED),
            FormMode::Edit(id) => (self.clients.personnel.update(id, &draft).await, MSG_UPDATED),
        };

        match result {
            Ok(saved) => {
                self.alerts.show(Alert::success(message));
                SubmitOutcome::Saved(saved)
            }
            Err(e) => {
                tracing::error!(mode = ?self.mode, error = %e, "Failed to save personnel");
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
    use roster_client::memory::InMemoryTransport;
    use roster_core::validation::MSG_GIVEN_NAME_REQUIRED;

    use crate::alert::RecordingAlerts;

    #[tokio::test]
    async fn typing_clears_only_that_field_error() {
        let alerts = Arc::new(RecordingAlerts::new());
        let mut screen = PersonnelFormScreen::create(
            Clients::new(Arc::new(InMemoryTransport::seeded())),
            alerts,
        );

        assert_matches!(screen.submit().await, SubmitOutcome::Rejected);
        assert_eq!(screen.errors().len(), 3);

        screen.set_field(PersonnelField::FamilyName, "Dubois");
        assert_eq!(screen.errors().get(PersonnelField::FamilyName), None);
        assert_eq!(
            screen.errors().get(PersonnelField::GivenName),
            Some(MSG_GIVEN_NAME_REQUIRED)
        );
    }

    #[tokio::test]
    async fn edit_prefills_and_updates() {
        let transport = Arc::new(InMemoryTransport::seeded());
        let alerts = Arc::new(RecordingAlerts::new());
        let mut screen =
            PersonnelFormScreen::edit(Clients::new(transport.clone()), alerts.clone(), 2);

        assert_eq!(screen.load_for_edit().await.unwrap(), Navigation::Stay);
        assert_eq!(screen.form().given_name, "Sophie");

        screen.set_field(PersonnelField::JobTitle, "Directrice artistique");
        let outcome = screen.submit().await;

        assert_eq!(outcome.navigation(), Navigation::Back);
        assert_matches!(outcome, SubmitOutcome::Saved(p) if p.job_title.as_deref() == Some("Directrice artistique"));
        assert_eq!(alerts.last(), Some(Alert::success(MSG_UPDATED)));
    }

    #[tokio::test]
    async fn edit_of_missing_record_goes_back() {
        let alerts = Arc::new(RecordingAlerts::new());
        let mut screen = PersonnelFormScreen::edit(
            Clients::new(Arc::new(InMemoryTransport::seeded())),
            alerts.clone(),
            42,
        );

        assert_eq!(screen.load_for_edit().await.unwrap(), Navigation::Back);
        assert_eq!(alerts.last(), Some(Alert::error(MSG_LOAD_FAILED)));
    }
}
