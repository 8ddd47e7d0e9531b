//! Screen controllers.
//!
//! Each screen owns its fetched state, reloads it in full on every focus and
//! after every mutation, and shares nothing with other screens. List screens
//! only log failures; detail and form screens also raise an alert.

use std::sync::Arc;

use roster_client::{PersonnelClient, TaskClient, Transport};
use roster_core::presentation::{ButtonVariant, ComponentSize, Icon};

use crate::header::HeaderBinder;
use crate::navigation::{Navigation, Route};

pub mod dashboard;
pub mod personnel_detail;
pub mod personnel_form;
pub mod personnel_list;
pub mod task_detail;
pub mod task_form;
pub mod task_list;

pub use dashboard::DashboardScreen;
pub use personnel_detail::PersonnelDetailScreen;
pub use personnel_form::PersonnelFormScreen;
pub use personnel_list::PersonnelListScreen;
pub use task_detail::TaskDetailScreen;
pub use task_form::TaskFormScreen;
pub use task_list::TaskListScreen;

/// Entity clients handed to every screen.
#[derive(Clone)]
pub struct Clients {
    pub personnel: PersonnelClient,
    pub tasks: TaskClient,
}

impl Clients {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            personnel: PersonnelClient::new(Arc::clone(&transport)),
            tasks: TaskClient::new(transport),
        }
    }

    pub fn header_binder(&self) -> HeaderBinder {
        HeaderBinder::new(self.personnel.clone(), self.tasks.clone())
    }
}

/// What pressing a button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    Navigate(Navigation),
    /// Handled by the owning screen's `mark_completed`.
    MarkCompleted,
    /// Handled by the owning screen's `delete_prompt` then `delete`.
    Delete,
}

/// A button a screen offers, as rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionButton {
    pub title: &'static str,
    pub variant: ButtonVariant,
    pub size: ComponentSize,
    pub icon: Option<Icon>,
    pub action: ButtonAction,
}

impl ActionButton {
    pub fn new(title: &'static str, variant: ButtonVariant, action: ButtonAction) -> Self {
        Self {
            title,
            variant,
            size: ComponentSize::Medium,
            icon: None,
            action,
        }
    }

    /// A button that pushes `route`.
    pub fn push(title: &'static str, variant: ButtonVariant, route: Route) -> Self {
        Self::new(title, variant, ButtonAction::Navigate(Navigation::To(route)))
    }

    pub fn size(mut self, size: ComponentSize) -> Self {
        self.size = size;
        self
    }

    pub fn icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    /// The route this button pushes, if it navigates forward.
    pub fn route(&self) -> Option<Route> {
        match self.action {
            ButtonAction::Navigate(Navigation::To(route)) => Some(route),
            _ => None,
        }
    }
}

/// Outcome of a "mark completed" action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompleteOutcome {
    /// Already completed (or not loaded); nothing was sent.
    Skipped,
    Completed,
}

/// Whether a form creates a new record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(roster_core::types::DbId),
}

/// Result of pressing a form's save button.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<E> {
    /// Local validation failed; nothing was sent.
    Rejected,
    /// Saved; the screen should navigate back.
    Saved(E),
    /// The request failed; an alert has been shown.
    Failed,
}

impl<E> SubmitOutcome<E> {
    pub fn navigation(&self) -> crate::navigation::Navigation {
        match self {
            SubmitOutcome::Saved(_) => crate::navigation::Navigation::Back,
            SubmitOutcome::Rejected | SubmitOutcome::Failed => crate::navigation::Navigation::Stay,
        }
    }
}
