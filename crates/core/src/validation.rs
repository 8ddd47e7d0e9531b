//! Client-side form validation.
//!
//! Forms hold raw text exactly as typed. [`PersonnelForm::validate`] and
//! [`TaskForm::validate`] run before any request is built; a form that
//! fails validation never produces a draft.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::personnel::{Personnel, PersonnelDraft};
use crate::models::task::{Priority, Task, TaskDraft, TaskStatus};
use crate::types::DbId;

/// Basic `text@text.text` shape; not an RFC 5322 parser.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

pub const MSG_FAMILY_NAME_REQUIRED: &str = "Le nom est obligatoire";
pub const MSG_GIVEN_NAME_REQUIRED: &str = "Le prénom est obligatoire";
pub const MSG_EMAIL_REQUIRED: &str = "L'email est obligatoire";
pub const MSG_EMAIL_INVALID: &str = "L'email n'est pas valide";
pub const MSG_TITLE_REQUIRED: &str = "Le titre est obligatoire";
pub const MSG_PERSONNEL_REQUIRED: &str = "Veuillez sélectionner un membre du personnel";

// ---------------------------------------------------------------------------
// Field errors
// ---------------------------------------------------------------------------

/// Inline error messages keyed by form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors<F: Ord> {
    errors: BTreeMap<F, String>,
}

impl<F: Ord + Copy> FieldErrors<F> {
    pub fn new() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, field: F, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn get(&self, field: F) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn clear(&mut self, field: F) {
        self.errors.remove(&field);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }

    fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl<F: Ord + Copy> Default for FieldErrors<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Check the loose email shape used by the personnel form.
pub fn is_email_shaped(value: &str) -> bool {
    EMAIL_SHAPE.is_match(value)
}

// ---------------------------------------------------------------------------
// Personnel form
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PersonnelField {
    FamilyName,
    GivenName,
    Email,
    Phone,
    JobTitle,
    Department,
}

/// Raw contents of the create/edit personnel form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonnelForm {
    pub family_name: String,
    pub given_name: String,
    pub email: String,
    pub phone: String,
    pub job_title: String,
    pub department: String,
}

impl PersonnelForm {
    /// Prefill from an existing record; absent optionals become empty text.
    pub fn from_personnel(p: &Personnel) -> Self {
        Self {
            family_name: p.family_name.clone(),
            given_name: p.given_name.clone(),
            email: p.email.clone(),
            phone: p.phone.clone().unwrap_or_default(),
            job_title: p.job_title.clone().unwrap_or_default(),
            department: p.department.clone().unwrap_or_default(),
        }
    }

    pub fn set(&mut self, field: PersonnelField, value: impl Into<String>) {
        let value = value.into();
        match field {
            PersonnelField::FamilyName => self.family_name = value,
            PersonnelField::GivenName => self.given_name = value,
            PersonnelField::Email => self.email = value,
            PersonnelField::Phone => self.phone = value,
            PersonnelField::JobTitle => self.job_title = value,
            PersonnelField::Department => self.department = value,
        }
    }

    pub fn validate(&self) -> Result<(), FieldErrors<PersonnelField>> {
        let mut errors = FieldErrors::new();

        if self.family_name.trim().is_empty() {
            errors.insert(PersonnelField::FamilyName, MSG_FAMILY_NAME_REQUIRED);
        }
        if self.given_name.trim().is_empty() {
            errors.insert(PersonnelField::GivenName, MSG_GIVEN_NAME_REQUIRED);
        }
        if self.email.trim().is_empty() {
            errors.insert(PersonnelField::Email, MSG_EMAIL_REQUIRED);
        } else if !is_email_shaped(&self.email) {
            errors.insert(PersonnelField::Email, MSG_EMAIL_INVALID);
        }

        errors.into_result()
    }

    /// Request body with every field sent as typed, empty text included.
    pub fn to_draft(&self) -> PersonnelDraft {
        PersonnelDraft {
            family_name: Some(self.family_name.clone()),
            given_name: Some(self.given_name.clone()),
            email: Some(self.email.clone()),
            phone: Some(self.phone.clone()),
            job_title: Some(self.job_title.clone()),
            department: Some(self.department.clone()),
        }
    }
}

// ---------------------------------------------------------------------------
// Task form
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TaskField {
    Title,
    Description,
    DueDate,
    Priority,
    Status,
    Completed,
    PersonnelId,
}

/// Raw contents of the create/edit task form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub priority: Priority,
    pub status: TaskStatus,
    pub completed: bool,
    /// `0` means nobody has been selected yet.
    pub personnel_id: DbId,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            due_date: String::new(),
            priority: Priority::Medium,
            status: TaskStatus::Todo,
            completed: false,
            personnel_id: 0,
        }
    }
}

impl TaskForm {
    /// Empty form preassigned to a member of staff (task created from a
    /// personnel detail screen).
    pub fn for_personnel(personnel_id: Option<DbId>) -> Self {
        Self {
            personnel_id: personnel_id.unwrap_or(0),
            ..Self::default()
        }
    }

    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            due_date: task.due_date.clone().unwrap_or_default(),
            priority: task.priority.unwrap_or(Priority::Medium),
            status: task.status.unwrap_or(TaskStatus::Todo),
            completed: task.completed,
            personnel_id: task.personnel_id,
        }
    }

    pub fn validate(&self) -> Result<(), FieldErrors<TaskField>> {
        let mut errors = FieldErrors::new();

        if self.title.trim().is_empty() {
            errors.insert(TaskField::Title, MSG_TITLE_REQUIRED);
        }
        if self.personnel_id == 0 {
            errors.insert(TaskField::PersonnelId, MSG_PERSONNEL_REQUIRED);
        }

        errors.into_result()
    }

    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            due_date: Some(self.due_date.clone()),
            priority: Some(self.priority),
            status: Some(self.status),
            completed: Some(self.completed),
            personnel_id: Some(self.personnel_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_personnel() -> PersonnelForm {
        PersonnelForm {
            family_name: "Dubois".into(),
            given_name: "Jean".into(),
            email: "jean.dubois@example.com".into(),
            ..Default::default()
        }
    }

    #[test]
    fn valid_personnel_form_passes() {
        assert!(filled_personnel().validate().is_ok());
    }

    #[test]
    fn invalid_email_is_reported_on_email_field_only() {
        let mut form = filled_personnel();
        form.email = "invalid".into();

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(PersonnelField::Email), Some(MSG_EMAIL_INVALID));
    }

    #[test]
    fn blank_fields_report_required_messages() {
        let form = PersonnelForm {
            family_name: "  ".into(),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get(PersonnelField::FamilyName), Some(MSG_FAMILY_NAME_REQUIRED));
        assert_eq!(errors.get(PersonnelField::GivenName), Some(MSG_GIVEN_NAME_REQUIRED));
        assert_eq!(errors.get(PersonnelField::Email), Some(MSG_EMAIL_REQUIRED));
    }

    #[test]
    fn email_shape_needs_at_and_dot() {
        assert!(is_email_shaped("a@b.c"));
        assert!(!is_email_shaped("a@b"));
        assert!(!is_email_shaped("ab.c"));
    }

    #[test]
    fn task_form_defaults_and_validation() {
        let form = TaskForm::default();
        assert_eq!(form.priority, Priority::Medium);
        assert_eq!(form.status, TaskStatus::Todo);

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get(TaskField::Title), Some(MSG_TITLE_REQUIRED));
        assert_eq!(errors.get(TaskField::PersonnelId), Some(MSG_PERSONNEL_REQUIRED));
    }

    #[test]
    fn task_form_for_personnel_passes_once_titled() {
        let mut form = TaskForm::for_personnel(Some(4));
        form.title = "Rédiger le compte rendu".into();
        assert!(form.validate().is_ok());
        assert_eq!(form.to_draft().personnel_id, Some(4));
    }

    #[test]
    fn clearing_a_field_error_leaves_others() {
        let mut errors = PersonnelForm::default().validate().unwrap_err();
        errors.clear(PersonnelField::Email);
        assert!(errors.get(PersonnelField::Email).is_none());
        assert_eq!(errors.len(), 2);
    }
}
