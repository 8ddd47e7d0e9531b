//! Personnel entity model and DTOs.

use serde::{Deserialize, Serialize};

use crate::models::task::Task;
use crate::types::DbId;

/// A member of staff as returned by `/personnels`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Personnel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DbId>,
    #[serde(rename = "nom")]
    pub family_name: String,
    #[serde(rename = "prenom")]
    pub given_name: String,
    pub email: String,
    #[serde(rename = "telephone", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "poste", default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(rename = "departement", default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Only populated by the "with tasks" fetch.
    #[serde(rename = "taches", default, skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<Task>>,
}

impl Personnel {
    /// `"{prenom} {nom}"`, the form used in headers and cards.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
    }

    /// Upper-cased first letters of given and family name.
    pub fn initials(&self) -> String {
        self.given_name
            .chars()
            .next()
            .into_iter()
            .chain(self.family_name.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Partial body for `POST /personnels` and `PUT /personnels/{id}`.
///
/// `None` fields are left out of the JSON entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonnelDraft {
    #[serde(rename = "nom", default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    #[serde(rename = "prenom", default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "telephone", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "poste", default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(rename = "departement", default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}
