//! Filter/search composition for list screens.
//!
//! Every function here is a stable filter: the output is a subset of the
//! input in the input's order. Active filters compose by intersection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::personnel::Personnel;
use crate::models::task::Task;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Status filter
// ---------------------------------------------------------------------------

/// Completion filter over tasks. Looks only at the completion flag, never at
/// the status label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl TaskFilter {
    /// Read the initial filter from a navigation parameter. Anything other
    /// than `completed` or `pending` (including no parameter) means `All`.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("completed") => TaskFilter::Completed,
            Some("pending") => TaskFilter::Pending,
            _ => TaskFilter::All,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskFilter::All => "all",
            TaskFilter::Pending => "pending",
            TaskFilter::Completed => "completed",
        }
    }

    pub fn accepts(self, task: &Task) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Pending => !task.completed,
            TaskFilter::Completed => task.completed,
        }
    }
}

impl fmt::Display for TaskFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(TaskFilter::All),
            "pending" => Ok(TaskFilter::Pending),
            "completed" => Ok(TaskFilter::Completed),
            other => Err(CoreError::UnknownVariant {
                kind: "task filter",
                value: other.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Text search
// ---------------------------------------------------------------------------

/// Entities that take part in the free-text search of a list screen.
pub trait TextSearchable {
    /// The searched fields; `None` for an absent optional field.
    fn search_fields(&self) -> Vec<Option<&str>>;
}

impl TextSearchable for Personnel {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.family_name.as_str()),
            Some(self.given_name.as_str()),
            Some(self.email.as_str()),
            self.department.as_deref(),
        ]
    }
}

impl TextSearchable for Task {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![Some(self.title.as_str()), self.description.as_deref()]
    }
}

/// Lower-cased needle for a query, or `None` when the query is blank and
/// the text filter is therefore disabled.
///
/// Only the blank check trims; a non-blank query is matched as typed, so
/// surrounding spaces take part in the substring match.
pub fn normalize_query(query: &str) -> Option<String> {
    if query.trim().is_empty() {
        None
    } else {
        Some(query.to_lowercase())
    }
}

/// Case-insensitive substring match in any searched field. Absent fields
/// never match.
pub fn matches_text<T: TextSearchable>(item: &T, needle: &str) -> bool {
    item.search_fields()
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Keep the items matching `query`; a blank query keeps everything.
pub fn filter_by_text<'a, T: TextSearchable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    match normalize_query(query) {
        None => items.iter().collect(),
        Some(needle) => items.iter().filter(|i| matches_text(*i, &needle)).collect(),
    }
}

// ---------------------------------------------------------------------------
// Composed queries
// ---------------------------------------------------------------------------

/// Every user-controlled filter of the task list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    pub status: TaskFilter,
    pub personnel_id: Option<DbId>,
    pub text: String,
}

impl TaskQuery {
    /// True when at least one filter is set (drives the "no result" versus
    /// "no task yet" empty state). Any typed text counts, whitespace
    /// included, even though [`filter_tasks`] ignores a blank query.
    pub fn is_narrowing(&self) -> bool {
        self.status != TaskFilter::All || self.personnel_id.is_some() || !self.text.is_empty()
    }
}

/// Apply status, owner and text filters, in that order.
pub fn filter_tasks<'a>(tasks: &'a [Task], query: &TaskQuery) -> Vec<&'a Task> {
    let needle = normalize_query(&query.text);
    tasks
        .iter()
        .filter(|t| query.status.accepts(t))
        .filter(|t| query.personnel_id.map_or(true, |id| t.personnel_id == id))
        .filter(|t| needle.as_deref().map_or(true, |n| matches_text(*t, n)))
        .collect()
}

/// Personnel screens only have the text filter.
pub fn filter_personnel<'a>(personnel: &'a [Personnel], query: &str) -> Vec<&'a Personnel> {
    filter_by_text(personnel, query)
}
