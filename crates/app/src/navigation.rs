//! Route table of the app and the navigation requests screens hand back.

use std::fmt;
use std::str::FromStr;

use roster_core::filter::TaskFilter;
use roster_core::types::DbId;

use crate::error::ScreenError;

/// Every screen reachable by path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    PersonnelList,
    PersonnelNew,
    PersonnelDetail(DbId),
    PersonnelEdit(DbId),
    TaskList { filter: TaskFilter },
    /// `personnel_id` preassigns the new task when launched from a
    /// personnel screen.
    TaskNew { personnel_id: Option<DbId> },
    TaskDetail(DbId),
    TaskEdit(DbId),
}

/// What a screen asks the navigator to do after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    Back,
    To(Route),
}

fn parse_id(raw: &str, path: &str) -> Result<DbId, ScreenError> {
    raw.parse()
        .map_err(|_| ScreenError::UnknownRoute(path.to_string()))
}

/// Value of `key` in a `a=1&b=2` query string.
fn query_param<'a>(query: Option<&'a str>, key: &str) -> Option<&'a str> {
    query?
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}

impl FromStr for Route {
    type Err = ScreenError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let (base, query) = match path.split_once('?') {
            Some((base, query)) => (base, Some(query)),
            None => (path, None),
        };
        let segments: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();

        let route = match segments.as_slice() {
            [] => Route::Dashboard,
            ["personnel"] => Route::PersonnelList,
            ["personnel", "new"] => Route::PersonnelNew,
            ["personnel", "edit", id] => Route::PersonnelEdit(parse_id(id, path)?),
            ["personnel", id] => Route::PersonnelDetail(parse_id(id, path)?),
            ["tasks"] => Route::TaskList {
                filter: TaskFilter::from_param(query_param(query, "filter")),
            },
            ["tasks", "new"] => Route::TaskNew {
                personnel_id: query_param(query, "personnelId").and_then(|v| v.parse().ok()),
            },
            ["tasks", "edit", id] => Route::TaskEdit(parse_id(id, path)?),
            ["tasks", id] => Route::TaskDetail(parse_id(id, path)?),
            _ => return Err(ScreenError::UnknownRoute(path.to_string())),
        };
        Ok(route)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Dashboard => f.write_str("/"),
            Route::PersonnelList => f.write_str("/personnel"),
            Route::PersonnelNew => f.write_str("/personnel/new"),
            Route::PersonnelDetail(id) => write!(f, "/personnel/{id}"),
            Route::PersonnelEdit(id) => write!(f, "/personnel/edit/{id}"),
            Route::TaskList {
                filter: TaskFilter::All,
            } => f.write_str("/tasks"),
            Route::TaskList { filter } => write!(f, "/tasks?filter={filter}"),
            Route::TaskNew { personnel_id: None } => f.write_str("/tasks/new"),
            Route::TaskNew {
                personnel_id: Some(id),
            } => write!(f, "/tasks/new?personnelId={id}"),
            Route::TaskDetail(id) => write!(f, "/tasks/{id}"),
            Route::TaskEdit(id) => write!(f, "/tasks/edit/{id}"),
        }
    }
}
