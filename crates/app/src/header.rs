//! App bar titles.
//!
//! One binder serves every route: "new" and tab routes have fixed titles,
//! detail and edit routes fetch their entity and fall back to a generic
//! title while loading or when the fetch fails. Header failures are logged,
//! never alerted; the screen underneath reports its own errors.

use roster_client::{PersonnelClient, TaskClient};
use roster_core::models::personnel::Personnel;
use roster_core::models::task::Task;
use roster_core::types::DbId;

use crate::navigation::Route;

pub const TITLE_DASHBOARD: &str = "Tableau de bord";
pub const TITLE_TEAM: &str = "Équipe";
pub const TITLE_TASKS: &str = "Tâches";
pub const TITLE_NEW_PERSONNEL: &str = "Nouveau personnel";
pub const TITLE_NEW_TASK: &str = "Nouvelle tâche";
pub const TITLE_PERSONNEL_FALLBACK: &str = "Détails du personnel";
pub const TITLE_TASK_FALLBACK: &str = "Détails de la tâche";
pub const TITLE_TASK_EDIT_FALLBACK: &str = "Modifier la tâche";

/// How the title of a route is obtained.
#[derive(Clone, Copy)]
enum HeaderSpec {
    Static(&'static str),
    Personnel {
        id: DbId,
        render: fn(&Personnel) -> String,
        fallback: &'static str,
    },
    Task {
        id: DbId,
        render: fn(&Task) -> String,
        fallback: &'static str,
    },
}

impl HeaderSpec {
    fn for_route(route: &Route) -> Self {
        match *route {
            Route::Dashboard => HeaderSpec::Static(TITLE_DASHBOARD),
            Route::PersonnelList => HeaderSpec::Static(TITLE_TEAM),
            Route::TaskList { .. } => HeaderSpec::Static(TITLE_TASKS),
            Route::PersonnelNew => HeaderSpec::Static(TITLE_NEW_PERSONNEL),
            Route::TaskNew { .. } => HeaderSpec::Static(TITLE_NEW_TASK),
            // Edit shows the same header as detail.
            Route::PersonnelDetail(id) | Route::PersonnelEdit(id) => HeaderSpec::Personnel {
                id,
                render: Personnel::full_name,
                fallback: TITLE_PERSONNEL_FALLBACK,
            },
            Route::TaskDetail(id) => HeaderSpec::Task {
                id,
                render: |t| t.title.clone(),
                fallback: TITLE_TASK_FALLBACK,
            },
            Route::TaskEdit(id) => HeaderSpec::Task {
                id,
                render: |t| format!("Modifier: {}", t.title),
                fallback: TITLE_TASK_EDIT_FALLBACK,
            },
        }
    }

    fn placeholder(&self) -> &'static str {
        match *self {
            HeaderSpec::Static(title) => title,
            HeaderSpec::Personnel { fallback, .. } | HeaderSpec::Task { fallback, .. } => fallback,
        }
    }
}

#[derive(Clone)]
pub struct HeaderBinder {
    personnel: PersonnelClient,
    tasks: TaskClient,
}

impl HeaderBinder {
    pub fn new(personnel: PersonnelClient, tasks: TaskClient) -> Self {
        Self { personnel, tasks }
    }

    /// Title to show before any fetch has completed.
    pub fn placeholder(route: &Route) -> &'static str {
        HeaderSpec::for_route(route).placeholder()
    }

    /// Resolve the title of `route`, fetching its entity if needed.
    pub async fn title_for(&self, route: &Route) -> String {
        let spec = HeaderSpec::for_route(route);
        let fetched = match spec {
            HeaderSpec::Static(title) => return title.to_string(),
            HeaderSpec::Personnel { id, render, .. } => {
                self.personnel.get_with_tasks(id).await.map(|p| render(&p))
            }
            HeaderSpec::Task { id, render, .. } => {
                self.tasks.get_by_id(id).await.map(|t| render(&t))
            }
        };

        fetched.unwrap_or_else(|e| {
            tracing::warn!(route = %route, error = %e, "Header fetch failed, using fallback title");
            spec.placeholder().to_string()
        })
    }
}
