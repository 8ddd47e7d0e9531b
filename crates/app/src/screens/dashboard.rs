//! Home screen: headline counts, quick links and the most recent tasks.

use roster_client::ClientError;
use roster_core::dashboard::{recent_tasks, DashboardStats, RECENT_TASKS_LIMIT};
use roster_core::filter::TaskFilter;
use roster_core::models::personnel::Personnel;
use roster_core::models::task::Task;
use roster_core::presentation::{ButtonVariant, ComponentSize, Icon};
use roster_core::types::DbId;

use crate::error::ScreenResult;
use crate::list::{ListStateMachine, LoadOutcome, StalePolicy};
use crate::navigation::Route;
use crate::screens::{ActionButton, Clients, CompleteOutcome};

#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub personnel: Vec<Personnel>,
    pub tasks: Vec<Task>,
}

/// A tappable stat card.
#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: usize,
    pub icon: Icon,
    pub target: Route,
}

pub struct DashboardScreen {
    clients: Clients,
    list: ListStateMachine<DashboardData>,
}

impl DashboardScreen {
    pub fn new(clients: Clients) -> Self {
        Self::with_policy(clients, StalePolicy::default())
    }

    pub fn with_policy(clients: Clients, policy: StalePolicy) -> Self {
        Self {
            clients,
            list: ListStateMachine::with_policy("dashboard", policy),
        }
    }

    async fn fetch(clients: &Clients) -> Result<DashboardData, ClientError> {
        let personnel = clients.personnel.get_all().await?;
        let tasks = clients.tasks.get_all().await?;
        Ok(DashboardData { personnel, tasks })
    }

    /// Mount and focus handler. Failures are only logged.
    pub async fn on_focus(&self) -> ScreenResult<LoadOutcome> {
        Ok(self.list.load(|| Self::fetch(&self.clients)).await?)
    }

    /// Called by a task card after it changed a task.
    pub async fn on_task_updated(&self) -> ScreenResult<LoadOutcome> {
        Ok(self
            .list
            .reload_after_mutation(|| Self::fetch(&self.clients))
            .await?)
    }

    /// Mark a task from the recent strip as completed, then reload.
    /// A task already completed (or unknown) is skipped. Failures are
    /// logged and nothing else happens.
    pub async fn mark_completed(&self, id: DbId) -> ScreenResult<CompleteOutcome> {
        let pending = self
            .list
            .with_items(|d| d.tasks.iter().any(|t| t.id == Some(id) && !t.completed));
        if !pending {
            return Ok(CompleteOutcome::Skipped);
        }

        if let Err(e) = self.clients.tasks.mark_as_completed(id).await {
            tracing::error!(task_id = id, error = %e, "Failed to mark task as completed");
            return Err(e.into());
        }
        self.on_task_updated().await?;
        Ok(CompleteOutcome::Completed)
    }

    pub fn list(&self) -> &ListStateMachine<DashboardData> {
        &self.list
    }

    pub fn stats(&self) -> DashboardStats {
        self.list
            .with_items(|d| DashboardStats::compute(&d.personnel, &d.tasks))
    }

    pub fn recent_tasks(&self) -> Vec<Task> {
        self.list
            .with_items(|d| recent_tasks(&d.tasks, RECENT_TASKS_LIMIT))
    }

    pub fn stat_cards(&self) -> [StatCard; 3] {
        let stats = self.stats();
        [
            StatCard {
                title: "Personnel",
                value: stats.total_personnel,
                icon: Icon::People,
                target: Route::PersonnelList,
            },
            StatCard {
                title: "Tâches totales",
                value: stats.total_tasks,
                icon: Icon::List,
                target: Route::TaskList {
                    filter: TaskFilter::All,
                },
            },
            StatCard {
                title: "Tâches en attente",
                value: stats.pending_tasks,
                icon: Icon::Time,
                target: Route::TaskList {
                    filter: TaskFilter::Pending,
                },
            },
        ]
    }

    /// Button of the "recent tasks" card, shown only while there are none.
    pub fn empty_recent_action(&self) -> Option<ActionButton> {
        if !self.recent_tasks().is_empty() {
            return None;
        }
        Some(
            ActionButton::push(
                "Créer une tâche",
                ButtonVariant::Primary,
                Route::TaskNew { personnel_id: None },
            )
            .size(ComponentSize::Small)
            .icon(Icon::Add),
        )
    }
}
