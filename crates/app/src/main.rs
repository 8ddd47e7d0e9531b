use std::sync::Arc;

use anyhow::{bail, Context};
use roster_app::alert::LogAlerts;
use roster_app::navigation::Route;
use roster_app::screens::{
    ActionButton, Clients, CompleteOutcome, DashboardScreen, PersonnelListScreen, TaskDetailScreen,
    TaskListScreen,
};
use roster_client::config::{self, ApiConfig};
use roster_core::filter::TaskFilter;
use roster_core::models::task::Task;
use roster_core::presentation::{
    format_date_fr, priority_badge, status_badge, DateStyle, UNSET_DATE_LABEL,
};
use roster_core::types::DbId;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: roster dashboard | personnel [query] | tasks [all|pending|completed] [query] | task <id> | complete <id>";

enum Command {
    Dashboard,
    Personnel { query: String },
    Tasks { filter: TaskFilter, query: String },
    Task { id: DbId },
    Complete { id: DbId },
}

fn parse_task_id(arg: Option<String>) -> anyhow::Result<DbId> {
    let Some(raw) = arg else {
        bail!("missing task id\n{USAGE}");
    };
    raw.parse()
        .with_context(|| format!("invalid task id `{raw}`"))
}

impl Command {
    fn from_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<Self> {
        let command = match args.next().as_deref() {
            None | Some("dashboard") => Command::Dashboard,
            Some("personnel") => Command::Personnel {
                query: args.collect::<Vec<_>>().join(" "),
            },
            Some("tasks") => {
                let mut rest: Vec<String> = args.collect();
                let filter = match rest.first().map(String::as_str) {
                    Some(f @ ("all" | "pending" | "completed")) => Some(TaskFilter::from_param(Some(f))),
                    _ => None,
                };
                if filter.is_some() {
                    rest.remove(0);
                }
                Command::Tasks {
                    filter: filter.unwrap_or_default(),
                    query: rest.join(" "),
                }
            }
            Some("task") => Command::Task {
                id: parse_task_id(args.next())?,
            },
            Some("complete") => Command::Complete {
                id: parse_task_id(args.next())?,
            },
            Some(other) => bail!("unknown command `{other}`\n{USAGE}"),
        };
        Ok(command)
    }
}

fn print_task(task: &Task) {
    let status = status_badge(task).map(|b| b.text).unwrap_or_default();
    let priority = priority_badge(task.priority).map(|b| b.text).unwrap_or_default();
    let due = format_date_fr(task.due_date.as_deref(), DateStyle::Short)
        .unwrap_or_else(|| UNSET_DATE_LABEL.to_string());
    let owner = task
        .personnel
        .as_ref()
        .map(|p| p.full_name())
        .unwrap_or_default();
    println!(
        "#{:<3} {:<45} {:<10} {:<10} {:<14} {}",
        task.id.unwrap_or_default(),
        task.title,
        status,
        priority,
        due,
        owner
    );
}

fn print_action(action: &ActionButton) {
    match action.route() {
        Some(route) => println!("  [{}] -> {route}", action.title),
        None => println!("  [{}]", action.title),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roster_app=info,roster_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let command = Command::from_args(std::env::args().skip(1))?;

    let config = config::install(ApiConfig::from_env()?)?;
    tracing::info!(base_url = %config.base_url, "Using backend");

    let transport = roster_client::connect(config).context("Failed to build API client")?;
    let clients = Clients::new(transport);

    match command {
        Command::Dashboard => {
            let screen = DashboardScreen::new(clients);
            screen.on_focus().await.context("Failed to load dashboard")?;

            let stats = screen.stats();
            for card in screen.stat_cards() {
                println!("{:<20} {:>4}   ({})", card.title, card.value, card.target);
            }
            println!("Terminées: {:.0}%", stats.completion_ratio() * 100.0);
            println!();
            println!("Tâches récentes");
            let recent = screen.recent_tasks();
            if let Some(action) = screen.empty_recent_action() {
                println!("  Aucune tâche disponible");
                print_action(&action);
            }
            recent.iter().for_each(print_task);
        }
        Command::Personnel { query } => {
            let mut screen = PersonnelListScreen::new(clients);
            screen.on_focus().await.context("Failed to load personnel")?;
            screen.set_query(query);

            if let Some(empty) = screen.empty_state() {
                println!("{}\n{}", empty.title, empty.hint);
                if let Some(action) = empty.create {
                    print_action(&action);
                }
            }
            for p in screen.visible() {
                println!(
                    "#{:<3} {:<3} {:<25} {:<32} {}",
                    p.id.unwrap_or_default(),
                    p.initials(),
                    p.full_name(),
                    p.email,
                    p.department.as_deref().unwrap_or("")
                );
            }
        }
        Command::Tasks { filter, query } => {
            let mut screen = TaskListScreen::new(clients, Some(filter.as_str()));
            screen.on_focus().await.context("Failed to load tasks")?;
            screen.set_text(query);

            if let Some(empty) = screen.empty_state() {
                println!("{}\n{}", empty.title, empty.hint);
                if let Some(action) = empty.create {
                    print_action(&action);
                }
            }
            screen.visible().iter().for_each(print_task);
        }
        Command::Task { id } => {
            let title = clients.header_binder().title_for(&Route::TaskDetail(id)).await;
            let screen = TaskDetailScreen::new(clients, Arc::new(LogAlerts), id);
            screen.on_focus().await.context("Failed to load task")?;

            println!("{title}");
            if let Some(task) = screen.task() {
                print_task(&task);
                if let Some(description) = task.description.filter(|d| !d.is_empty()) {
                    println!("      {description}");
                }
            }
            screen.actions().iter().for_each(print_action);
        }
        Command::Complete { id } => {
            let screen = TaskDetailScreen::new(clients, Arc::new(LogAlerts), id);
            screen.on_focus().await.context("Failed to load task")?;

            match screen.mark_completed().await? {
                CompleteOutcome::Skipped => println!("Tâche #{id} déjà terminée"),
                CompleteOutcome::Completed => {
                    if let Some(task) = screen.task() {
                        print_task(&task);
                    }
                }
            }
        }
    }

    Ok(())
}
