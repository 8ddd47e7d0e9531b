//! App bar titles resolved through the shared header binder.

use std::sync::Arc;

use roster_app::header::{
    HeaderBinder, TITLE_NEW_PERSONNEL, TITLE_NEW_TASK, TITLE_PERSONNEL_FALLBACK, TITLE_TASK_FALLBACK,
    TITLE_TASK_EDIT_FALLBACK,
};
use roster_app::navigation::Route;
use roster_app::screens::Clients;
use roster_client::memory::InMemoryTransport;
use roster_client::transport::Method;

fn binder() -> (Arc<InMemoryTransport>, HeaderBinder) {
    let transport = Arc::new(InMemoryTransport::seeded());
    let binder = Clients::new(transport.clone()).header_binder();
    (transport, binder)
}

#[tokio::test]
async fn static_titles_fetch_nothing() {
    let (transport, binder) = binder();

    assert_eq!(binder.title_for(&Route::PersonnelNew).await, TITLE_NEW_PERSONNEL);
    assert_eq!(
        binder
            .title_for(&Route::TaskNew {
                personnel_id: Some(3)
            })
            .await,
        TITLE_NEW_TASK
    );
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn personnel_titles_use_the_with_tasks_fetch() {
    let (transport, binder) = binder();

    assert_eq!(binder.title_for(&Route::PersonnelDetail(3)).await, "Thomas Petit");
    assert_eq!(binder.title_for(&Route::PersonnelEdit(3)).await, "Thomas Petit");
    assert_eq!(transport.count(Method::Get, "/personnels/3/tasks"), 2);
}

#[tokio::test]
async fn task_titles() {
    let (_, binder) = binder();

    assert_eq!(
        binder.title_for(&Route::TaskDetail(6)).await,
        "Développer l'API REST"
    );
    assert_eq!(
        binder.title_for(&Route::TaskEdit(6)).await,
        "Modifier: Développer l'API REST"
    );
}

#[tokio::test]
async fn failed_fetch_falls_back() {
    let (transport, binder) = binder();
    transport.set_offline(true);

    assert_eq!(
        binder.title_for(&Route::PersonnelDetail(1)).await,
        TITLE_PERSONNEL_FALLBACK
    );
    assert_eq!(binder.title_for(&Route::TaskDetail(99)).await, TITLE_TASK_FALLBACK);
    assert_eq!(binder.title_for(&Route::TaskEdit(1)).await, TITLE_TASK_EDIT_FALLBACK);
}
