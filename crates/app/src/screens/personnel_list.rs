//! Team tab: every member of staff with a text search.

use roster_client::ClientError;
use roster_core::filter::filter_personnel;
use roster_core::models::personnel::Personnel;
use roster_core::presentation::ButtonVariant;

use crate::error::ScreenResult;
use crate::list::{ListStateMachine, LoadOutcome, StalePolicy};
use crate::navigation::Route;
use crate::screens::{ActionButton, Clients};

pub const EMPTY_TITLE: &str = "Aucun membre du personnel trouvé";
pub const EMPTY_HINT_SEARCHING: &str = "Essayez une autre recherche";
pub const EMPTY_HINT_NO_DATA: &str = "Ajoutez votre premier membre du personnel";

/// What the list shows when nothing matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyState {
    pub title: &'static str,
    pub hint: &'static str,
    /// The "add" button is only offered when the search box is empty.
    pub create: Option<ActionButton>,
}

pub struct PersonnelListScreen {
    clients: Clients,
    list: ListStateMachine<Vec<Personnel>>,
    query: String,
}

impl PersonnelListScreen {
    pub fn new(clients: Clients) -> Self {
        Self::with_policy(clients, StalePolicy::default())
    }

    pub fn with_policy(clients: Clients, policy: StalePolicy) -> Self {
        Self {
            clients,
            list: ListStateMachine::with_policy("personnel", policy),
            query: String::new(),
        }
    }

    async fn fetch(clients: &Clients) -> Result<Vec<Personnel>, ClientError> {
        clients.personnel.get_all().await
    }

    pub async fn on_focus(&self) -> ScreenResult<LoadOutcome> {
        Ok(self.list.load(|| Self::fetch(&self.clients)).await?)
    }

    pub async fn refresh(&self) -> ScreenResult<LoadOutcome> {
        Ok(self.list.refresh(|| Self::fetch(&self.clients)).await?)
    }

    pub fn list(&self) -> &ListStateMachine<Vec<Personnel>> {
        &self.list
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
    }

    pub fn visible(&self) -> Vec<Personnel> {
        self.list.with_items(|all| {
            filter_personnel(all, &self.query)
                .into_iter()
                .cloned()
                .collect()
        })
    }

    /// `None` while something is visible.
    pub fn empty_state(&self) -> Option<EmptyState> {
        if !self.visible().is_empty() {
            return None;
        }
        // Any typed text counts, even if it is blank and filters nothing.
        let searching = !self.query.is_empty();
        Some(EmptyState {
            title: EMPTY_TITLE,
            hint: if searching {
                EMPTY_HINT_SEARCHING
            } else {
                EMPTY_HINT_NO_DATA
            },
            create: (!searching).then(|| {
                ActionButton::push(
                    "Ajouter un personnel",
                    ButtonVariant::Primary,
                    Route::PersonnelNew,
                )
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use roster_client::memory::InMemoryTransport;

    fn screen(transport: InMemoryTransport) -> PersonnelListScreen {
        PersonnelListScreen::new(Clients::new(Arc::new(transport)))
    }

    #[tokio::test]
    async fn search_narrows_and_empty_state_follows() {
        let mut screen = screen(InMemoryTransport::seeded());
        screen.on_focus().await.unwrap();
        assert_eq!(screen.visible().len(), 5);
        assert_eq!(screen.empty_state(), None);

        screen.set_query("MARTIN");
        let visible = screen.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].given_name, "Sophie");

        screen.set_query("zzz");
        let empty = screen.empty_state().unwrap();
        assert_eq!(empty.hint, EMPTY_HINT_SEARCHING);
        assert_eq!(empty.create, None);

        screen.clear_query();
        assert_eq!(screen.query(), "");
        assert_eq!(screen.visible().len(), 5);
        assert_eq!(screen.empty_state(), None);
    }

    #[tokio::test]
    async fn empty_backend_offers_create() {
        let screen = screen(InMemoryTransport::empty());
        screen.on_focus().await.unwrap();

        let empty = screen.empty_state().unwrap();
        assert_eq!(empty.hint, EMPTY_HINT_NO_DATA);
        let create = empty.create.unwrap();
        assert_eq!(create.title, "Ajouter un personnel");
        assert_eq!(create.route().unwrap().to_string(), "/personnel/new");
    }

    #[tokio::test]
    async fn blank_search_on_empty_list_reads_as_searching() {
        let mut screen = screen(InMemoryTransport::empty());
        screen.on_focus().await.unwrap();

        screen.set_query(" ");
        assert!(screen.visible().is_empty());
        let empty = screen.empty_state().unwrap();
        assert_eq!(empty.hint, EMPTY_HINT_SEARCHING);
        assert_eq!(empty.create, None);
    }

    #[tokio::test]
    async fn blank_search_filters_nothing() {
        let mut screen = screen(InMemoryTransport::seeded());
        screen.on_focus().await.unwrap();

        screen.set_query("   ");
        assert_eq!(screen.visible().len(), 5);
    }
}
