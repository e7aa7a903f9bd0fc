//! Application state: view/tab routing, favorites, and search.
//!
//! All mutation goes through the command handlers below; nothing else in
//! the app touches these fields directly. The favorites set and search term
//! are session-scoped and never persisted.

use std::collections::HashSet;

use gateway::{Job, MarketItem, Place, Session};

/// Top-level view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Client,
    Admin,
    Login,
}

/// Navigation tabs of the client view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Home,
    Market,
    Jobs,
    Places,
    Favorites,
}

impl Tab {
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Market => "Serviços",
            Tab::Jobs => "Vagas",
            Tab::Places => "Guia",
            Tab::Favorites => "Salvos",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Tab::Home => "\u{1F3E0}",      // 🏠
            Tab::Market => "\u{1F6CD}",    // 🛍
            Tab::Jobs => "\u{1F4BC}",      // 💼
            Tab::Places => "\u{1F5FA}",    // 🗺
            Tab::Favorites => "\u{2764}",  // ❤
        }
    }

    pub fn variants() -> &'static [Tab] {
        &[Tab::Home, Tab::Market, Tab::Jobs, Tab::Places, Tab::Favorites]
    }
}

/// Shared application state.
#[derive(Debug, Default)]
pub struct AppState {
    pub view: View,
    pub tab: Tab,
    pub session: Option<Session>,
    pub market: Vec<MarketItem>,
    pub jobs: Vec<Job>,
    pub places: Vec<Place>,
    pub favorites: HashSet<String>,
    pub search_term: String,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Toggle a market item in the favorites set.
    pub fn toggle_favorite(&mut self, id: &str) {
        if !self.favorites.remove(id) {
            self.favorites.insert(id.to_string());
        }
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    /// Switch tabs. Pure local transition, no side effects.
    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Market items whose title contains the search term,
    /// case-insensitively. An empty term matches everything.
    pub fn filtered_market(&self) -> Vec<&MarketItem> {
        let needle = self.search_term.to_lowercase();
        self.market
            .iter()
            .filter(|item| item.title.to_lowercase().contains(&needle))
            .collect()
    }

    /// Favorited market items, in source-list order.
    pub fn favorite_items(&self) -> Vec<&MarketItem> {
        self.market
            .iter()
            .filter(|item| self.favorites.contains(&item.id))
            .collect()
    }

    /// Header button: authenticated users toggle between the admin panel
    /// and the client view; everyone else is sent to the login screen.
    pub fn open_dashboard(&mut self) {
        self.view = if self.is_authenticated() {
            match self.view {
                View::Admin => View::Client,
                _ => View::Admin,
            }
        } else {
            View::Login
        };
    }

    /// Header logo: back to the client view, home tab.
    pub fn go_home(&mut self) {
        self.view = View::Client;
        self.tab = Tab::Home;
    }

    /// Login screen "back" action.
    pub fn cancel_login(&mut self) {
        self.view = View::Client;
    }

    pub fn handle_signed_in(&mut self, session: Session) {
        self.session = Some(session);
        self.view = View::Client;
    }

    /// Sign-out always lands on the client view, whatever came before.
    pub fn handle_signed_out(&mut self) {
        self.session = None;
        self.view = View::Client;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, title: &str) -> MarketItem {
        MarketItem {
            id: id.into(),
            title: title.into(),
            category: "Serviços".into(),
            price: None,
            whatsapp: String::new(),
            description: String::new(),
            is_premium: false,
            clicks: 0,
            created_at: None,
        }
    }

    fn session() -> Session {
        Session {
            user_id: "u1".into(),
            email: Some("admin@example.com".into()),
        }
    }

    #[test]
    fn initial_state_is_client_home() {
        let state = AppState::new();
        assert_eq!(state.view, View::Client);
        assert_eq!(state.tab, Tab::Home);
        assert!(state.favorites.is_empty());
        assert!(!state.is_authenticated());
    }

    #[test]
    fn favorite_toggle_pairs_cancel_out() {
        let mut state = AppState::new();
        state.toggle_favorite("m1");
        state.toggle_favorite("m2");
        let snapshot = state.favorites.clone();

        // An even number of toggles on the same id restores the set.
        state.toggle_favorite("m1");
        state.toggle_favorite("m1");
        state.toggle_favorite("m3");
        state.toggle_favorite("m3");
        state.toggle_favorite("m3");
        state.toggle_favorite("m3");
        assert_eq!(state.favorites, snapshot);
    }

    #[test]
    fn search_filters_titles_case_insensitively() {
        let mut state = AppState::new();
        state.market = vec![
            item("m1", "Limpeza residencial"),
            item("m2", "Tradução de documentos"),
        ];
        state.set_search("limp");

        let filtered = state.filtered_market();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "Limpeza residencial");

        state.set_search("");
        assert_eq!(state.filtered_market().len(), 2);
    }

    #[test]
    fn favorite_items_follow_source_list_order() {
        let mut state = AppState::new();
        state.market = vec![item("m1", "A"), item("m2", "B"), item("m3", "C")];
        state.toggle_favorite("m3");
        state.toggle_favorite("m1");

        let ids: Vec<_> = state.favorite_items().iter().map(|i| i.id.clone()).collect();
        assert_eq!(ids, vec!["m1", "m3"]);
    }

    #[test]
    fn tab_switch_is_pure() {
        let mut state = AppState::new();
        state.toggle_favorite("m1");
        state.set_search("limp");
        state.select_tab(Tab::Favorites);
        assert_eq!(state.tab, Tab::Favorites);
        assert!(state.is_favorite("m1"));
        assert_eq!(state.search_term, "limp");
    }

    #[test]
    fn dashboard_requires_session() {
        let mut state = AppState::new();
        state.open_dashboard();
        assert_eq!(state.view, View::Login);

        state.cancel_login();
        assert_eq!(state.view, View::Client);

        state.handle_signed_in(session());
        state.open_dashboard();
        assert_eq!(state.view, View::Admin);

        // Second press toggles back to the client view.
        state.open_dashboard();
        assert_eq!(state.view, View::Client);
    }

    #[test]
    fn sign_out_from_admin_forces_client() {
        let mut state = AppState::new();
        state.handle_signed_in(session());
        state.open_dashboard();
        assert_eq!(state.view, View::Admin);

        state.handle_signed_out();
        assert_eq!(state.view, View::Client);
        assert!(!state.is_authenticated());
    }

    #[test]
    fn go_home_resets_tab() {
        let mut state = AppState::new();
        state.handle_signed_in(session());
        state.select_tab(Tab::Places);
        state.open_dashboard();

        state.go_home();
        assert_eq!(state.view, View::Client);
        assert_eq!(state.tab, Tab::Home);
    }
}
