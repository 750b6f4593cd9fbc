use std::time::Instant;

use crafts_core::cart::Cart;
use crafts_core::chat::{Chat, Submit};
use crafts_core::config::CraftsConfig;
use crafts_core::filter;
use crafts_core::model::*;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::event::{AsyncAction, AsyncResult};

/// Shown wherever a catalog request failed. The underlying error goes to the log.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load products. Please try again later.";

/// Top-level page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Shop,
    About,
}

impl Screen {
    pub const ALL: [Screen; 3] = [Screen::Home, Screen::Shop, Screen::About];

    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Shop => "Shop",
            Self::About => "About",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Home => 0,
            Self::Shop => 1,
            Self::About => 2,
        }
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Overlay drawn on top of the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    None,
    Cart,
    Chat,
}

/// Input mode within the shop screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Filter,
}

/// Progress of one catalog request.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Loaded(T),
    Failed,
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

/// Central application state.
pub struct App {
    pub screen: Screen,
    pub panel: Panel,
    pub input_mode: InputMode,
    pub should_quit: bool,
    /// Bumped on every navigation or refresh; results carrying an older value are dropped.
    pub generation: u64,

    pub store_name: String,
    pub assistant_name: String,
    pub product_limit: usize,

    // -- Home state --
    pub featured: LoadState<Vec<Product>>,

    // -- Shop state --
    pub products: LoadState<Vec<Product>>,
    pub categories: LoadState<Vec<String>>,
    pub filter: FilterState,
    pub visible: Vec<Product>,
    pub selected: usize,
    pub search_cursor: usize,
    pub category_index: usize, // 0 = all, otherwise index + 1 into categories

    // -- Cart panel --
    pub cart: Cart,
    pub cart_selected: usize,

    // -- Chat panel --
    pub chat: Chat,
    pub chat_input: String,

    // -- Notice toast --
    pub notice: Option<String>,
    pub notice_timer: u8, // ticks remaining
}

impl App {
    pub fn new(config: &CraftsConfig) -> Self {
        Self {
            screen: Screen::Home,
            panel: Panel::None,
            input_mode: InputMode::Normal,
            should_quit: false,
            generation: 0,

            store_name: config.store.name.clone(),
            assistant_name: config.chat.assistant_name.clone(),
            product_limit: config.catalog.product_limit,

            featured: LoadState::Loading,

            products: LoadState::Loading,
            categories: LoadState::Loading,
            filter: FilterState::default(),
            visible: Vec::new(),
            selected: 0,
            search_cursor: 0,
            category_index: 0,

            cart: Cart::new(),
            cart_selected: 0,

            chat: Chat::new(config.chat.typing_delay()),
            chat_input: String::new(),

            notice: None,
            notice_timer: 0,
        }
    }

    /// The request for whatever the current screen shows. Called once at
    /// startup and again by navigation and refresh.
    pub fn load_current(&mut self) -> Option<AsyncAction> {
        self.generation += 1;
        let generation = self.generation;
        match self.screen {
            Screen::Home => {
                self.featured = LoadState::Loading;
                Some(AsyncAction::LoadFeatured { generation })
            }
            Screen::Shop => {
                self.products = LoadState::Loading;
                self.categories = LoadState::Loading;
                self.visible.clear();
                self.selected = 0;
                Some(AsyncAction::LoadShop {
                    generation,
                    limit: self.product_limit,
                })
            }
            Screen::About => None,
        }
    }

    /// Switch pages. Closes the cart, leaves any text mode, and reloads the
    /// target page's data. Re-selecting the current page does nothing.
    pub fn navigate(&mut self, screen: Screen) -> Option<AsyncAction> {
        if self.panel == Panel::Cart {
            self.panel = Panel::None;
        }
        if screen == self.screen {
            return None;
        }
        tracing::debug!(from = ?self.screen, to = ?screen, "navigate");
        self.screen = screen;
        self.input_mode = InputMode::Normal;
        self.load_current()
    }

    /// Process an async result from the worker.
    pub fn handle_result(&mut self, result: AsyncResult) {
        if result.generation() != self.generation {
            tracing::debug!(
                stale = result.generation(),
                current = self.generation,
                "dropping stale catalog result"
            );
            return;
        }

        match result {
            AsyncResult::Featured { result, .. } => {
                self.featured = match result {
                    Ok(products) => LoadState::Loaded(products),
                    Err(e) => {
                        tracing::warn!("featured products failed to load: {e}");
                        LoadState::Failed
                    }
                };
            }
            AsyncResult::Products { result, .. } => {
                self.products = match result {
                    Ok(products) => LoadState::Loaded(products),
                    Err(e) => {
                        tracing::warn!("products failed to load: {e}");
                        LoadState::Failed
                    }
                };
                self.refilter();
            }
            AsyncResult::Categories { result, .. } => {
                self.categories = match result {
                    Ok(categories) => LoadState::Loaded(categories),
                    Err(e) => {
                        tracing::warn!("categories failed to load: {e}");
                        LoadState::Failed
                    }
                };
                self.sync_category_index();
            }
        }
    }

    /// Handle a key event. Returns an optional async action to dispatch.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<AsyncAction> {
        // Ctrl+C always quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return None;
        }

        match self.panel {
            Panel::Chat => return self.handle_chat(key),
            Panel::Cart => return self.handle_cart(key),
            Panel::None => {}
        }

        match (self.screen, &self.input_mode) {
            (Screen::Shop, InputMode::Search) => self.handle_shop_search(key),
            (Screen::Shop, InputMode::Filter) => self.handle_shop_filter(key),
            _ => self.handle_normal(key),
        }
    }

    /// Keys shared by every page outside text entry, then page-specific ones.
    fn handle_normal(&mut self, key: KeyEvent) -> Option<AsyncAction> {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                None
            }
            KeyCode::Char('1') => self.navigate(Screen::Home),
            KeyCode::Char('2') => self.navigate(Screen::Shop),
            KeyCode::Char('3') => self.navigate(Screen::About),
            KeyCode::Tab => self.navigate(self.screen.next()),
            KeyCode::BackTab => self.navigate(self.screen.prev()),
            KeyCode::Char('c') => {
                self.panel = Panel::Cart;
                self.clamp_cart_selection();
                None
            }
            KeyCode::Char('a') => {
                self.panel = Panel::Chat;
                None
            }
            KeyCode::Char('r') if self.screen != Screen::About => self.load_current(),
            _ => match self.screen {
                Screen::Home => self.handle_home(key),
                Screen::Shop => self.handle_shop_normal(key),
                Screen::About => None,
            },
        }
    }

    fn handle_home(&mut self, key: KeyEvent) -> Option<AsyncAction> {
        match key.code {
            // The hero's "Shop Now" call to action.
            KeyCode::Enter => self.navigate(Screen::Shop),
            _ => None,
        }
    }

    fn handle_shop_normal(&mut self, key: KeyEvent) -> Option<AsyncAction> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
            KeyCode::Char('G') => {
                if !self.visible.is_empty() {
                    self.selected = self.visible.len() - 1;
                }
            }
            KeyCode::Char('g') => self.selected = 0,
            KeyCode::PageDown => self.move_selection(20),
            KeyCode::PageUp => self.move_selection(-20),
            KeyCode::Enter | KeyCode::Char('+') => self.add_selected_to_cart(),
            KeyCode::Char('/') => {
                self.input_mode = InputMode::Search;
                self.search_cursor = self.filter.search.len();
            }
            KeyCode::Char('f') => self.input_mode = InputMode::Filter,
            KeyCode::Char('s') => {
                self.filter.sort = self.filter.sort.next();
                self.refilter();
            }
            KeyCode::Char('x') => self.clear_filters(),
            _ => {}
        }
        None
    }

    /// Live search: every edit re-runs the pipeline.
    fn handle_shop_search(&mut self, key: KeyEvent) -> Option<AsyncAction> {
        match key.code {
            KeyCode::Esc => {
                self.filter.search.clear();
                self.search_cursor = 0;
                self.input_mode = InputMode::Normal;
                self.refilter();
            }
            KeyCode::Enter => self.input_mode = InputMode::Normal,
            KeyCode::Backspace => {
                if let Some(ch) = self.filter.search[..self.search_cursor].chars().next_back() {
                    self.search_cursor -= ch.len_utf8();
                    self.filter.search.remove(self.search_cursor);
                    self.refilter();
                }
            }
            KeyCode::Left => {
                if let Some(ch) = self.filter.search[..self.search_cursor].chars().next_back() {
                    self.search_cursor -= ch.len_utf8();
                }
            }
            KeyCode::Right => {
                if let Some(ch) = self.filter.search[self.search_cursor..].chars().next() {
                    self.search_cursor += ch.len_utf8();
                }
            }
            KeyCode::Char(c) => {
                self.filter.search.insert(self.search_cursor, c);
                self.search_cursor += c.len_utf8();
                self.refilter();
            }
            _ => {}
        }
        None
    }

    fn handle_shop_filter(&mut self, key: KeyEvent) -> Option<AsyncAction> {
        let slots = self.category_names().len() + 1;
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('f') => {
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.select_category((self.category_index + 1) % slots);
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.select_category((self.category_index + slots - 1) % slots);
            }
            _ => {}
        }
        None
    }

    fn handle_cart(&mut self, key: KeyEvent) -> Option<AsyncAction> {
        let id = self.selected_cart_line().map(|line| line.id);
        match key.code {
            KeyCode::Esc | KeyCode::Char('c') => self.panel = Panel::None,
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => {
                if self.cart_selected + 1 < self.cart.len() {
                    self.cart_selected += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.cart_selected = self.cart_selected.saturating_sub(1);
            }
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => {
                if let Some(id) = id {
                    self.cart.increment(id);
                }
            }
            KeyCode::Char('-') | KeyCode::Left => {
                if let Some(id) = id {
                    self.cart.decrement(id);
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = id {
                    self.cart.remove(id);
                }
            }
            KeyCode::Enter => {
                // Checkout is not wired to anything.
                if !self.cart.is_empty() {
                    self.show_notice("Checkout is not available yet".to_string());
                }
            }
            // Page switches from inside the cart close it first.
            KeyCode::Char('1') => return self.navigate(Screen::Home),
            KeyCode::Char('2') => return self.navigate(Screen::Shop),
            KeyCode::Char('3') => return self.navigate(Screen::About),
            _ => {}
        }
        self.clamp_cart_selection();
        None
    }

    fn handle_chat(&mut self, key: KeyEvent) -> Option<AsyncAction> {
        match key.code {
            KeyCode::Esc => self.panel = Panel::None,
            KeyCode::Enter => {
                if let Submit::Accepted { .. } = self.chat.submit(&self.chat_input, Instant::now()) {
                    self.chat_input.clear();
                }
            }
            KeyCode::Backspace => {
                self.chat_input.pop();
            }
            KeyCode::Char(c) => self.chat_input.push(c),
            _ => {}
        }
        None
    }

    fn add_selected_to_cart(&mut self) {
        let Some(product) = self.visible.get(self.selected).cloned() else {
            return;
        };
        self.cart.add(&product);
        self.show_notice(format!("Added {} to cart", product.title));
    }

    fn clear_filters(&mut self) {
        self.filter.clear();
        self.category_index = 0;
        self.search_cursor = 0;
        self.refilter();
    }

    fn select_category(&mut self, index: usize) {
        self.category_index = index;
        self.filter.category = match index {
            0 => CategoryFilter::All,
            i => self
                .category_names()
                .get(i - 1)
                .map_or(CategoryFilter::All, |name| CategoryFilter::Named(name.clone())),
        };
        self.refilter();
    }

    /// Keep the sidebar cursor pointing at the active category after the
    /// category list is replaced.
    fn sync_category_index(&mut self) {
        self.category_index = match &self.filter.category {
            CategoryFilter::All => 0,
            CategoryFilter::Named(name) => self
                .category_names()
                .iter()
                .position(|c| c == name)
                .map_or(0, |i| i + 1),
        };
    }

    fn move_selection(&mut self, delta: i32) {
        let len = self.visible.len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        let current = self.selected as i32;
        let new = (current + delta).clamp(0, len as i32 - 1);
        self.selected = new as usize;
    }

    fn clamp_cart_selection(&mut self) {
        self.cart_selected = self.cart_selected.min(self.cart.len().saturating_sub(1));
    }

    /// Recompute the visible products from the loaded catalog and the filters.
    pub fn refilter(&mut self) {
        self.visible = match &self.products {
            LoadState::Loaded(products) => filter::apply(products, &self.filter),
            _ => Vec::new(),
        };
        if self.selected >= self.visible.len() {
            self.selected = self.visible.len().saturating_sub(1);
        }
    }

    pub fn category_names(&self) -> &[String] {
        self.categories.loaded().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.visible.get(self.selected)
    }

    pub fn selected_cart_line(&self) -> Option<&CartLine> {
        self.cart.lines().nth(self.cart_selected)
    }

    /// Whether any shop filter narrows the listing.
    pub fn filters_active(&self) -> bool {
        !self.filter.category.is_all() || !self.filter.search.is_empty()
    }

    fn show_notice(&mut self, message: String) {
        self.notice = Some(message);
        self.notice_timer = 60; // ~3s at 50ms tick
    }

    /// Advance time-driven state: deliver due chat replies and age the toast.
    pub fn tick(&mut self, now: Instant) {
        self.chat.poll(now);
        if self.notice_timer > 0 {
            self.notice_timer -= 1;
            if self.notice_timer == 0 {
                self.notice = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            Product::new(1, "Walnut Bowl", "home-decoration", 40.0).with_rating(4.1),
            Product::new(2, "Silver Ring", "womens-jewellery", 25.0).with_rating(4.8),
            Product::new(3, "Clay Vase", "home-decoration", 15.0).with_rating(3.9),
        ]
    }

    /// An app on the shop page with the catalog loaded.
    fn shop_app() -> App {
        let mut app = App::new(&CraftsConfig::default_config());
        app.load_current();
        let action = app.navigate(Screen::Shop);
        let generation = match action {
            Some(AsyncAction::LoadShop { generation, .. }) => generation,
            other => panic!("expected shop load, got {other:?}"),
        };
        app.handle_result(AsyncResult::Products {
            generation,
            result: Ok(catalog()),
        });
        app.handle_result(AsyncResult::Categories {
            generation,
            result: Ok(vec!["home-decoration".into(), "womens-jewellery".into()]),
        });
        app
    }

    fn visible_ids(app: &App) -> Vec<u64> {
        app.visible.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_initial_state() {
        let mut app = App::new(&CraftsConfig::default_config());
        assert_eq!(app.screen, Screen::Home);
        assert_eq!(app.panel, Panel::None);
        assert!(!app.should_quit);
        assert!(app.cart.is_empty());
        assert_eq!(app.chat.messages().len(), 1);

        assert_eq!(
            app.load_current(),
            Some(AsyncAction::LoadFeatured { generation: 1 })
        );
        assert!(app.featured.is_loading());
    }

    #[test]
    fn test_quit() {
        let mut app = App::new(&CraftsConfig::default_config());
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_from_chat() {
        let mut app = App::new(&CraftsConfig::default_config());
        app.handle_key(key(KeyCode::Char('a')));
        assert_eq!(app.panel, Panel::Chat);
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_navigation_keys() {
        let mut app = App::new(&CraftsConfig::default_config());
        assert!(matches!(
            app.handle_key(key(KeyCode::Char('2'))),
            Some(AsyncAction::LoadShop { limit: 30, .. })
        ));
        assert_eq!(app.screen, Screen::Shop);

        assert_eq!(app.handle_key(key(KeyCode::Tab)), None);
        assert_eq!(app.screen, Screen::About);

        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.screen, Screen::Home);

        app.handle_key(key(KeyCode::BackTab));
        assert_eq!(app.screen, Screen::About);

        // Same page: no reload.
        assert_eq!(app.handle_key(key(KeyCode::Char('3'))), None);
    }

    #[test]
    fn test_home_enter_goes_to_shop() {
        let mut app = App::new(&CraftsConfig::default_config());
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.screen, Screen::Shop);
    }

    #[test]
    fn test_stale_result_dropped() {
        let mut app = App::new(&CraftsConfig::default_config());
        app.load_current(); // home, generation 1
        app.navigate(Screen::Shop); // generation 2

        app.handle_result(AsyncResult::Featured {
            generation: 1,
            result: Ok(catalog()),
        });
        assert!(app.featured.is_loading());

        // A late shop result after leaving the shop is dropped too.
        app.navigate(Screen::About);
        app.handle_result(AsyncResult::Products {
            generation: 2,
            result: Ok(catalog()),
        });
        assert!(app.products.is_loading());
        assert!(app.visible.is_empty());
    }

    #[test]
    fn test_failed_load() {
        let mut app = App::new(&CraftsConfig::default_config());
        let generation = match app.load_current() {
            Some(AsyncAction::LoadFeatured { generation }) => generation,
            other => panic!("unexpected {other:?}"),
        };
        app.handle_result(AsyncResult::Featured {
            generation,
            result: Err("connection refused".into()),
        });
        assert!(app.featured.is_failed());
    }

    #[test]
    fn test_refresh_bumps_generation() {
        let mut app = shop_app();
        let before = app.generation;
        let action = app.handle_key(key(KeyCode::Char('r')));
        assert_eq!(
            action,
            Some(AsyncAction::LoadShop {
                generation: before + 1,
                limit: 30
            })
        );
        assert!(app.products.is_loading());
    }

    #[test]
    fn test_shop_loaded_shows_all() {
        let app = shop_app();
        assert_eq!(visible_ids(&app), vec![1, 2, 3]);
        assert_eq!(app.category_names().len(), 2);
    }

    #[test]
    fn test_selection_navigation() {
        let mut app = shop_app();
        assert_eq!(app.selected, 0);
        app.handle_key(key(KeyCode::Char('j')));
        app.handle_key(key(KeyCode::Char('j')));
        assert_eq!(app.selected, 2);
        app.handle_key(key(KeyCode::Char('j')));
        assert_eq!(app.selected, 2);
        app.handle_key(key(KeyCode::Char('g')));
        assert_eq!(app.selected, 0);
        app.handle_key(key(KeyCode::Char('k')));
        assert_eq!(app.selected, 0);
        app.handle_key(key(KeyCode::Char('G')));
        assert_eq!(app.selected, 2);
    }

    #[test]
    fn test_live_search() {
        let mut app = shop_app();
        app.handle_key(key(KeyCode::Char('/')));
        assert_eq!(app.input_mode, InputMode::Search);

        type_text(&mut app, "vase");
        assert_eq!(app.filter.search, "vase");
        assert_eq!(visible_ids(&app), vec![3]);

        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.filter.search, "vas");
        assert_eq!(app.search_cursor, 3);

        // Enter keeps the term, Esc clears it.
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(visible_ids(&app), vec![3]);

        app.handle_key(key(KeyCode::Char('/')));
        app.handle_key(key(KeyCode::Esc));
        assert!(app.filter.search.is_empty());
        assert_eq!(visible_ids(&app), vec![1, 2, 3]);
    }

    #[test]
    fn test_search_cursor_multibyte() {
        let mut app = shop_app();
        app.handle_key(key(KeyCode::Char('/')));
        type_text(&mut app, "é");
        assert_eq!(app.search_cursor, 2);
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.search_cursor, 0);
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.search_cursor, 2);
        app.handle_key(key(KeyCode::Backspace));
        assert!(app.filter.search.is_empty());
    }

    #[test]
    fn test_category_cycling() {
        let mut app = shop_app();
        app.handle_key(key(KeyCode::Char('f')));
        assert_eq!(app.input_mode, InputMode::Filter);

        app.handle_key(key(KeyCode::Right));
        assert_eq!(
            app.filter.category,
            CategoryFilter::Named("home-decoration".into())
        );
        assert_eq!(visible_ids(&app), vec![1, 3]);

        app.handle_key(key(KeyCode::Right));
        assert_eq!(visible_ids(&app), vec![2]);

        // Wrap back to all.
        app.handle_key(key(KeyCode::Right));
        assert!(app.filter.category.is_all());

        // Wrap around left.
        app.handle_key(key(KeyCode::Left));
        assert_eq!(
            app.filter.category,
            CategoryFilter::Named("womens-jewellery".into())
        );
    }

    #[test]
    fn test_sort_cycle_and_clear() {
        let mut app = shop_app();
        app.handle_key(key(KeyCode::Char('s')));
        assert_eq!(app.filter.sort, SortKey::PriceAscending);
        assert_eq!(visible_ids(&app), vec![3, 2, 1]);

        app.handle_key(key(KeyCode::Char('f')));
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Esc));
        assert!(app.filters_active());

        app.handle_key(key(KeyCode::Char('x')));
        assert!(!app.filters_active());
        assert_eq!(app.category_index, 0);
        // Clearing keeps the sort.
        assert_eq!(app.filter.sort, SortKey::PriceAscending);
        assert_eq!(visible_ids(&app), vec![3, 2, 1]);
    }

    #[test]
    fn test_no_matches_is_empty_not_error() {
        let mut app = shop_app();
        app.handle_key(key(KeyCode::Char('/')));
        type_text(&mut app, "zzz");
        assert!(app.visible.is_empty());
        assert!(app.products.loaded().is_some());
        assert_eq!(app.selected, 0);
        // Adding with nothing selected is a no-op.
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Enter));
        assert!(app.cart.is_empty());
    }

    #[test]
    fn test_add_to_cart_updates_badge() {
        let mut app = shop_app();
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Char('+')));
        app.handle_key(key(KeyCode::Char('j')));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.cart.len(), 2);
        assert_eq!(app.cart.item_count(), 3);
        assert_eq!(app.cart.total(), 105.0);
        assert_eq!(app.notice.as_deref(), Some("Added Silver Ring to cart"));
    }

    #[test]
    fn test_cart_panel_keys() {
        let mut app = shop_app();
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Char('j')));
        app.handle_key(key(KeyCode::Enter));

        app.handle_key(key(KeyCode::Char('c')));
        assert_eq!(app.panel, Panel::Cart);

        app.handle_key(key(KeyCode::Char('+')));
        assert_eq!(app.cart.get(1).map(|l| l.quantity), Some(2));

        app.handle_key(key(KeyCode::Char('j')));
        assert_eq!(app.selected_cart_line().map(|l| l.id), Some(2));
        app.handle_key(key(KeyCode::Char('-')));
        assert!(app.cart.get(2).is_none());
        // Selection clamps to the remaining line.
        assert_eq!(app.cart_selected, 0);

        app.handle_key(key(KeyCode::Char('d')));
        assert!(app.cart.is_empty());

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.panel, Panel::None);
    }

    #[test]
    fn test_navigation_closes_cart() {
        let mut app = shop_app();
        app.handle_key(key(KeyCode::Char('c')));
        app.handle_key(key(KeyCode::Char('3')));
        assert_eq!(app.screen, Screen::About);
        assert_eq!(app.panel, Panel::None);
    }

    #[test]
    fn test_chat_submit_and_reply() {
        let mut app = App::new(&CraftsConfig::default_config());
        app.handle_key(key(KeyCode::Char('a')));
        type_text(&mut app, "refund?");
        assert_eq!(app.chat_input, "refund?");

        app.handle_key(key(KeyCode::Enter));
        assert!(app.chat_input.is_empty());
        assert_eq!(app.chat.messages().len(), 2);
        assert!(app.chat.is_typing());

        app.tick(Instant::now() + Duration::from_secs(5));
        assert_eq!(app.chat.messages().len(), 3);
        assert!(app.chat.messages()[2].is_from_bot());
    }

    #[test]
    fn test_chat_blank_rejected() {
        let mut app = App::new(&CraftsConfig::default_config());
        app.handle_key(key(KeyCode::Char('a')));
        type_text(&mut app, "   ");
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.chat.messages().len(), 1);
        assert_eq!(app.panel, Panel::Chat);
    }

    #[test]
    fn test_chat_keys_are_text() {
        let mut app = App::new(&CraftsConfig::default_config());
        app.handle_key(key(KeyCode::Char('a')));
        type_text(&mut app, "q2c");
        assert!(!app.should_quit);
        assert_eq!(app.screen, Screen::Home);
        assert_eq!(app.chat_input, "q2c");
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.panel, Panel::None);
    }

    #[test]
    fn test_notice_timer() {
        let mut app = shop_app();
        app.handle_key(key(KeyCode::Enter));
        assert!(app.notice.is_some());
        let now = Instant::now();
        for _ in 0..59 {
            app.tick(now);
        }
        assert!(app.notice.is_some());
        app.tick(now);
        assert!(app.notice.is_none());
    }
}
