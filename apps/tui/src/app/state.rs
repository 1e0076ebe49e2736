use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate};
use color_eyre::Result;
use throbber_widgets_tui::ThrobberState;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{error, info};

use trove_storefront::api::ApiClient;
use trove_storefront::cart::{Cart, CartItem};
use trove_storefront::catalogue::{self, StatusPolicy, CATEGORIES};
use trove_storefront::concierge::{self, Recommendation};
use trove_storefront::config::AppConfig;
use trove_storefront::domain::{CityFilter, Experience, Location, ALL_CITIES_CODE};
use trove_storefront::navigation::{NavParam, NavigationState, Page, ALL_SELECTION};

use crate::app::actions::{AppActions, AppEvent};

/// How often the location store snapshot is re-read.
const LOCATION_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Pages reachable from the navbar, in tab order.
pub const NAV_PAGES: [Page; 10] = [
    Page::Home,
    Page::Upcoming,
    Page::AllExperiences,
    Page::Category,
    Page::Groups,
    Page::Gifting,
    Page::About,
    Page::Contact,
    Page::Cart,
    Page::Profile,
];

/// Navbar slot highlighted while an experience detail is open.
const DETAIL_NAV_PAGE: Page = Page::AllExperiences;

/// Featured items shown on the home page.
const HOME_FEATURED: usize = 6;

#[derive(Debug, Default)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
}

#[derive(Debug, Default)]
pub struct ConciergeState {
    pub open: bool,
    pub input: String,
    pub results: Vec<Recommendation>,
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub navigation: NavigationState,
    pub cart: Cart,
    pub actions: AppActions,
    events: UnboundedReceiver<AppEvent>,
    pub policy: StatusPolicy,
    pub experiences: Vec<Experience>,
    pub experiences_loading: bool,
    pub experiences_error: Option<String>,
    pub locations: Vec<Location>,
    pub city_filters: Vec<CityFilter>,
    pub locations_loading: bool,
    pub selected_index: usize,
    pub cart_selection_index: usize,
    pub category_index: usize,
    pub search: SearchState,
    pub concierge: ConciergeState,
    /// Index into `locations` while the "reserve at" picker is open.
    pub location_picker: Option<usize>,
    pub status_message: String,
    pub show_help: bool,
    pub detail_scroll: u16,
    pub throbber: ThrobberState,
    pub today: NaiveDate,
    last_location_poll: Instant,
}

impl App {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Arc::new(ApiClient::with_timeout(
            &config.api_base_url,
            config.http_timeout,
        )?);
        let (tx, events) = mpsc::unbounded_channel();
        let actions = AppActions::new(client, tx);
        let city_filters = actions.store().city_filters();

        Ok(Self {
            running: true,
            navigation: NavigationState::new(),
            cart: Cart::new(),
            actions,
            events,
            policy: config.status_policy,
            experiences: Vec::new(),
            experiences_loading: false,
            experiences_error: None,
            locations: Vec::new(),
            city_filters,
            locations_loading: false,
            selected_index: 0,
            cart_selection_index: 0,
            category_index: 0,
            search: SearchState::default(),
            concierge: ConciergeState::default(),
            location_picker: None,
            status_message: String::new(),
            show_help: false,
            detail_scroll: 0,
            throbber: ThrobberState::default(),
            today: Local::now().date_naive(),
            last_location_poll: Instant::now(),
        })
    }

    /// Kicks off the initial location and experience loads.
    pub fn start(&mut self) {
        self.locations_loading = true;
        self.experiences_loading = true;
        self.actions.load_locations();
        self.actions.load_experiences();
    }

    /// Per-frame housekeeping: drains finished background work and re-reads
    /// the location store on its poll interval.
    pub fn tick(&mut self) {
        self.throbber.calc_next();

        while let Ok(event) = self.events.try_recv() {
            self.apply_event(event);
        }

        if self.last_location_poll.elapsed() >= LOCATION_POLL_INTERVAL {
            self.sync_locations();
        }

        if self.navigation.take_scroll_request() {
            self.selected_index = 0;
            self.detail_scroll = 0;
        }
    }

    pub fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::ExperiencesLoaded(Ok(all)) => {
                self.experiences = catalogue::displayable(&all, self.policy);
                self.experiences_loading = false;
                self.experiences_error = None;
                self.clamp_selection();
                info!(
                    fetched = all.len(),
                    shown = self.experiences.len(),
                    "experiences loaded"
                );
                self.status_message = format!("Loaded {} experiences", self.experiences.len());
            }
            AppEvent::ExperiencesLoaded(Err(e)) => {
                error!(error = %e, "failed to load experiences");
                self.experiences.clear();
                self.experiences_loading = false;
                self.experiences_error = Some(e.to_string());
                self.selected_index = 0;
                self.status_message = "Could not load experiences. Press r to retry".to_string();
            }
            AppEvent::LocationsReady => self.sync_locations(),
        }
    }

    pub fn sync_locations(&mut self) {
        let store = self.actions.store();
        self.locations = store.locations();
        self.city_filters = store.city_filters();
        self.locations_loading = store.is_loading();
        self.last_location_poll = Instant::now();
    }

    pub fn refresh(&mut self) {
        self.experiences_loading = true;
        self.locations_loading = true;
        self.actions.refresh_experiences();
        self.actions.refresh_locations();
        self.status_message = "Refreshing catalogue...".to_string();
    }

    pub fn is_loading(&self) -> bool {
        self.experiences_loading || self.locations_loading
    }

    // Navigation

    pub fn go_to(&mut self, page: Page) {
        self.search = SearchState::default();
        if page == Page::Category {
            let category = CATEGORIES[self.category_index % CATEGORIES.len()];
            self.navigation
                .navigate_to(page, NavParam::category(category));
        } else {
            self.navigation.navigate(page);
        }

        let failed = self.experiences_error.is_some() && !self.experiences_loading;
        if failed && lists_experiences(page) {
            info!(page = page.as_str(), "retrying experience load");
            self.experiences_loading = true;
            self.actions.load_experiences();
            self.status_message = "Retrying experiences...".to_string();
        }
    }

    pub fn next_page(&mut self) {
        let current = self.nav_index();
        self.go_to(NAV_PAGES[(current + 1) % NAV_PAGES.len()]);
    }

    pub fn prev_page(&mut self) {
        let current = self.nav_index();
        self.go_to(NAV_PAGES[(current + NAV_PAGES.len() - 1) % NAV_PAGES.len()]);
    }

    /// Position of the current page in the navbar. The detail page sits
    /// under "All Experiences".
    pub fn nav_index(&self) -> usize {
        let current = match self.navigation.page() {
            Page::ExperienceDetail => DETAIL_NAV_PAGE,
            page => page,
        };
        NAV_PAGES
            .iter()
            .position(|page| *page == current)
            .unwrap_or_default()
    }

    /// Location chosen in the city filter bar, or `None` for every city.
    pub fn active_city(&self) -> Option<&CityFilter> {
        let selected = self.navigation.selected_location();
        if selected == ALL_SELECTION {
            return None;
        }
        self.city_filters
            .iter()
            .find(|filter| filter.code != ALL_CITIES_CODE && filter.name == selected)
    }

    pub fn city_filter_index(&self) -> usize {
        self.active_city()
            .and_then(|active| self.city_filters.iter().position(|f| f == active))
            .unwrap_or(0)
    }

    /// Moves the city filter one entry, keeping the current page.
    pub fn cycle_city(&mut self, forward: bool) {
        let len = self.city_filters.len();
        if len == 0 {
            return;
        }
        let current = self.city_filter_index();
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        let filter = &self.city_filters[next];
        let name = if filter.code == ALL_CITIES_CODE {
            ALL_SELECTION.to_string()
        } else {
            filter.name.clone()
        };
        let page = self.navigation.page();
        self.navigation.navigate_to(page, NavParam::Location(name));
    }

    pub fn cycle_category(&mut self, forward: bool) {
        let len = CATEGORIES.len();
        self.category_index = if forward {
            (self.category_index + 1) % len
        } else {
            (self.category_index + len - 1) % len
        };
        self.go_to(Page::Category);
    }

    // Catalogue

    /// Experiences listed on the current page after city, category and
    /// search filtering.
    pub fn visible_experiences(&self) -> Vec<Experience> {
        let code = self
            .active_city()
            .map_or(ALL_CITIES_CODE, |filter| filter.code.as_str());

        let listed = match self.navigation.page() {
            Page::Home => catalogue::upcoming(&self.experiences, self.today)
                .into_iter()
                .take(HOME_FEATURED)
                .collect(),
            Page::Upcoming => {
                catalogue::upcoming(&catalogue::filter_by_city(&self.experiences, code), self.today)
            }
            Page::AllExperiences => catalogue::filter_by_city(&self.experiences, code),
            Page::Category => {
                catalogue::in_category(&self.experiences, self.navigation.selected_category())
            }
            _ => Vec::new(),
        };

        catalogue::search(&listed, &self.search.query)
    }

    pub fn selected_experience(&self) -> Option<Experience> {
        self.visible_experiences().get(self.selected_index).cloned()
    }

    pub fn select_next(&mut self) {
        let len = self.visible_experiences().len();
        if len > 0 && self.selected_index + 1 < len {
            self.selected_index += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_experiences().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    pub fn open_selected_detail(&mut self) {
        if let Some(experience) = self.selected_experience() {
            self.navigation.view_experience_detail(experience);
        }
    }

    /// The experience an add-to-cart key acts on: the detail subject on the
    /// detail page, otherwise the highlighted row.
    fn cart_target(&self) -> Option<Experience> {
        if self.navigation.page() == Page::ExperienceDetail {
            self.navigation.detail_experience().cloned()
        } else {
            self.selected_experience()
        }
    }

    pub fn add_to_cart(&mut self) {
        match self.cart_target() {
            Some(experience) => {
                self.status_message = format!("Added {} to cart", experience.heading);
                self.cart.add(CartItem::from_experience(experience));
            }
            None => self.status_message = "Nothing selected".to_string(),
        }
    }

    pub fn open_location_picker(&mut self) {
        if self.cart_target().is_none() {
            self.status_message = "Nothing selected".to_string();
            return;
        }
        if self.locations.is_empty() {
            self.status_message = "Locations are still loading".to_string();
            return;
        }
        self.location_picker = Some(0);
    }

    /// Adds the current target reserved at the picked location and closes
    /// the picker.
    pub fn confirm_location_pick(&mut self) {
        let Some(index) = self.location_picker.take() else {
            return;
        };
        let (Some(experience), Some(location)) = (self.cart_target(), self.locations.get(index))
        else {
            return;
        };
        self.status_message = format!("Added {} in {} to cart", experience.heading, location.name);
        self.cart
            .add(CartItem::at_location(experience, &location.name));
    }

    // Cart

    pub fn selected_cart_id(&self) -> Option<String> {
        self.cart
            .items()
            .get(self.cart_selection_index)
            .map(|item| item.id.clone())
    }

    pub fn change_cart_quantity(&mut self, delta: i64) {
        if let Some(id) = self.selected_cart_id() {
            self.cart.update_quantity(&id, delta);
        }
    }

    pub fn remove_cart_selection(&mut self) {
        if let Some(id) = self.selected_cart_id() {
            self.cart.remove(&id);
            if self.cart_selection_index >= self.cart.len() {
                self.cart_selection_index = self.cart.len().saturating_sub(1);
            }
            self.status_message = "Removed from cart".to_string();
        }
    }

    // Concierge

    pub fn open_concierge(&mut self) {
        self.concierge = ConciergeState {
            open: true,
            ..ConciergeState::default()
        };
    }

    pub fn close_concierge(&mut self) {
        self.concierge.open = false;
    }

    pub fn submit_concierge(&mut self) {
        self.concierge.results = concierge::search(&self.concierge.input);
    }

    // Search

    pub fn start_search(&mut self) {
        self.search.active = true;
    }

    pub fn clear_search(&mut self) {
        self.search = SearchState::default();
        self.selected_index = 0;
    }

    pub fn push_search_char(&mut self, ch: char) {
        self.search.query.push(ch);
        self.selected_index = 0;
    }

    pub fn pop_search_char(&mut self) {
        self.search.query.pop();
        self.selected_index = 0;
    }
}

const fn lists_experiences(page: Page) -> bool {
    matches!(
        page,
        Page::Home | Page::Upcoming | Page::AllExperiences | Page::Category
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use trove_storefront::domain::ExperienceStatus;

    fn config(base: &str) -> AppConfig {
        AppConfig {
            api_base_url: base.to_string(),
            status_policy: StatusPolicy::default(),
            http_timeout: Some(Duration::from_secs(2)),
            log_file: PathBuf::from("trove-test.log"),
            debug: false,
        }
    }

    fn experience(id: &str, status: ExperienceStatus, price: f64) -> Experience {
        Experience {
            id: id.to_string(),
            heading: format!("Experience {id}"),
            status,
            price_per_participant: price,
            location: Location::new(id, "MUM01", "Mumbai"),
            ..Experience::default()
        }
    }

    fn app_with(experiences: Vec<Experience>) -> Result<App> {
        let mut app = App::new(&config("http://127.0.0.1:9"))?;
        app.apply_event(AppEvent::ExperiencesLoaded(Ok(Arc::new(experiences))));
        Ok(app)
    }

    #[test]
    fn loaded_experiences_respect_status_policy() -> Result<()> {
        let app = app_with(vec![
            experience("e1", ExperienceStatus::Active, 100.0),
            experience("e2", ExperienceStatus::Draft, 100.0),
            experience("e3", ExperienceStatus::Cancelled, 100.0),
        ])?;

        let ids: Vec<_> = app.experiences.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["e1", "e2"]);
        assert!(!app.experiences_loading);
        Ok(())
    }

    #[test]
    fn failed_load_degrades_to_empty_catalogue() -> Result<()> {
        let mut app = app_with(vec![experience("e1", ExperienceStatus::Active, 1.0)])?;

        app.apply_event(AppEvent::ExperiencesLoaded(Err(
            trove_storefront::ApiError::Task("boom".to_string()),
        )));

        assert!(app.experiences.is_empty());
        assert!(app.experiences_error.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn reentering_a_listing_retries_failed_load() -> Result<()> {
        let mut app = app_with(Vec::new())?;
        app.apply_event(AppEvent::ExperiencesLoaded(Err(
            trove_storefront::ApiError::Task("boom".to_string()),
        )));
        assert!(!app.experiences_loading);

        app.go_to(Page::Cart);
        assert!(!app.experiences_loading);

        app.go_to(Page::AllExperiences);
        assert!(app.experiences_loading);
        assert!(app.is_loading());

        app.go_to(Page::Upcoming);
        assert!(app.experiences_loading);
        Ok(())
    }

    #[test]
    fn detail_page_highlights_all_experiences_tab() -> Result<()> {
        let mut app = app_with(Vec::new())?;

        app.go_to(Page::ExperienceDetail);

        assert_eq!(NAV_PAGES[app.nav_index()], Page::AllExperiences);
        Ok(())
    }

    #[test]
    fn detail_then_add_puts_subject_in_cart() -> Result<()> {
        let mut app = app_with(vec![
            experience("e1", ExperienceStatus::Active, 2000.0),
            experience("e2", ExperienceStatus::Active, 1500.0),
        ])?;
        app.go_to(Page::AllExperiences);
        app.tick();
        app.select_next();

        app.open_selected_detail();
        app.add_to_cart();
        app.add_to_cart();

        assert_eq!(app.navigation.page(), Page::ExperienceDetail);
        assert_eq!(app.cart.len(), 1);
        assert_eq!(app.cart.items()[0].id, "e2");
        assert_eq!(app.cart.count(), 2);
        Ok(())
    }

    #[test]
    fn detail_page_without_selection_adds_nothing() -> Result<()> {
        let mut app = app_with(vec![experience("e1", ExperienceStatus::Active, 1.0)])?;

        app.go_to(Page::ExperienceDetail);
        app.add_to_cart();

        assert!(app.navigation.detail_experience().is_none());
        assert!(app.cart.is_empty());
        Ok(())
    }

    #[test]
    fn location_pick_adds_qualified_item() -> Result<()> {
        let mut app = app_with(vec![experience("e1", ExperienceStatus::Active, 500.0)])?;
        app.locations = vec![Location::new("1", "PUNE01", "Pune")];
        app.go_to(Page::AllExperiences);

        app.open_location_picker();
        app.confirm_location_pick();

        assert_eq!(app.location_picker, None);
        let item = app.cart.get("e1-Pune");
        assert_eq!(item.and_then(|i| i.city_tag.as_deref()), Some("PUN"));
        Ok(())
    }

    #[test]
    fn cart_keys_adjust_and_remove_selection() -> Result<()> {
        let mut app = app_with(vec![experience("e1", ExperienceStatus::Active, 10.0)])?;
        app.go_to(Page::AllExperiences);
        app.add_to_cart();
        app.go_to(Page::Cart);

        app.change_cart_quantity(3);
        assert_eq!(app.cart.count(), 4);
        app.change_cart_quantity(-10);
        assert_eq!(app.cart.count(), 1);

        app.remove_cart_selection();
        assert!(app.cart.is_empty());
        assert_eq!(app.cart_selection_index, 0);
        Ok(())
    }

    #[test]
    fn city_filter_narrows_listing() -> Result<()> {
        let mut pune = experience("e2", ExperienceStatus::Active, 1.0);
        pune.location = Location::new("p", "PUNE01", "Pune");
        let mut app = app_with(vec![experience("e1", ExperienceStatus::Active, 1.0), pune])?;
        app.city_filters = vec![
            CityFilter::all(),
            CityFilter::from(&Location::new("m", "MUM01", "Mumbai")),
            CityFilter::from(&Location::new("p", "PUNE01", "Pune")),
        ];
        app.go_to(Page::AllExperiences);
        assert_eq!(app.visible_experiences().len(), 2);

        app.cycle_city(false);

        assert_eq!(app.navigation.selected_location(), "Pune");
        assert_eq!(app.navigation.page(), Page::AllExperiences);
        let ids: Vec<_> = app.visible_experiences().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, ["e2"]);

        app.cycle_city(true);
        assert_eq!(app.navigation.selected_location(), "All");
        Ok(())
    }

    #[test]
    fn tab_cycles_through_navbar_pages() -> Result<()> {
        let mut app = app_with(Vec::new())?;

        app.prev_page();
        assert_eq!(app.navigation.page(), Page::Profile);
        app.next_page();
        assert_eq!(app.navigation.page(), Page::Home);
        app.next_page();
        app.next_page();
        app.next_page();
        assert_eq!(app.navigation.page(), Page::Category);
        assert_eq!(app.navigation.selected_category(), "Alcobev");
        Ok(())
    }

    #[test]
    fn concierge_submit_uses_static_recommendations() -> Result<()> {
        let mut app = app_with(Vec::new())?;

        app.open_concierge();
        app.concierge.input = "perfume".to_string();
        app.submit_concierge();

        assert!(app.concierge.open);
        assert_eq!(app.concierge.results.len(), 1);
        Ok(())
    }
}
