use crate::domain::Experience;

/// Value stored for "every location" / "every category".
pub const ALL_SELECTION: &str = "All";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Home,
    Upcoming,
    AllExperiences,
    Category,
    Groups,
    Gifting,
    About,
    Contact,
    Cart,
    Profile,
    ExperienceDetail,
}

impl Page {
    pub const ALL: [Self; 11] = [
        Self::Home,
        Self::Upcoming,
        Self::AllExperiences,
        Self::Category,
        Self::Groups,
        Self::Gifting,
        Self::About,
        Self::Contact,
        Self::Cart,
        Self::Profile,
        Self::ExperienceDetail,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Upcoming => "upcoming",
            Self::AllExperiences => "all-experiences",
            Self::Category => "category",
            Self::Groups => "groups",
            Self::Gifting => "gifting",
            Self::About => "about",
            Self::Contact => "contact",
            Self::Cart => "cart",
            Self::Profile => "profile",
            Self::ExperienceDetail => "experience-detail",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_lowercase();
        Self::ALL.into_iter().find(|page| page.as_str() == value)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Upcoming => "Upcoming",
            Self::AllExperiences => "All Experiences",
            Self::Category => "Category",
            Self::Groups => "Groups",
            Self::Gifting => "Gifting",
            Self::About => "About",
            Self::Contact => "Contact",
            Self::Cart => "Cart",
            Self::Profile => "Profile",
            Self::ExperienceDetail => "Experience",
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::ALL.len() {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|page| *page == self)
            .unwrap_or_default()
    }
}

/// Parameter carried by a navigation, tagged with what it selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavParam {
    Category(String),
    Location(String),
}

impl NavParam {
    pub fn location(value: &str) -> Self {
        Self::Location(value.to_string())
    }

    pub fn category(value: &str) -> Self {
        Self::Category(value.to_string())
    }

    /// Parameter used when a navigation names none: "All" for the page's
    /// own kind of filter.
    pub fn default_for(page: Page) -> Self {
        match page {
            Page::Category => Self::category(ALL_SELECTION),
            _ => Self::location(ALL_SELECTION),
        }
    }
}

/// What is on screen and the parameters the page needs.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationState {
    page: Page,
    selected_location: String,
    selected_category: String,
    selected_experience: Option<Experience>,
    scroll_requested: bool,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            page: Page::Home,
            selected_location: ALL_SELECTION.to_string(),
            selected_category: String::new(),
            selected_experience: None,
            scroll_requested: false,
        }
    }
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn navigate_to(&mut self, page: Page, param: NavParam) {
        self.page = page;
        match param {
            NavParam::Category(category) => self.selected_category = category,
            NavParam::Location(location) => self.selected_location = location,
        }
        self.scroll_requested = true;
    }

    pub fn navigate(&mut self, page: Page) {
        self.navigate_to(page, NavParam::default_for(page));
    }

    pub fn view_experience_detail(&mut self, experience: Experience) {
        self.selected_experience = Some(experience);
        self.page = Page::ExperienceDetail;
        self.scroll_requested = true;
    }

    pub const fn page(&self) -> Page {
        self.page
    }

    pub fn selected_location(&self) -> &str {
        &self.selected_location
    }

    pub fn selected_category(&self) -> &str {
        &self.selected_category
    }

    pub const fn selected_experience(&self) -> Option<&Experience> {
        self.selected_experience.as_ref()
    }

    /// The experience to render, present only on the detail page with a
    /// selection.
    pub fn detail_experience(&self) -> Option<&Experience> {
        if self.page == Page::ExperienceDetail {
            self.selected_experience.as_ref()
        } else {
            None
        }
    }

    /// Consumes the pending scroll-to-top request raised by the last
    /// navigation.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn experience(id: &str) -> Experience {
        Experience {
            id: id.to_string(),
            ..Experience::default()
        }
    }

    #[test]
    fn initial_state_is_home_without_selection() {
        let state = NavigationState::new();

        assert_eq!(state.page(), Page::Home);
        assert_eq!(state.selected_location(), "All");
        assert_eq!(state.selected_category(), "");
        assert!(state.selected_experience().is_none());
    }

    #[test]
    fn category_param_sets_category_only() {
        let mut state = NavigationState::new();
        state.navigate_to(Page::Upcoming, NavParam::location("Pune"));

        state.navigate_to(Page::Category, NavParam::category("Wellness"));

        assert_eq!(state.page(), Page::Category);
        assert_eq!(state.selected_category(), "Wellness");
        assert_eq!(state.selected_location(), "Pune");
    }

    #[test]
    fn default_param_resets_location_to_all() {
        let mut state = NavigationState::new();
        state.navigate_to(Page::Upcoming, NavParam::location("Mumbai"));

        state.navigate(Page::About);

        assert_eq!(state.page(), Page::About);
        assert_eq!(state.selected_location(), "All");
    }

    #[test]
    fn every_page_is_reachable_from_every_other() {
        let mut state = NavigationState::new();
        for from in Page::ALL {
            for to in Page::ALL {
                state.navigate(from);
                state.navigate(to);
                assert_eq!(state.page(), to);
            }
        }
    }

    #[test]
    fn detail_without_selection_renders_nothing() {
        let mut state = NavigationState::new();

        state.navigate(Page::ExperienceDetail);

        assert_eq!(state.page(), Page::ExperienceDetail);
        assert!(state.detail_experience().is_none());
    }

    #[test]
    fn view_detail_selects_and_switches_page() {
        let mut state = NavigationState::new();

        state.view_experience_detail(experience("e1"));

        assert_eq!(state.page(), Page::ExperienceDetail);
        assert_eq!(state.detail_experience().map(|e| e.id.as_str()), Some("e1"));

        state.navigate(Page::Cart);
        assert!(state.detail_experience().is_none());
    }

    #[test]
    fn navigation_requests_scroll_once() {
        let mut state = NavigationState::new();
        assert!(!state.take_scroll_request());

        state.navigate(Page::Gifting);

        assert!(state.take_scroll_request());
        assert!(!state.take_scroll_request());
    }

    #[test]
    fn page_names_round_trip_through_parse() {
        for page in Page::ALL {
            assert_eq!(Page::parse(page.as_str()), Some(page));
            assert_eq!(Page::from_index(page.index()), Some(page));
        }
        assert_eq!(Page::parse("checkout"), None);
        assert_eq!(Page::from_index(11), None);
    }
}
