use crate::app::input::helpers::digit_to_nav_slot;
use crate::app::state::{App, NAV_PAGES};
use crossterm::event::KeyCode;
use trove_storefront::navigation::Page;

mod cart;
mod concierge;
mod detail;
mod listing;
mod location_picker;
mod search;

/// Routes a key press. Overlays take the key first, then global page
/// navigation, then the current page.
pub fn dispatch_input(app: &mut App, key: KeyCode) {
    if key == KeyCode::F(1) {
        app.show_help = !app.show_help;
        return;
    }
    if app.show_help {
        app.show_help = key != KeyCode::Esc;
        return;
    }

    if app.concierge.open {
        concierge::handle_concierge_input(app, key);
        return;
    }

    if app.location_picker.is_some() {
        location_picker::handle_location_picker_input(app, key);
        return;
    }

    if app.search.active {
        search::handle_search_input(app, key);
        return;
    }

    if handle_global_input(app, key) {
        return;
    }

    match app.navigation.page() {
        Page::Home | Page::Upcoming | Page::AllExperiences | Page::Category => {
            listing::handle_listing_input(app, key);
        }
        Page::ExperienceDetail => detail::handle_detail_input(app, key),
        Page::Cart => cart::handle_cart_input(app, key),
        Page::Groups | Page::Gifting | Page::About | Page::Contact | Page::Profile => {}
    }
}

fn handle_global_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Tab => app.next_page(),
        KeyCode::BackTab => app.prev_page(),
        KeyCode::Char('c') => app.open_concierge(),
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Char(ch) if ch.is_ascii_digit() => {
            if let Some(page) = digit_to_nav_slot(ch).and_then(|slot| NAV_PAGES.get(slot)) {
                app.go_to(*page);
            }
        }
        _ => return false,
    }
    true
}
