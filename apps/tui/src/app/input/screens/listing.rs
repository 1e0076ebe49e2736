use crate::app::state::App;
use crossterm::event::KeyCode;
use trove_storefront::navigation::Page;

pub fn handle_listing_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up => app.select_prev(),
        KeyCode::Down => app.select_next(),
        KeyCode::PageUp => {
            app.selected_index = app.selected_index.saturating_sub(5);
        }
        KeyCode::PageDown => {
            for _ in 0..5 {
                app.select_next();
            }
        }
        KeyCode::Home => {
            app.selected_index = 0;
        }
        KeyCode::Enter => app.open_selected_detail(),
        KeyCode::Char('a') => app.add_to_cart(),
        KeyCode::Char('l') => app.open_location_picker(),
        KeyCode::Char('/') => app.start_search(),
        KeyCode::Esc if !app.search.query.is_empty() => app.clear_search(),
        KeyCode::Left | KeyCode::Right => {
            let forward = key == KeyCode::Right;
            match app.navigation.page() {
                Page::Category => app.cycle_category(forward),
                Page::Upcoming | Page::AllExperiences => app.cycle_city(forward),
                _ => {}
            }
        }
        _ => {}
    }
}
