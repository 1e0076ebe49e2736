use crate::app::state::App;
use crossterm::event::KeyCode;
use trove_storefront::navigation::Page;

pub fn handle_detail_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up => {
            app.detail_scroll = app.detail_scroll.saturating_sub(1);
        }
        KeyCode::Down => {
            app.detail_scroll = app.detail_scroll.saturating_add(1);
        }
        KeyCode::Char('a') => app.add_to_cart(),
        KeyCode::Char('l') => app.open_location_picker(),
        KeyCode::Esc | KeyCode::Backspace => app.go_to(Page::AllExperiences),
        _ => {}
    }
}
