use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_location_picker_input(app: &mut App, key: KeyCode) {
    let len = app.locations.len();
    let Some(index) = app.location_picker else {
        return;
    };

    match key {
        KeyCode::Esc => app.location_picker = None,
        KeyCode::Up => app.location_picker = Some(wrap_decrement(index, len)),
        KeyCode::Down => app.location_picker = Some(wrap_increment(index, len)),
        KeyCode::Enter => app.confirm_location_pick(),
        _ => {}
    }
}
