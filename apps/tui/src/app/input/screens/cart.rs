use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_cart_input(app: &mut App, key: KeyCode) {
    let len = app.cart.len();

    match key {
        KeyCode::Up => {
            app.cart_selection_index = wrap_decrement(app.cart_selection_index, len);
        }
        KeyCode::Down => {
            app.cart_selection_index = wrap_increment(app.cart_selection_index, len);
        }
        KeyCode::Char('+' | '=') => app.change_cart_quantity(1),
        KeyCode::Char('-') => app.change_cart_quantity(-1),
        KeyCode::Char('d') | KeyCode::Delete => app.remove_cart_selection(),
        _ => {}
    }
}
