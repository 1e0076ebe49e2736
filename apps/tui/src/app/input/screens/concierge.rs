use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_concierge_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc => app.close_concierge(),
        KeyCode::Enter => app.submit_concierge(),
        KeyCode::Backspace => {
            app.concierge.input.pop();
        }
        KeyCode::Char(ch) => app.concierge.input.push(ch),
        _ => {}
    }
}
