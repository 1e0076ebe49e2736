// Application state and the input handling that drives it

pub mod actions;
pub mod input;
pub mod state;

pub use actions::AppEvent;
pub use input::handle_input;
pub use state::App;
