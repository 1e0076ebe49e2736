pub mod hints;
pub mod navbar;
pub mod popup;
pub mod tables;
