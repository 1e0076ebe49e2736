pub mod cart;
pub mod detail;
pub mod home;
pub mod info;
pub mod listing;
pub mod overlays;
