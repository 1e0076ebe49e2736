// Library half of the storefront: data access, shared state and the pure
// models the terminal UI renders.
pub mod api;
pub mod cart;
pub mod catalogue;
pub mod concierge;
pub mod config;
pub mod domain;
pub mod navigation;
pub mod store;

pub use api::{ApiClient, ApiError, ExperienceCache};
pub use cart::{Cart, CartItem};
pub use domain::{Experience, ExperienceStatus, Location};
pub use navigation::{NavParam, NavigationState, Page};
pub use store::LocationStore;
