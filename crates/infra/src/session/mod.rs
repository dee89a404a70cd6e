//! Session state adapters: token store and event broadcast

pub mod events;
pub mod token_store;

pub use events::BroadcastSessionEvents;
pub use token_store::SessionTokenStore;
