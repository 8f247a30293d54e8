pub mod api;
pub mod auth;
pub mod backend;
pub mod mock;
pub mod store;
