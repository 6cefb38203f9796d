pub mod analytics;
pub mod app;
pub mod client;
pub mod config;
pub mod editor;
pub mod errors;
pub mod handlers;
pub mod manager;
pub mod models;
pub mod state;
pub mod store;
pub mod ui;

pub use app::router;
pub use client::{HttpSubscriptionApi, SubscriptionApi};
pub use config::Config;
pub use state::AppState;
