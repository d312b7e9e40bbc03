pub mod api;
pub mod config;
pub mod session;
pub mod store;
pub mod types;

#[cfg(feature = "dioxus")]
pub mod ui;
#[cfg(feature = "dioxus")]
pub mod views;
