pub mod action;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod page;
pub mod paths;
pub mod state;
pub mod store;

#[cfg(feature = "tui")]
pub mod tui;
