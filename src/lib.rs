pub mod api;
pub mod config;
pub mod error;
pub mod metadata;
pub mod output;
pub mod search;
pub mod session;
pub mod transcript;
