pub mod app;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod github;
pub mod health;
pub mod types;
pub mod ui;
