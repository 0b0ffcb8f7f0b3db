#![forbid(unsafe_code)]

pub mod agents;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod plugins;
pub mod project;
pub mod utils;
pub mod version;
pub mod web_host;
