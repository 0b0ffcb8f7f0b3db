pub mod agents;
pub mod config;
pub mod models;
pub mod run;
