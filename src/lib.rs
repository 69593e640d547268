pub mod cli;
pub mod config;
pub mod dates;
pub mod error;
pub mod models;
pub mod remote;
pub mod services;
pub mod state;
