pub mod config;
pub mod logging;
pub mod notation;
pub mod runner;
