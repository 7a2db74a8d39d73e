pub mod config;
pub mod extract;
pub mod fetch;
pub mod logging;
pub mod page;
pub mod runner;
pub mod tracking;
