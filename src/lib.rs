pub mod browse;
pub mod config;
pub mod input;
pub mod logging;
pub mod lookup;
pub mod menu;
pub mod store;
