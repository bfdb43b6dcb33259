pub mod config;
pub mod input;
pub mod load_data;
pub mod render;
pub mod session;
