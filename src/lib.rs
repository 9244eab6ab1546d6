pub mod compute;
pub mod config;
pub mod debug;
pub mod display;
pub mod entities;
