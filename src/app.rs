pub mod config;
pub mod constant;
pub mod model;
pub mod route;
