// Library exports for Trainer Link

pub mod api;
pub mod auth;
pub mod commands;
pub mod config;
pub mod context;
pub mod models;
pub mod services;
pub mod storage;

pub use context::AppContext;
