pub mod auth;
pub mod cache;
pub mod client;
pub mod config;
pub mod errors;
pub mod form;
pub mod handlers;
pub mod i18n;
pub mod models;
pub mod navigation;
pub mod state;
pub mod submit;
pub mod tasks;
pub mod templates_structs;
pub mod views;
