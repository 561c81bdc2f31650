// src/lib.rs
pub mod api;
pub mod banner;
pub mod config;
pub mod errors;
pub mod form;
pub mod models;
pub mod presenter;
pub mod severity;
pub mod transport;
