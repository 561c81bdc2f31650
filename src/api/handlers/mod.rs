// src/api/handlers/mod.rs
mod health;
mod sessions;

pub use health::{health_check, upstream_health};
pub use sessions::{
    create_session, delete_session, get_session, reset_session, submit_session, update_field,
    SessionView, UpdateFieldRequest,
};
