// src/api/state.rs
use crate::config::AppConfig;
use crate::form::PredictionForm;
use crate::transport::HttpTransport;
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

/// One user's prediction form, held between requests.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub form: PredictionForm,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            form: PredictionForm::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// True once the session has been idle for at least `ttl`.
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        match (now - self.updated_at).to_std() {
            Ok(idle) => idle >= ttl,
            Err(_) => false,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

pub type SessionMap = HashMap<Uuid, Session>;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub transport: Arc<HttpTransport>,
    pub sessions: Arc<RwLock<SessionMap>>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let transport = HttpTransport::new(Client::new(), config.prediction.clone());
        Self {
            config: Arc::new(config),
            transport: Arc::new(transport),
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Drops every session idle for longer than the configured TTL.
    /// Callers pass the map they already hold the write lock on.
    pub fn evict_expired(&self, sessions: &mut SessionMap) -> usize {
        let ttl = self.config.server.session_ttl();
        let now = Utc::now();
        let before = sessions.len();

        sessions.retain(|_, session| !session.is_expired(now, ttl));

        let evicted = before - sessions.len();
        if evicted > 0 {
            log::info!("🧹 Evicted {} expired session(s)", evicted);
        }
        evicted
    }
}
