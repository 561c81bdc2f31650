// src/api/handlers/sessions.rs
use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::{AppState, Session};
use crate::form::{FormField, WorkflowState};
use crate::models::ApiError;
use crate::presenter::{present, ResultCard};
use crate::transport::PredictionTransport;

#[derive(Deserialize)]
pub struct UpdateFieldRequest {
    pub field: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub symptoms: String,
    pub age: String,
    pub gender: String,
    pub status: &'static str,
    pub error: Option<String>,
    pub cards: Vec<ResultCard>,
    pub tele_consult_link: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        let state = session.form.state();
        let tele_consult_link = match state {
            WorkflowState::Success(resp) => resp.tele_consult_link.clone(),
            _ => None,
        };

        Self {
            id: session.id,
            symptoms: session.form.symptoms().to_string(),
            age: session.form.age().to_string(),
            gender: session.form.gender().to_string(),
            status: state.label(),
            error: state.error().map(str::to_string),
            cards: present(state.results()),
            tele_consult_link,
            created_at: session.created_at.to_rfc3339(),
            updated_at: session.updated_at.to_rfc3339(),
        }
    }
}

fn not_found(id: Uuid) -> HttpResponse {
    HttpResponse::NotFound().json(ApiError {
        message: format!("Session '{}' not found", id),
    })
}

pub async fn create_session(state: web::Data<AppState>) -> Result<HttpResponse> {
    let session = Session::new();
    let view = SessionView::from(&session);

    log::info!("🆕 Created prediction session {}", session.id);
    let mut sessions = state.sessions.write().await;
    state.evict_expired(&mut sessions);
    sessions.insert(session.id, session);

    Ok(HttpResponse::Created().json(view))
}

pub async fn get_session(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let mut sessions = state.sessions.write().await;
    state.evict_expired(&mut sessions);

    match sessions.get(&id) {
        Some(session) => Ok(HttpResponse::Ok().json(SessionView::from(session))),
        None => Ok(not_found(id)),
    }
}

pub async fn update_field(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateFieldRequest>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let req = req.into_inner();

    let field = match req.field.parse::<FormField>() {
        Ok(field) => field,
        Err(message) => return Ok(HttpResponse::BadRequest().json(ApiError { message })),
    };

    let mut sessions = state.sessions.write().await;
    state.evict_expired(&mut sessions);
    let Some(session) = sessions.get_mut(&id) else {
        return Ok(not_found(id));
    };

    session.form.update_field(field, req.value);
    session.touch();

    Ok(HttpResponse::Ok().json(SessionView::from(&*session)))
}

/// Runs one submission. The session lock is released while the prediction
/// service is being called; the outcome is applied only if no newer submit or
/// reset happened in the meantime.
pub async fn submit_session(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let id = path.into_inner();

    let ticket = {
        let mut sessions = state.sessions.write().await;
        state.evict_expired(&mut sessions);
        let Some(session) = sessions.get_mut(&id) else {
            return Ok(not_found(id));
        };
        session.touch();

        match session.form.begin_submit() {
            Ok(ticket) => ticket,
            Err(_) => return Ok(HttpResponse::Ok().json(SessionView::from(&*session))),
        }
    };

    log::info!("🔎 Session {} submitting prediction #{}", id, ticket.generation());
    let outcome = state.transport.predict(ticket.request()).await;

    let mut sessions = state.sessions.write().await;
    state.evict_expired(&mut sessions);
    let Some(session) = sessions.get_mut(&id) else {
        log::warn!("Session {} was deleted while its prediction was in flight", id);
        return Ok(not_found(id));
    };

    if session.form.complete(&ticket, outcome) {
        session.touch();
    }

    let view = SessionView::from(&*session);
    for card in &view.cards {
        log::debug!("\n{}", card);
    }

    Ok(HttpResponse::Ok().json(view))
}

pub async fn reset_session(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let mut sessions = state.sessions.write().await;
    state.evict_expired(&mut sessions);
    let Some(session) = sessions.get_mut(&id) else {
        return Ok(not_found(id));
    };

    session.form.reset();
    session.touch();

    Ok(HttpResponse::Ok().json(SessionView::from(&*session)))
}

pub async fn delete_session(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let id = path.into_inner();

    let mut sessions = state.sessions.write().await;
    state.evict_expired(&mut sessions);

    match sessions.remove(&id) {
        Some(_) => Ok(HttpResponse::NoContent().finish()),
        None => Ok(not_found(id)),
    }
}
