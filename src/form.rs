// src/form.rs
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::{Result, ValidationError};
use crate::models::{Gender, PredictionRequest, PredictionResponse, PredictionResult};
use crate::transport::PredictionTransport;

/// The editable inputs of the prediction form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    Symptoms,
    Age,
    Gender,
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "symptoms" => Ok(FormField::Symptoms),
            "age" => Ok(FormField::Age),
            "gender" => Ok(FormField::Gender),
            other => Err(format!("Unknown form field '{}'", other)),
        }
    }
}

/// Phase of the current prediction attempt. Exactly one is active.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum WorkflowState {
    #[default]
    Idle,
    Loading,
    Success(PredictionResponse),
    Failure(String),
}

impl WorkflowState {
    pub fn label(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::Loading => "loading",
            WorkflowState::Success(_) => "success",
            WorkflowState::Failure(_) => "failure",
        }
    }

    pub fn results(&self) -> Option<&[PredictionResult]> {
        match self {
            WorkflowState::Success(resp) => Some(&resp.results),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            WorkflowState::Failure(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, WorkflowState::Loading)
    }
}

/// Proof that a submission was accepted, tagged with the generation it belongs to.
/// Only the ticket from the most recent `begin_submit` can complete the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTicket {
    generation: u64,
    request: PredictionRequest,
}

impl SubmitTicket {
    pub fn request(&self) -> &PredictionRequest {
        &self.request
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Input state and workflow state of one prediction form.
///
/// Fields hold raw text exactly as entered; nothing is checked until submit.
/// Every submit attempt and every reset bumps the generation, so a response
/// that arrives for an older attempt is dropped instead of overwriting newer
/// state.
#[derive(Debug, Clone, Default)]
pub struct PredictionForm {
    symptoms: String,
    age: String,
    gender: String,
    state: WorkflowState,
    generation: u64,
}

impl PredictionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn symptoms(&self) -> &str {
        &self.symptoms
    }

    pub fn age(&self) -> &str {
        &self.age
    }

    pub fn gender(&self) -> &str {
        &self.gender
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn update_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Symptoms => self.symptoms = value,
            FormField::Age => self.age = value,
            FormField::Gender => self.gender = value,
        }
    }

    /// Builds the wire request from the current inputs, or says why it can't.
    pub fn validate(&self) -> std::result::Result<PredictionRequest, ValidationError> {
        if self.symptoms.trim().is_empty() {
            return Err(ValidationError::MissingSymptoms);
        }
        if self.gender.trim().is_empty() {
            return Err(ValidationError::MissingGender);
        }
        let gender = self
            .gender
            .parse::<Gender>()
            .map_err(ValidationError::InvalidGender)?;

        Ok(PredictionRequest {
            symptoms: self.symptoms.clone(),
            age: self.age.clone(),
            gender,
        })
    }

    /// First half of a submit: clears the previous outcome, validates, and
    /// moves to `Loading` with a ticket for the network call.
    pub fn begin_submit(&mut self) -> std::result::Result<SubmitTicket, ValidationError> {
        self.generation += 1;
        self.state = WorkflowState::Idle;

        match self.validate() {
            Ok(request) => {
                self.state = WorkflowState::Loading;
                Ok(SubmitTicket {
                    generation: self.generation,
                    request,
                })
            }
            Err(e) => {
                log::debug!("Submission rejected: {}", e.code());
                self.state = WorkflowState::Failure(e.to_string());
                Err(e)
            }
        }
    }

    /// Second half of a submit. Returns `false` when the ticket is stale and
    /// the outcome was discarded.
    pub fn complete(&mut self, ticket: &SubmitTicket, outcome: Result<PredictionResponse>) -> bool {
        if ticket.generation != self.generation || !self.state.is_loading() {
            log::warn!(
                "Discarding stale prediction outcome (ticket {}, current {})",
                ticket.generation,
                self.generation
            );
            return false;
        }

        self.state = match outcome {
            Ok(response) => WorkflowState::Success(response),
            Err(e) => {
                log::warn!("Prediction failed: {}", e);
                WorkflowState::Failure(e.user_message())
            }
        };
        true
    }

    /// Validates, calls the transport, and records the outcome.
    pub async fn submit<T: PredictionTransport>(&mut self, transport: &T) -> &WorkflowState {
        if let Ok(ticket) = self.begin_submit() {
            let outcome = transport.predict(ticket.request()).await;
            self.complete(&ticket, outcome);
        }
        &self.state
    }

    /// Back to the initial empty form. Any in-flight ticket becomes stale.
    pub fn reset(&mut self) {
        self.symptoms.clear();
        self.age.clear();
        self.gender.clear();
        self.state = WorkflowState::Idle;
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{PredictError, GENERIC_FAILURE_MESSAGE};
    use crate::models::{Probability, UpstreamHealth};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    type Outcome = Box<dyn Fn() -> Result<PredictionResponse> + Send + Sync>;

    struct FakeTransport {
        calls: AtomicUsize,
        seen: Mutex<Vec<PredictionRequest>>,
        outcome: Outcome,
    }

    impl FakeTransport {
        fn new(outcome: impl Fn() -> Result<PredictionResponse> + Send + Sync + 'static) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
                outcome: Box::new(outcome),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl PredictionTransport for FakeTransport {
        async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(request.clone());
            (self.outcome)()
        }

        async fn health(&self) -> Result<UpstreamHealth> {
            Ok(UpstreamHealth::default())
        }
    }

    fn candidate(disease: &str, severity: &str) -> PredictionResult {
        PredictionResult {
            disease: disease.to_string(),
            probability: Some(Probability::Text("0.5".to_string())),
            severity: severity.to_string(),
            medication: "rest".to_string(),
            recommendation: "see a doctor".to_string(),
            description: format!("About {}", disease),
        }
    }

    fn three_candidates() -> PredictionResponse {
        PredictionResponse {
            results: vec![
                candidate("Flu", "Medium"),
                candidate("Migraine", "Low"),
                candidate("Meningitis", "High"),
            ],
            tele_consult_link: None,
        }
    }

    fn filled_form() -> PredictionForm {
        let mut form = PredictionForm::new();
        form.update_field(FormField::Symptoms, "fever, headache");
        form.update_field(FormField::Age, "34");
        form.update_field(FormField::Gender, "Female");
        form
    }

    #[tokio::test]
    async fn blank_symptoms_never_reach_the_network() {
        let transport = FakeTransport::new(|| Ok(three_candidates()));
        let mut form = filled_form();
        form.update_field(FormField::Symptoms, "   \t");

        let state = form.submit(&transport).await;

        assert_eq!(state.error(), Some("Please enter symptoms."));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn missing_gender_never_reaches_the_network() {
        let transport = FakeTransport::new(|| Ok(three_candidates()));
        let mut form = filled_form();
        form.update_field(FormField::Gender, "");

        let state = form.submit(&transport).await;

        assert_eq!(state.error(), Some("Please select gender."));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn unknown_gender_is_rejected_locally() {
        let transport = FakeTransport::new(|| Ok(three_candidates()));
        let mut form = filled_form();
        form.update_field(FormField::Gender, "robot");

        assert_eq!(
            form.begin_submit(),
            Err(ValidationError::InvalidGender("robot".to_string()))
        );
        form.submit(&transport).await;
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn success_keeps_service_order() {
        let transport = FakeTransport::new(|| Ok(three_candidates()));
        let mut form = filled_form();

        let state = form.submit(&transport).await;

        let names: Vec<_> = state
            .results()
            .unwrap()
            .iter()
            .map(|r| r.disease.clone())
            .collect();
        assert_eq!(names, ["Flu", "Migraine", "Meningitis"]);
        assert_eq!(state.error(), None);
        assert_eq!(transport.calls(), 1);

        let sent = transport.seen.lock().unwrap();
        assert_eq!(sent[0].symptoms, "fever, headache");
        assert_eq!(sent[0].age, "34");
        assert_eq!(sent[0].gender, Gender::Female);
    }

    #[tokio::test]
    async fn server_message_is_shown_on_failure() {
        let transport = FakeTransport::new(|| {
            Err(PredictError::Api {
                status: 503,
                message: Some("model unavailable".to_string()),
                details: None,
            })
        });
        let mut form = filled_form();

        let state = form.submit(&transport).await;

        assert_eq!(state.error(), Some("model unavailable"));
        assert!(state.results().is_none());
    }

    #[tokio::test]
    async fn failure_without_body_uses_generic_message() {
        let transport = FakeTransport::new(|| {
            Err(PredictError::Api { status: 500, message: None, details: None })
        });
        let mut form = filled_form();

        assert_eq!(form.submit(&transport).await.error(), Some(GENERIC_FAILURE_MESSAGE));
    }

    #[tokio::test]
    async fn reset_after_success_returns_to_initial_state() {
        let transport = FakeTransport::new(|| Ok(three_candidates()));
        let mut form = filled_form();
        form.submit(&transport).await;

        form.reset();

        assert_eq!(form.symptoms(), "");
        assert_eq!(form.age(), "");
        assert_eq!(form.gender(), "");
        assert_eq!(form.state(), &WorkflowState::Idle);
    }

    #[test]
    fn new_submit_clears_previous_result() {
        let mut form = filled_form();
        let ticket = form.begin_submit().unwrap();
        assert!(form.complete(&ticket, Ok(three_candidates())));

        let _next = form.begin_submit().unwrap();
        assert_eq!(form.state(), &WorkflowState::Loading);
        assert!(form.state().results().is_none());
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut form = filled_form();
        let first = form.begin_submit().unwrap();
        let second = form.begin_submit().unwrap();

        assert!(!form.complete(&first, Ok(three_candidates())));
        assert!(form.state().is_loading());

        assert!(form.complete(&second, Err(PredictError::MalformedResponse("x".into()))));
        assert_eq!(form.state().error(), Some(GENERIC_FAILURE_MESSAGE));
    }

    #[test]
    fn response_after_reset_is_discarded() {
        let mut form = filled_form();
        let ticket = form.begin_submit().unwrap();
        form.reset();

        assert!(!form.complete(&ticket, Ok(three_candidates())));
        assert_eq!(form.state(), &WorkflowState::Idle);
    }

    #[test]
    fn ticket_cannot_complete_twice() {
        let mut form = filled_form();
        let ticket = form.begin_submit().unwrap();
        assert!(form.complete(&ticket, Ok(three_candidates())));
        assert!(!form.complete(&ticket, Err(PredictError::Config("late".into()))));
        assert_eq!(form.state().label(), "success");
    }

    #[test]
    fn field_names_parse() {
        assert_eq!("age".parse::<FormField>(), Ok(FormField::Age));
        assert!("email".parse::<FormField>().is_err());
    }
}
