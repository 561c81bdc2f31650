// src/models.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    /// Exact match on the option labels, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        Gender::ALL
            .into_iter()
            .find(|g| g.as_str() == label)
            .ok_or_else(|| label.to_string())
    }
}

/// Body of `POST /predict`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub symptoms: String,
    /// Raw age text as typed; empty when not given.
    pub age: String,
    pub gender: Gender,
}

/// Probability as the service sent it. Never coerced, only displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Probability {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Probability::Number(n) => write!(f, "{}", n),
            Probability::Text(s) => f.write_str(s),
        }
    }
}

/// One ranked candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub disease: String,
    /// Absent or `null` shows as blank.
    #[serde(default)]
    pub probability: Option<Probability>,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub medication: String,
    #[serde(default)]
    pub recommendation: String,
    #[serde(default)]
    pub description: String,
}

/// Successful answer from the service. `results` is in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub results: Vec<PredictionResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tele_consult_link: Option<String>,
}

/// Remote `GET /health` payload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UpstreamHealth {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
    #[serde(default)]
    pub tfidf_loaded: bool,
    #[serde(default)]
    pub mapping_loaded: bool,
}

impl UpstreamHealth {
    pub fn is_ready(&self) -> bool {
        self.status == "healthy" && self.model_loaded && self.tfidf_loaded && self.mapping_loaded
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct ApiError {
    pub message: String,
}
