// src/errors.rs
use thiserror::Error;

/// Message shown when a submission fails and the server gave no usable reason.
pub const GENERIC_FAILURE_MESSAGE: &str = "Prediction failed.";

/// Local, pre-network problems with the form input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter symptoms.")]
    MissingSymptoms,

    #[error("Please select gender.")]
    MissingGender,

    #[error("Please select gender.")]
    InvalidGender(String),
}

impl ValidationError {
    /// Stable machine-readable code for the failure.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::MissingSymptoms => "missing_symptoms",
            ValidationError::MissingGender => "missing_gender",
            ValidationError::InvalidGender(_) => "invalid_gender",
        }
    }
}

#[derive(Error, Debug)]
pub enum PredictError {
    #[error("Failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Prediction service failed with status {status}: {}", .message.as_deref().unwrap_or("<no message>"))]
    Api {
        status: u16,
        message: Option<String>,
        details: Option<String>,
    },

    #[error("Unexpected response structure: {0}")]
    MalformedResponse(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PredictError {
    /// The single line a user sees for this failure.
    pub fn user_message(&self) -> String {
        match self {
            PredictError::Validation(e) => e.to_string(),
            PredictError::Api {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }

    /// HTTP-style status carried by the failure, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            PredictError::Api { status, .. } => Some(*status),
            PredictError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PredictError>;
