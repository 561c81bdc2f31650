// src/presenter.rs
use serde::Serialize;
use std::fmt;

use crate::models::PredictionResult;
use crate::severity::{color_for, SeverityColor};

/// One rendered candidate, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultCard {
    /// 1-based position in the service's ranking.
    pub rank: usize,
    pub disease: String,
    pub probability: String,
    pub severity: String,
    pub severity_color: SeverityColor,
    pub severity_hex: &'static str,
    pub medication: String,
    pub recommendation: String,
    pub description: String,
}

impl ResultCard {
    fn from_result(rank: usize, result: &PredictionResult) -> Self {
        let color = color_for(&result.severity);
        Self {
            rank,
            disease: result.disease.clone(),
            probability: result
                .probability
                .as_ref()
                .map(|p| p.to_string())
                .unwrap_or_default(),
            severity: result.severity.clone(),
            severity_color: color,
            severity_hex: color.hex(),
            medication: result.medication.clone(),
            recommendation: result.recommendation.clone(),
            description: result.description.clone(),
        }
    }
}

impl fmt::Display for ResultCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}. {}", self.rank, self.disease)?;
        writeln!(f, "   Probability: {}", self.probability)?;
        writeln!(f, "   Severity: {} ({})", self.severity, self.severity_hex)?;
        writeln!(f, "   Medication: {}", self.medication)?;
        writeln!(f, "   Recommendation: {}", self.recommendation)?;
        write!(f, "   Description: {}", self.description)
    }
}

/// One card per result, in the order given. `None` and empty lists give no cards.
pub fn present(results: Option<&[PredictionResult]>) -> Vec<ResultCard> {
    results
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(idx, result)| ResultCard::from_result(idx + 1, result))
        .collect()
}
