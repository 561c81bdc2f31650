// src/severity.rs
use serde::Serialize;

/// Display colour of a severity badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityColor {
    Red,
    Yellow,
    Green,
}

impl SeverityColor {
    pub fn hex(&self) -> &'static str {
        match self {
            SeverityColor::Red => "#d9534f",
            SeverityColor::Yellow => "#f0ad4e",
            SeverityColor::Green => "#5cb85c",
        }
    }
}

const SEVERITY_COLORS: [(&str, SeverityColor); 3] = [
    ("High", SeverityColor::Red),
    ("Medium", SeverityColor::Yellow),
    ("Low", SeverityColor::Green),
];

/// Colour for a severity label. Labels outside the table get the `Low` colour.
pub fn color_for(severity: &str) -> SeverityColor {
    SEVERITY_COLORS
        .iter()
        .find(|(label, _)| *label == severity)
        .map(|(_, color)| *color)
        .unwrap_or(SeverityColor::Green)
}
