use serde::{Deserialize, Serialize};
use std::fmt;

/// The three recognized kinds of graded activity.
///
/// Wire names match the historical platform values: `practica`, `examen`,
/// `examen_final`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationCategory {
    #[serde(rename = "practica")]
    Formative,
    #[serde(rename = "examen")]
    Summative,
    #[serde(rename = "examen_final")]
    FinalExam,
}

impl EvaluationCategory {
    /// All categories, in the order grades are reported.
    pub const ALL: [EvaluationCategory; 3] = [
        EvaluationCategory::Formative,
        EvaluationCategory::Summative,
        EvaluationCategory::FinalExam,
    ];

    /// Stable string form used in storage keys.
    pub fn as_str(self) -> &'static str {
        match self {
            EvaluationCategory::Formative => "practica",
            EvaluationCategory::Summative => "examen",
            EvaluationCategory::FinalExam => "examen_final",
        }
    }

    /// Parse the stable string form. Returns None for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "practica" => Some(EvaluationCategory::Formative),
            "examen" => Some(EvaluationCategory::Summative),
            "examen_final" => Some(EvaluationCategory::FinalExam),
            _ => None,
        }
    }
}

impl fmt::Display for EvaluationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
