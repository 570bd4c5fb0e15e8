//! Plant analysis payload and its text renderings.
//!
//! - `formatter`: composite chat body for an analysis turn
//! - `report`: full standalone result view (confidence, issues, final answer)

mod formatter;
mod report;

pub use formatter::format_analysis;
pub use report::format_report;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Structured result returned by the image-analysis endpoint.
///
/// Every field is optional: the service omits whatever it could not
/// determine, and renderers skip the matching section. Unknown fields are
/// kept in `extra` so the raw payload survives a persistence round-trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plant_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scientific_name: Option<String>,
    /// Identification confidence in `0.0..=1.0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Health score in `0.0..=10.0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<Diagnosis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl AnalysisResult {
    /// Plant common name, treating an empty string as absent.
    pub fn plant_name(&self) -> Option<&str> {
        non_empty(self.plant_name.as_deref())
    }

    pub fn scientific_name(&self) -> Option<&str> {
        non_empty(self.scientific_name.as_deref())
    }

    pub fn final_response(&self) -> Option<&str> {
        non_empty(self.final_response.as_deref())
    }

    /// Severity tier of the health score, if one was reported.
    pub fn health_tier(&self) -> Option<HealthTier> {
        self.health_score.map(HealthTier::from_score)
    }

    /// Recommendations list, `None` when absent or empty.
    pub fn recommendations(&self) -> Option<&[String]> {
        self.recommendations
            .as_deref()
            .filter(|items| !items.is_empty())
    }
}

/// Diagnosis section of an analysis: either free text or a structured block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Diagnosis {
    Text(String),
    Detailed(DiagnosisDetail),
}

impl Diagnosis {
    /// True when rendering would produce no body text.
    pub fn is_empty(&self) -> bool {
        match self {
            Diagnosis::Text(text) => text.is_empty(),
            Diagnosis::Detailed(detail) => {
                detail.summary().is_none()
                    && detail.visual_problems().is_none()
                    && detail.identified_issues().is_none()
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_problems: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identified_issues: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl DiagnosisDetail {
    pub fn summary(&self) -> Option<&str> {
        non_empty(self.summary.as_deref())
    }

    pub fn visual_problems(&self) -> Option<&str> {
        non_empty(self.visual_problems.as_deref())
    }

    pub fn identified_issues(&self) -> Option<&[String]> {
        self.identified_issues
            .as_deref()
            .filter(|items| !items.is_empty())
    }
}

/// Health-score band. Lower bounds are inclusive: 8 is `High`, 6 is `Medium`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthTier {
    High,
    Medium,
    Low,
}

impl HealthTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            HealthTier::High
        } else if score >= 6.0 {
            HealthTier::Medium
        } else {
            HealthTier::Low
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            HealthTier::High => "💚",
            HealthTier::Medium => "🟡",
            HealthTier::Low => "❤️",
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tier_boundaries_are_inclusive() {
        assert_eq!(HealthTier::from_score(8.0), HealthTier::High);
        assert_eq!(HealthTier::from_score(7.9), HealthTier::Medium);
        assert_eq!(HealthTier::from_score(6.0), HealthTier::Medium);
        assert_eq!(HealthTier::from_score(5.99), HealthTier::Low);
        assert_eq!(HealthTier::from_score(f64::NAN), HealthTier::Low);
    }

    #[test]
    fn test_diagnosis_accepts_string_and_object() {
        let text: AnalysisResult =
            serde_json::from_value(json!({"success": true, "diagnosis": "Exceso de riego"}))
                .unwrap();
        assert_eq!(
            text.diagnosis,
            Some(Diagnosis::Text("Exceso de riego".to_string()))
        );

        let detailed: AnalysisResult = serde_json::from_value(json!({
            "success": true,
            "diagnosis": {"summary": "Hongos", "identified_issues": ["manchas"]}
        }))
        .unwrap();
        match detailed.diagnosis {
            Some(Diagnosis::Detailed(detail)) => {
                assert_eq!(detail.summary(), Some("Hongos"));
                assert_eq!(detail.identified_issues().unwrap().len(), 1);
            }
            other => panic!("unexpected diagnosis: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let raw = json!({
            "success": true,
            "plant_name": "Aloe vera",
            "health_score": 9,
            "model_version": "v2"
        });
        let parsed: AnalysisResult = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.extra.get("model_version"), Some(&json!("v2")));

        let back = serde_json::to_value(&parsed).unwrap();
        assert_eq!(back["model_version"], json!("v2"));
        assert_eq!(back["health_score"], json!(9.0));
    }

    #[test]
    fn test_empty_strings_count_as_absent() {
        let result = AnalysisResult {
            plant_name: Some(String::new()),
            recommendations: Some(Vec::new()),
            ..Default::default()
        };
        assert!(result.plant_name().is_none());
        assert!(result.recommendations().is_none());
        assert!(Diagnosis::Detailed(DiagnosisDetail::default()).is_empty());
    }
}
