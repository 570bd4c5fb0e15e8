use super::{AnalysisResult, Diagnosis, HealthTier};
use crate::texts::UNIDENTIFIED_PLANT;

/// Renders an analysis payload into the composite body of an assistant
/// `analysis` message.
///
/// Sections appear in fixed order and are separated by a blank line:
/// identification (always), health (if scored), diagnosis (if it has any
/// text), recommendations (if non-empty). The output depends only on the
/// payload, so formatting the same result twice is byte-identical.
pub fn format_analysis(result: &AnalysisResult) -> String {
    let mut sections = vec![identification_section(result)];

    if let Some(score) = result.health_score {
        let tier = HealthTier::from_score(score);
        sections.push(format!("{} **Salud:** {}/10", tier.marker(), score));
    }

    if let Some(body) = result.diagnosis.as_ref().and_then(diagnosis_body) {
        sections.push(format!("🩺 **Diagnóstico**\n{body}"));
    }

    if let Some(items) = result.recommendations() {
        let list = items
            .iter()
            .enumerate()
            .map(|(index, item)| format!("{}. {}", index + 1, item))
            .collect::<Vec<_>>()
            .join("\n");
        sections.push(format!("💡 **Recomendaciones**\n{list}"));
    }

    sections.join("\n\n")
}

fn identification_section(result: &AnalysisResult) -> String {
    let mut section = format!(
        "🔍 **Identificación**\n{}",
        result.plant_name().unwrap_or(UNIDENTIFIED_PLANT)
    );
    if let Some(scientific) = result.scientific_name() {
        section.push_str(&format!("\n_({scientific})_"));
    }
    section
}

/// Body under the diagnosis header, `None` when there is nothing to show so
/// the header is suppressed as well.
fn diagnosis_body(diagnosis: &Diagnosis) -> Option<String> {
    match diagnosis {
        Diagnosis::Text(text) if text.is_empty() => None,
        Diagnosis::Text(text) => Some(text.clone()),
        Diagnosis::Detailed(detail) => {
            let mut paragraphs = Vec::new();
            if let Some(summary) = detail.summary() {
                paragraphs.push(summary.to_string());
            }
            if let Some(visual) = detail.visual_problems() {
                paragraphs.push(format!("🔍 {visual}"));
            }
            if paragraphs.is_empty() {
                None
            } else {
                Some(paragraphs.join("\n\n"))
            }
        }
    }
}
