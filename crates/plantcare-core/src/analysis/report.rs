use super::{AnalysisResult, Diagnosis};
use crate::texts::UNIDENTIFIED_PLANT;

/// Renders the full result view of a one-shot analysis.
///
/// Unlike [`super::format_analysis`], which produces a compact chat bubble,
/// this shows everything the service returned: confidence, the identified
/// issue list and the service's own final answer.
pub fn format_report(result: &AnalysisResult) -> String {
    let mut blocks = Vec::new();

    let mut identification = format!(
        "🌿 {}",
        result.plant_name().unwrap_or(UNIDENTIFIED_PLANT)
    );
    if let Some(scientific) = result.scientific_name() {
        identification.push_str(&format!("\n({scientific})"));
    }
    if let Some(confidence) = result.confidence.filter(|c| *c > 0.0) {
        identification.push_str(&format!("\nConfianza: {:.1}%", confidence * 100.0));
    }
    blocks.push(identification);

    if let (Some(score), Some(tier)) = (result.health_score, result.health_tier()) {
        blocks.push(format!(
            "{} Salud: {}/10\n{}",
            tier.marker(),
            score,
            health_bar(score)
        ));
    }

    if let Some(diagnosis) = result.diagnosis.as_ref().filter(|d| !d.is_empty()) {
        blocks.push(format!("🩺 Diagnóstico\n{}", diagnosis_block(diagnosis)));
    }

    if let Some(items) = result.recommendations() {
        let list = items
            .iter()
            .map(|item| format!("• {item}"))
            .collect::<Vec<_>>()
            .join("\n");
        blocks.push(format!("💡 Recomendaciones\n{list}"));
    }

    if let Some(answer) = result.final_response() {
        blocks.push(format!("💬 Respuesta\n{answer}"));
    }

    blocks.join("\n\n")
}

fn diagnosis_block(diagnosis: &Diagnosis) -> String {
    match diagnosis {
        Diagnosis::Text(text) => text.clone(),
        Diagnosis::Detailed(detail) => {
            let mut parts = Vec::new();
            if let Some(summary) = detail.summary() {
                parts.push(summary.to_string());
            }
            if let Some(visual) = detail.visual_problems() {
                parts.push(format!("🔍 Problemas Visuales:\n{visual}"));
            }
            if let Some(issues) = detail.identified_issues() {
                let list = issues
                    .iter()
                    .map(|issue| format!("• {issue}"))
                    .collect::<Vec<_>>()
                    .join("\n");
                parts.push(format!("⚠️ Problemas Identificados:\n{list}"));
            }
            parts.join("\n\n")
        }
    }
}

/// Ten-cell bar, one cell per point, clamped to the 0..=10 range.
fn health_bar(score: f64) -> String {
    let filled = score.clamp(0.0, 10.0).round() as usize;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(10 - filled))
}
