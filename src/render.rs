//! 結果カードの端末表示

use plantguard_common::ResultCard;
use std::time::Duration;

use crate::analyze::AnalysisReport;

const BAR_WIDTH: usize = 20;

/// 確信度バー（0〜100 → 20マス）
fn confidence_bar(width_percent: f64) -> String {
    let filled = ((width_percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.1} seconds", elapsed.as_secs_f64())
}

/// 結果カードを文字列に整形
pub fn render_report(report: &AnalysisReport) -> String {
    let card = ResultCard::new(&report.result, &report.treatment);
    let status = if card.healthy { "✔" } else { "⚠" };

    let mut lines = vec![
        format!("🌿 {}  {} {}", card.plant, status, card.disease),
        String::new(),
        format!("  Confidence Level  {} {}", confidence_bar(card.confidence_width), card.confidence),
        format!("  Image Size        {}", card.image_size),
        format!("  Detection Time    {}", format_elapsed(report.elapsed)),
        String::new(),
        "📖 Treatment Recommendation".to_string(),
    ];
    lines.push(format!("  {}", card.treatment));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use plantguard_common::{mock_results, TreatmentTable};

    fn report() -> AnalysisReport {
        let result = mock_results().remove(0);
        let treatment = TreatmentTable::builtin()
            .lookup(&result.plant_type, &result.disease_type)
            .to_string();
        AnalysisReport {
            file_name: "leaf.png".to_string(),
            digest: String::new(),
            result,
            treatment,
            elapsed: Duration::from_millis(1500),
        }
    }

    #[test]
    fn test_confidence_bar() {
        assert_eq!(confidence_bar(0.0), format!("[{}]", "░".repeat(20)));
        assert_eq!(confidence_bar(100.0), format!("[{}]", "█".repeat(20)));
        assert_eq!(confidence_bar(50.0), format!("[{}{}]", "█".repeat(10), "░".repeat(10)));
    }

    #[test]
    fn test_render_report() {
        let text = render_report(&report());
        assert!(text.contains("Tomato"));
        assert!(text.contains("Bacterial spot"));
        assert!(text.contains("95.0%"));
        assert!(text.contains("224 x 224 px"));
        assert!(text.contains("1.5 seconds"));
        assert!(text.contains("Apply copper-based bactericides"));
    }
}
