//! 治療推奨テーブル
//!
//! (植物, 病害) → 推奨文。起動時に一度だけ構築し、以後は読み取り専用。

use std::collections::HashMap;

/// 該当エントリがない場合の推奨文
pub const FALLBACK_TREATMENT: &str =
    "Consult with a local agricultural extension office for specific treatment recommendations.";

const BUILTIN_TREATMENTS: &[(&str, &str, &str)] = &[
    (
        "Corn",
        "Common_rust",
        "Apply fungicides containing pyraclostrobin, azoxystrobin, or propiconazole. Ensure proper spacing between plants for good air circulation. Remove and destroy infected leaves when possible.",
    ),
    (
        "Potato",
        "Early_blight",
        "Apply fungicides containing chlorothalonil or copper-based products. Improve air circulation by proper spacing. Use mulch to prevent soil-leaf contact. Remove infected leaves and practice crop rotation.",
    ),
    (
        "Tomato",
        "Bacterial_spot",
        "Apply copper-based bactericides early. Avoid overhead irrigation. Practice crop rotation. Remove and destroy infected plants. Use resistant varieties when available for future plantings.",
    ),
];

/// 治療推奨テーブル
#[derive(Debug, Clone, Default)]
pub struct TreatmentTable {
    entries: HashMap<(String, String), String>,
}

impl TreatmentTable {
    /// 組み込みの推奨文で構築
    pub fn builtin() -> Self {
        Self::from_entries(
            BUILTIN_TREATMENTS
                .iter()
                .map(|(plant, disease, text)| (*plant, *disease, *text)),
        )
    }

    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str, &'a str)>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(plant, disease, text)| ((plant.to_string(), disease.to_string()), text.to_string()))
            .collect();
        Self { entries }
    }

    /// 推奨文を取得（未登録の組み合わせはFALLBACK_TREATMENT）
    pub fn lookup(&self, plant_type: &str, disease_type: &str) -> &str {
        self.entries
            .get(&(plant_type.to_string(), disease_type.to_string()))
            .map(String::as_str)
            .filter(|text| !text.is_empty())
            .unwrap_or(FALLBACK_TREATMENT)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_corn_rust() {
        let table = TreatmentTable::builtin();
        let text = table.lookup("Corn", "Common_rust");
        assert!(text.starts_with("Apply fungicides containing pyraclostrobin"));
    }

    #[test]
    fn test_lookup_known_pairs() {
        let table = TreatmentTable::builtin();
        assert_eq!(table.len(), 3);
        assert!(table.lookup("Potato", "Early_blight").contains("chlorothalonil"));
        assert!(table.lookup("Tomato", "Bacterial_spot").contains("copper-based bactericides"));
    }

    #[test]
    fn test_lookup_unknown_disease_falls_back() {
        let table = TreatmentTable::builtin();
        assert_eq!(table.lookup("Corn", "Unknown_disease"), FALLBACK_TREATMENT);
    }

    #[test]
    fn test_lookup_is_total() {
        let table = TreatmentTable::builtin();
        for (plant, disease) in [("", ""), ("Tomato", "Healthy"), ("corn", "common_rust"), ("🌽", "x")] {
            assert!(!table.lookup(plant, disease).is_empty());
        }
    }

    #[test]
    fn test_empty_table_falls_back() {
        let table = TreatmentTable::default();
        assert!(table.is_empty());
        assert_eq!(table.lookup("Corn", "Common_rust"), FALLBACK_TREATMENT);
    }

    #[test]
    fn test_empty_text_entry_falls_back() {
        let table = TreatmentTable::from_entries([("Apple", "Scab", "")]);
        assert_eq!(table.lookup("Apple", "Scab"), FALLBACK_TREATMENT);
    }
}
