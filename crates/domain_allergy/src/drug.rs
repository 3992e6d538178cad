//! Normalized drug concepts and their therapeutic classes

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// RxNorm properties of a normalized drug
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NormalizedDrug {
    pub rxcui: Option<String>,
    pub name: Option<String>,
    pub synonym: Option<String>,
    /// RxNorm term type, e.g. `IN` for ingredient
    pub tty: Option<String>,
    pub language: Option<String>,
}

/// A drug class membership reported by RxClass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TherapeuticClass {
    pub class_name: Option<String>,
    /// Classification system, e.g. `ATC1-4`, `EPC`, `MOA`
    pub class_type: Option<String>,
    pub class_id: Option<String>,
    pub source: Option<String>,
}

impl TherapeuticClass {
    pub fn new(class_name: &str, class_type: &str, class_id: &str) -> Self {
        Self {
            class_name: Some(class_name.to_string()),
            class_type: Some(class_type.to_string()),
            class_id: Some(class_id.to_string()),
            source: Some(class_type.to_string()),
        }
    }
}

/// Drops repeated `(class_type, class_id)` pairs, keeping the first
pub fn dedupe_classes(classes: Vec<TherapeuticClass>) -> Vec<TherapeuticClass> {
    let mut seen = HashSet::new();
    classes
        .into_iter()
        .filter(|c| seen.insert((c.class_type.clone(), c.class_id.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedupe_keeps_first_occurrence() {
        let classes = vec![
            TherapeuticClass::new("Penicillins", "ATC1-4", "J01CE"),
            TherapeuticClass::new("Penicillins (dup)", "ATC1-4", "J01CE"),
            TherapeuticClass::new("Penicillin-class Antibacterial", "EPC", "N0000175503"),
        ];
        let deduped = dedupe_classes(classes);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].class_name.as_deref(), Some("Penicillins"));
    }

    #[test]
    fn test_same_id_different_type_is_kept() {
        let classes = vec![
            TherapeuticClass::new("A", "EPC", "1"),
            TherapeuticClass::new("B", "MOA", "1"),
        ];
        assert_eq!(dedupe_classes(classes).len(), 2);
    }
}
