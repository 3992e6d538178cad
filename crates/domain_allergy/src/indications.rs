//! Indication keywords derived from therapeutic class names
//!
//! Class names are lower-cased and scanned for trigger tokens. Each rule
//! contributes a fixed set of herb function keywords.

use std::collections::BTreeSet;

use crate::drug::TherapeuticClass;

struct KeywordRule {
    triggers: &'static [&'static str],
    keywords: &'static [&'static str],
}

const RULES: &[KeywordRule] = &[
    KeywordRule {
        triggers: &["antibiotic", "antibacterial", "penicillin", "beta-lactam", "cephalosporin"],
        keywords: &["antibacterial", "antimicrobial", "infection"],
    },
    KeywordRule {
        triggers: &["nsaid", "anti-inflammatory", "cox"],
        keywords: &["anti-inflammatory", "analgesic", "pain"],
    },
    KeywordRule {
        triggers: &["antihistamine"],
        keywords: &["allergy", "h1 antihistamine"],
    },
    KeywordRule {
        triggers: &["proton pump", "ppi", "prazole"],
        keywords: &["acid reflux", "gastroprotective", "ulcer"],
    },
    KeywordRule {
        triggers: &["corticosteroid", "glucocorticoid"],
        keywords: &["anti-inflammatory", "immunomodulatory"],
    },
    KeywordRule {
        triggers: &["anti-infective"],
        keywords: &["antimicrobial", "infection"],
    },
];

/// Keywords for a set of classes, deduplicated and sorted
pub fn derive_indication_keywords(classes: &[TherapeuticClass]) -> Vec<String> {
    let mut keywords = BTreeSet::new();
    for class in classes {
        let name = class.class_name.as_deref().unwrap_or_default().to_lowercase();
        for rule in RULES {
            if rule.triggers.iter().any(|t| name.contains(t)) {
                keywords.extend(rule.keywords.iter().map(|k| k.to_string()));
            }
        }
    }
    keywords.into_iter().collect()
}

/// Puts "antibacterial" in front of every "antimicrobial" or "infection",
/// then drops repeats, keeping first occurrences
pub fn expand_keywords(indications: &[String]) -> Vec<String> {
    let mut expanded = Vec::with_capacity(indications.len() + 1);
    for keyword in indications {
        if keyword == "antimicrobial" || keyword == "infection" {
            expanded.push("antibacterial".to_string());
        }
        expanded.push(keyword.clone());
    }

    let mut seen = BTreeSet::new();
    expanded.retain(|k| seen.insert(k.clone()));
    expanded
}
