//! Patient guidance tables

use std::collections::BTreeMap;

use crate::request::PatientProfile;
use crate::risk::Condition;

pub fn patient_considerations(condition: Condition, patient: &PatientProfile) -> Vec<String> {
    let mut out = Vec::new();
    let age = patient.age;
    if age > 65 {
        out.push("Consider age-related complications");
        out.push("Monitor for polypharmacy interactions");
    } else if age < 18 {
        out.push("Pediatric dosing and protocols required");
    }
    if patient.is_female() && (18..=50).contains(&age) {
        out.push("Consider reproductive health implications");
    }
    out.extend(match condition {
        Condition::Hypertension => ["Monitor kidney function", "Assess cardiovascular risk"],
        Condition::Diabetes => ["Monitor blood glucose closely", "Assess for complications"],
        Condition::CardiacCondition => ["ECG monitoring recommended", "Assess exercise tolerance"],
        Condition::RespiratoryCondition => ["Monitor oxygen saturation", "Assess breathing patterns"],
    });
    owned(out)
}

pub fn monitoring_recommendations(condition: Condition, confidence: f64) -> Vec<String> {
    let mut out = if confidence > 0.8 {
        vec!["Close monitoring required", "Follow-up within 24-48 hours"]
    } else if confidence > 0.6 {
        vec!["Regular monitoring recommended", "Follow-up within 1 week"]
    } else {
        vec!["Routine monitoring sufficient", "Follow-up as scheduled"]
    };
    out.extend(match condition {
        Condition::Hypertension => ["Daily blood pressure checks", "Weekly weight monitoring"],
        Condition::Diabetes => ["Blood glucose monitoring", "HbA1c every 3 months"],
        Condition::CardiacCondition => ["Heart rate monitoring", "Activity tolerance assessment"],
        Condition::RespiratoryCondition => ["Respiratory rate monitoring", "Oxygen saturation checks"],
    });
    owned(out)
}

pub fn monitoring_frequency(confidence: f64) -> &'static str {
    if confidence > 0.8 {
        "Daily to weekly"
    } else if confidence > 0.6 {
        "Weekly to bi-weekly"
    } else {
        "Monthly"
    }
}

pub fn monitoring_parameters(condition: Option<Condition>) -> Vec<String> {
    owned(match condition {
        Some(Condition::Hypertension) => vec!["Blood pressure", "Heart rate", "Weight", "Symptoms"],
        Some(Condition::Diabetes) => vec!["Blood glucose", "HbA1c", "Weight", "Ketones"],
        Some(Condition::CardiacCondition) => {
            vec!["Heart rate", "Blood pressure", "Exercise tolerance", "Symptoms"]
        }
        Some(Condition::RespiratoryCondition) => {
            vec!["Respiratory rate", "Oxygen saturation", "Peak flow", "Symptoms"]
        }
        None => vec!["Vital signs", "Symptoms", "General wellness"],
    })
}

/// Age-adjusted alert thresholds, keyed by parameter
pub fn alert_thresholds(condition: Option<Condition>, age: u32) -> BTreeMap<String, String> {
    let bp = if age > 65 {
        "Blood pressure >150/90 or <90/60"
    } else {
        "Blood pressure >140/90 or <90/60"
    };
    let mut thresholds = BTreeMap::from([
        ("blood_pressure".to_string(), bp.to_string()),
        ("heart_rate".to_string(), "Heart rate >100 or <60 bpm".to_string()),
        ("temperature".to_string(), "Temperature >101°F or <96°F".to_string()),
        ("respiratory_rate".to_string(), "Respiratory rate >24 or <12/min".to_string()),
    ]);
    if condition == Some(Condition::Diabetes) {
        thresholds.insert("glucose".to_string(), "Blood glucose >300 or <70 mg/dL".to_string());
        thresholds.insert("ketones".to_string(), "Ketones >1.5 mmol/L".to_string());
    }
    thresholds
}

pub fn risk_factors(patient: &PatientProfile, smoking: bool, sedentary: bool) -> Vec<String> {
    let mut out = Vec::new();
    if patient.age > 65 {
        out.push("Advanced age".to_string());
    }
    if patient.age < 18 {
        out.push("Pediatric considerations".to_string());
    }
    if smoking {
        out.push("Tobacco use".to_string());
    }
    if sedentary {
        out.push("Sedentary lifestyle".to_string());
    }
    for past in &patient.medical_history {
        let lower = past.to_lowercase();
        if ["diabetes", "hypertension", "heart"].iter().any(|t| lower.contains(t)) {
            out.push(format!("History of {past}"));
        }
    }
    out
}

pub fn mitigation_strategies(condition: Option<Condition>) -> Vec<String> {
    let mut out = vec![
        "Regular medical follow-up",
        "Medication adherence monitoring",
        "Lifestyle modification support",
    ];
    out.extend(match condition {
        Some(Condition::Hypertension) => vec!["Blood pressure self-monitoring", "Sodium restriction"],
        Some(Condition::Diabetes) => vec!["Blood glucose monitoring", "Carbohydrate counting education"],
        Some(Condition::CardiacCondition) => vec!["Cardiac rehabilitation referral", "Activity monitoring"],
        _ => vec![],
    });
    owned(out)
}

pub fn self_management_tips(condition: Option<Condition>) -> Vec<String> {
    let mut out = vec![
        "Take medications as prescribed",
        "Keep regular appointments",
        "Monitor symptoms daily",
        "Maintain healthy lifestyle",
    ];
    out.extend(match condition {
        Some(Condition::Hypertension) => vec![
            "Monitor blood pressure regularly",
            "Limit sodium intake",
            "Exercise regularly",
            "Manage stress",
        ],
        Some(Condition::Diabetes) => vec![
            "Monitor blood sugar levels",
            "Follow meal plan",
            "Take medications on time",
            "Stay hydrated",
        ],
        _ => vec![],
    });
    owned(out)
}

pub fn warning_signs(condition: Option<Condition>) -> Vec<String> {
    let mut out = vec![
        "Severe or worsening symptoms",
        "Difficulty breathing",
        "Chest pain",
        "Loss of consciousness",
    ];
    out.extend(match condition {
        Some(Condition::Hypertension) => vec![
            "Severe headache",
            "Vision changes",
            "Severe chest pain",
            "Difficulty breathing",
        ],
        Some(Condition::Diabetes) => vec![
            "Very high or low blood sugar",
            "Ketones in urine",
            "Severe dehydration",
            "Persistent vomiting",
        ],
        _ => vec![],
    });
    owned(out)
}

pub fn lifestyle_recommendations(condition: Option<Condition>, age: u32) -> Vec<String> {
    let mut out = vec![
        "Maintain regular sleep schedule",
        "Stay physically active as tolerated",
        "Eat balanced, nutritious meals",
        "Avoid tobacco and limit alcohol",
    ];
    match condition {
        Some(Condition::Hypertension) => out.extend([
            "Follow DASH diet principles",
            "Limit sodium to <2300mg daily",
            "Maintain healthy weight",
        ]),
        Some(Condition::Diabetes) => out.extend([
            "Count carbohydrates",
            "Eat at regular intervals",
            "Monitor portion sizes",
        ]),
        _ => {}
    }
    if age > 65 {
        out.push("Consider gentle, low-impact exercises");
        out.push("Ensure adequate calcium and vitamin D intake");
    }
    owned(out)
}

fn owned(items: Vec<&str>) -> Vec<String> {
    items.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_considerations_for_young_woman() {
        let p = PatientProfile::new("Meera", 32, "Female");
        let c = patient_considerations(Condition::Diabetes, &p);
        assert_eq!(
            c,
            vec![
                "Consider reproductive health implications",
                "Monitor blood glucose closely",
                "Assess for complications",
            ]
        );
    }

    #[test]
    fn test_considerations_for_senior() {
        let p = PatientProfile::new("Ravi", 70, "Male");
        let c = patient_considerations(Condition::Hypertension, &p);
        assert_eq!(c[0], "Consider age-related complications");
        assert_eq!(c.len(), 4);
    }

    #[test]
    fn test_monitoring_tiers() {
        assert_eq!(
            monitoring_recommendations(Condition::CardiacCondition, 0.9)[0],
            "Close monitoring required"
        );
        assert_eq!(
            monitoring_recommendations(Condition::CardiacCondition, 0.7)[0],
            "Regular monitoring recommended"
        );
        assert_eq!(
            monitoring_recommendations(Condition::CardiacCondition, 0.6)[0],
            "Routine monitoring sufficient"
        );
    }

    #[test]
    fn test_alert_thresholds_adjust_for_age_and_diabetes() {
        let senior = alert_thresholds(Some(Condition::Diabetes), 70);
        assert_eq!(senior["blood_pressure"], "Blood pressure >150/90 or <90/60");
        assert!(senior.contains_key("glucose"));

        let adult = alert_thresholds(None, 40);
        assert_eq!(adult["blood_pressure"], "Blood pressure >140/90 or <90/60");
        assert!(!adult.contains_key("ketones"));
    }

    #[test]
    fn test_risk_factors_pick_relevant_history() {
        let p = PatientProfile::new("Ravi", 70, "Male")
            .with_history("Heart attack 2019")
            .with_history("Appendectomy");
        let factors = risk_factors(&p, true, false);
        assert_eq!(
            factors,
            vec!["Advanced age", "Tobacco use", "History of Heart attack 2019"]
        );
    }
}
