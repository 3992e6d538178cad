//! Rule-based risk calculators, risk levels and urgency

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::features::{Level, RiskFeatures};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Hypertension,
    Diabetes,
    CardiacCondition,
    RespiratoryCondition,
}

impl Condition {
    pub const ALL: [Condition; 4] = [
        Condition::Hypertension,
        Condition::Diabetes,
        Condition::CardiacCondition,
        Condition::RespiratoryCondition,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Hypertension => "hypertension",
            Condition::Diabetes => "diabetes",
            Condition::CardiacCondition => "cardiac_condition",
            Condition::RespiratoryCondition => "respiratory_condition",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Condition::Hypertension => "Hypertension",
            Condition::Diabetes => "Type 2 Diabetes",
            Condition::CardiacCondition => "Cardiac Condition",
            Condition::RespiratoryCondition => "Respiratory Condition",
        }
    }

    /// Risk in `[0, 1]`, rounded to two decimals
    pub fn risk(&self, f: &RiskFeatures) -> f64 {
        let raw = match self {
            Condition::Hypertension => hypertension_risk(f),
            Condition::Diabetes => diabetes_risk(f),
            Condition::CardiacCondition => cardiac_risk(f),
            Condition::RespiratoryCondition => respiratory_risk(f),
        };
        round2(raw.min(1.0))
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn hypertension_risk(f: &RiskFeatures) -> f64 {
    let mut risk = 0.0;
    if f.age > 65 {
        risk += 0.3;
    } else if f.age > 45 {
        risk += 0.2;
    }

    let bp = &f.vitals;
    if bp.systolic_bp > 140.0 || bp.diastolic_bp > 90.0 {
        risk += 0.4;
    } else if bp.systolic_bp > 130.0 || bp.diastolic_bp > 80.0 {
        risk += 0.2;
    }

    if f.bmi > 30.0 {
        risk += 0.2;
    } else if f.bmi > 25.0 {
        risk += 0.1;
    }

    if f.smoking {
        risk += 0.15;
    }
    if f.stress == Level::High {
        risk += 0.1;
    }
    if f.exercise == Level::Low {
        risk += 0.1;
    }
    risk
}

fn diabetes_risk(f: &RiskFeatures) -> f64 {
    let mut risk = 0.0;
    let glucose = f.labs.glucose;
    if glucose > 200.0 {
        risk += 0.5;
    } else if glucose > 126.0 {
        risk += 0.3;
    } else if glucose > 100.0 {
        risk += 0.1;
    }

    if f.age > 45 {
        risk += 0.2;
    }
    if f.bmi > 30.0 {
        risk += 0.25;
    }
    if f.symptoms.fatigue {
        risk += 0.1;
    }
    if f.symptoms.dizziness {
        risk += 0.05;
    }
    risk
}

fn cardiac_risk(f: &RiskFeatures) -> f64 {
    let mut risk = 0.0;
    if f.symptoms.chest_pain {
        risk += 0.4;
    }
    if f.symptoms.shortness_of_breath {
        risk += 0.3;
    }
    if f.vitals.heart_rate > 100.0 || f.vitals.heart_rate < 60.0 {
        risk += 0.2;
    }
    if f.labs.cholesterol > 240.0 {
        risk += 0.2;
    }
    if f.smoking {
        risk += 0.2;
    }
    risk
}

fn respiratory_risk(f: &RiskFeatures) -> f64 {
    let mut risk = 0.0;
    if f.symptoms.shortness_of_breath {
        risk += 0.3;
    }
    if f.symptoms.fever {
        risk += 0.2;
    }
    if f.vitals.respiratory_rate > 20.0 {
        risk += 0.2;
    }
    if f.vitals.temperature > 100.4 {
        risk += 0.2;
    }
    if f.smoking {
        risk += 0.3;
    }
    risk
}

pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    High,
    Moderate,
    Low,
    Minimal,
}

impl RiskLevel {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 0.8 {
            RiskLevel::High
        } else if confidence >= 0.6 {
            RiskLevel::Moderate
        } else if confidence >= 0.4 {
            RiskLevel::Low
        } else {
            RiskLevel::Minimal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "high",
            RiskLevel::Moderate => "moderate",
            RiskLevel::Low => "low",
            RiskLevel::Minimal => "minimal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    High,
    Moderate,
    Low,
}

impl Urgency {
    /// Cardiac risk above 0.7 is urgent; hypertension above 0.6 and any
    /// condition above 0.8 are moderately urgent
    pub fn assess(condition: Condition, confidence: f64) -> Self {
        match condition {
            Condition::CardiacCondition if confidence > 0.7 => Urgency::High,
            Condition::Hypertension if confidence > 0.6 => Urgency::Moderate,
            _ if confidence > 0.8 => Urgency::Moderate,
            _ => Urgency::Low,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::SymptomFlags;
    use crate::request::{LabResults, VitalSigns};

    fn baseline() -> RiskFeatures {
        RiskFeatures {
            age: 30,
            bmi: 22.0,
            vitals: VitalSigns::default(),
            labs: LabResults::default(),
            symptoms: SymptomFlags::default(),
            smoking: false,
            exercise: Level::Medium,
            stress: Level::Medium,
        }
    }

    #[test]
    fn test_healthy_baseline_has_no_risk() {
        let f = baseline();
        for condition in Condition::ALL {
            assert_eq!(condition.risk(&f), 0.0, "{condition}");
        }
    }

    #[test]
    fn test_hypertension_accumulates_and_caps() {
        let f = RiskFeatures {
            age: 70,
            bmi: 32.0,
            vitals: VitalSigns {
                systolic_bp: 160.0,
                ..VitalSigns::default()
            },
            smoking: true,
            stress: Level::High,
            exercise: Level::Low,
            ..baseline()
        };
        assert_eq!(Condition::Hypertension.risk(&f), 1.0);
    }

    #[test]
    fn test_borderline_bp_adds_less() {
        let f = RiskFeatures {
            vitals: VitalSigns {
                systolic_bp: 135.0,
                ..VitalSigns::default()
            },
            ..baseline()
        };
        assert_eq!(Condition::Hypertension.risk(&f), 0.2);
    }

    #[test]
    fn test_diabetes_from_glucose_and_symptoms() {
        let f = RiskFeatures {
            age: 50,
            labs: LabResults {
                glucose: 150.0,
                cholesterol: 200.0,
            },
            symptoms: SymptomFlags {
                fatigue: true,
                dizziness: true,
                ..SymptomFlags::default()
            },
            ..baseline()
        };
        assert_eq!(Condition::Diabetes.risk(&f), 0.65);
    }

    #[test]
    fn test_cardiac_from_chest_pain_and_breathlessness() {
        let f = RiskFeatures {
            symptoms: SymptomFlags {
                chest_pain: true,
                shortness_of_breath: true,
                ..SymptomFlags::default()
            },
            ..baseline()
        };
        assert_eq!(Condition::CardiacCondition.risk(&f), 0.7);
        assert_eq!(Condition::RespiratoryCondition.risk(&f), 0.3);
    }

    #[test]
    fn test_risk_levels() {
        assert_eq!(RiskLevel::from_confidence(0.8), RiskLevel::High);
        assert_eq!(RiskLevel::from_confidence(0.6), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_confidence(0.4), RiskLevel::Low);
        assert_eq!(RiskLevel::from_confidence(0.39), RiskLevel::Minimal);
    }

    #[test]
    fn test_urgency() {
        assert_eq!(Urgency::assess(Condition::CardiacCondition, 0.75), Urgency::High);
        assert_eq!(Urgency::assess(Condition::CardiacCondition, 0.7), Urgency::Low);
        assert_eq!(Urgency::assess(Condition::Hypertension, 0.65), Urgency::Moderate);
        assert_eq!(Urgency::assess(Condition::Diabetes, 0.65), Urgency::Low);
        assert_eq!(Urgency::assess(Condition::Diabetes, 0.85), Urgency::Moderate);
    }
}
