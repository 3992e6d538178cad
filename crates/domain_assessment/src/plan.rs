//! Integrative treatment plan
//!
//! Each condition carries a fixed protocol covering diet, conventional care,
//! Ayurvedic herbs and yoga. Foods and herbs whose names contain one of the
//! patient's allergies are left out and reported as contraindications.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::guidance;
use crate::request::AssessmentRequest;
use crate::risk::{Condition, RiskLevel};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TherapeuticFood {
    pub food: String,
    pub benefit: String,
    pub preparation: String,
    pub frequency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealSchedule {
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietPlan {
    pub therapeutic_foods: Vec<TherapeuticFood>,
    pub meal_schedule: MealSchedule,
    pub foods_to_avoid: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medication {
    pub medicine: String,
    pub dosage: String,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModernTreatment {
    pub medications: Vec<Medication>,
    pub monitoring: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HerbalRemedy {
    pub herb: String,
    pub benefit: String,
    pub preparation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AyurvedicTreatment {
    pub herbs: Vec<HerbalRemedy>,
    pub lifestyle: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YogaTherapy {
    pub poses: Vec<String>,
    pub breathing: Vec<String>,
    pub meditation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationPlan {
    pub morning_routine: String,
    pub throughout_day: String,
    pub evening_routine: String,
    pub contraindications: Vec<String>,
    pub synergies: Vec<String>,
    pub sequencing: Vec<String>,
    pub cost_considerations: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskStratification {
    pub overall_risk: RiskLevel,
    pub factors: Vec<String>,
    pub mitigation_strategies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringProtocol {
    pub frequency: String,
    pub parameters: Vec<String>,
    pub alert_thresholds: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientEducation {
    pub condition_info: String,
    pub self_management: Vec<String>,
    pub warning_signs: Vec<String>,
    pub lifestyle_modifications: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HybridPlan {
    pub focus: String,
    pub diet_plan: DietPlan,
    pub modern_treatment: ModernTreatment,
    pub ayurvedic_treatment: AyurvedicTreatment,
    pub yoga_therapy: YogaTherapy,
    pub integration_plan: IntegrationPlan,
    pub risk_stratification: RiskStratification,
    pub monitoring_protocol: MonitoringProtocol,
    pub patient_education: PatientEducation,
}

// (food, benefit, preparation, frequency)
type FoodRow = (&'static str, &'static str, &'static str, &'static str);
// (herb, benefit, preparation)
type HerbRow = (&'static str, &'static str, &'static str);
// (medicine, dosage, duration)
type MedicationRow = (&'static str, &'static str, &'static str);

struct Protocol {
    foods: &'static [FoodRow],
    meals: [&'static str; 3],
    avoid: &'static [&'static str],
    medications: &'static [MedicationRow],
    herbs: &'static [HerbRow],
    ayurvedic_lifestyle: &'static [&'static str],
    poses: &'static [&'static str],
    breathing: &'static [&'static str],
    meditation: &'static str,
}

fn protocol(condition: Option<Condition>) -> Protocol {
    match condition {
        Some(Condition::Hypertension) => Protocol {
            foods: &[
                ("garlic", "Supports healthy blood pressure", "One raw clove crushed, with warm water", "Daily, morning"),
                ("beetroot", "Dietary nitrates relax blood vessels", "Fresh juice or lightly steamed", "4-5 times a week"),
                ("flaxseed", "Omega-3 fats for vascular health", "1 tbsp ground, added to meals", "Daily"),
            ],
            meals: [
                "Oats porridge with flaxseed and fresh fruit",
                "Brown rice, dal, leafy vegetable sabzi, cucumber salad",
                "Vegetable khichdi with a small bowl of curd",
            ],
            avoid: &["Pickles and papad", "Processed snacks", "Excess table salt", "Caffeinated drinks"],
            medications: &[
                ("ACE inhibitor or ARB", "As prescribed by physician", "Long-term, reviewed every 3 months"),
            ],
            herbs: &[
                ("arjuna", "Traditionally used for heart and circulation", "Bark decoction, 1 cup twice daily"),
                ("sarpagandha", "Traditionally used for high blood pressure", "Only under Ayurvedic physician supervision"),
            ],
            ayurvedic_lifestyle: &["Abhyanga with sesame oil", "Early dinner before 8 pm", "Regular sleep before 10:30 pm"],
            poses: &["Shavasana", "Balasana", "Viparita Karani"],
            breathing: &["Anulom Vilom", "Bhramari"],
            meditation: "15 minutes of guided relaxation each evening",
        },
        Some(Condition::Diabetes) => Protocol {
            foods: &[
                ("bitter gourd", "Helps regulate blood sugar", "Sabzi or fresh juice", "3 times a week"),
                ("fenugreek seeds", "Slows carbohydrate absorption", "Soak 1 tsp overnight, eat in the morning", "Daily"),
                ("millets", "Low glycaemic index grain", "Replace refined rice or wheat", "Daily"),
            ],
            meals: [
                "Besan chilla with mint chutney",
                "Millet roti, dal, mixed vegetable sabzi, salad",
                "Vegetable soup with grilled paneer or tofu",
            ],
            avoid: &["Sugary drinks", "White rice in large portions", "Sweets and desserts", "Fruit juices"],
            medications: &[
                ("Metformin", "As prescribed by physician", "Long-term, reviewed with HbA1c"),
            ],
            herbs: &[
                ("gudmar", "Traditionally used to reduce sugar cravings", "Leaf powder, 1/2 tsp with water before meals"),
                ("vijaysar", "Traditionally used for blood sugar balance", "Water stored overnight in a vijaysar tumbler"),
            ],
            ayurvedic_lifestyle: &["Brisk walk after meals", "Avoid daytime sleep", "Fixed meal timings"],
            poses: &["Mandukasana", "Ardha Matsyendrasana", "Paschimottanasana"],
            breathing: &["Kapalbhati", "Anulom Vilom"],
            meditation: "10 minutes of mindfulness before breakfast",
        },
        Some(Condition::CardiacCondition) => Protocol {
            foods: &[
                ("oats", "Soluble fibre lowers cholesterol", "Porridge or upma", "Daily"),
                ("walnuts", "Heart-healthy fats", "A small handful", "Daily"),
                ("pomegranate", "Antioxidants for vascular health", "Whole fruit", "4-5 times a week"),
            ],
            meals: [
                "Oats upma with vegetables",
                "Chapati, moong dal, steamed vegetables",
                "Light vegetable soup and a small portion of rice",
            ],
            avoid: &["Fried foods", "Ghee and butter in excess", "Red meat", "Excess salt"],
            medications: &[
                ("Cardiology review for antiplatelet or statin therapy", "As prescribed by cardiologist", "As advised"),
            ],
            herbs: &[
                ("arjuna", "Traditionally used for heart strength", "Bark decoction, 1 cup daily"),
            ],
            ayurvedic_lifestyle: &["Avoid exertion after meals", "Gentle evening walks"],
            poses: &["Shavasana", "Tadasana"],
            breathing: &["Slow diaphragmatic breathing"],
            meditation: "Yoga nidra, 20 minutes daily",
        },
        Some(Condition::RespiratoryCondition) => Protocol {
            foods: &[
                ("ginger", "Eases congestion", "Fresh ginger tea with honey", "Twice daily"),
                ("turmeric milk", "Soothes the airways", "1/2 tsp turmeric in warm milk at bedtime", "Daily"),
            ],
            meals: [
                "Warm vegetable daliya",
                "Rice, moong dal, lightly spiced vegetables",
                "Clear soup with black pepper",
            ],
            avoid: &["Cold drinks and ice cream", "Deep-fried foods", "Smoking and smoke exposure"],
            medications: &[
                ("Physician evaluation for bronchodilator or antibiotic need", "As prescribed by physician", "As advised"),
            ],
            herbs: &[
                ("vasaka", "Traditionally used for cough and breathing", "Leaf juice or syrup as directed"),
                ("tulsi", "Traditionally used for respiratory health", "5-6 fresh leaves or tulsi tea"),
            ],
            ayurvedic_lifestyle: &["Steam inhalation with ajwain", "Keep warm, avoid damp environments"],
            poses: &["Bhujangasana", "Matsyasana", "Sukhasana"],
            breathing: &["Anulom Vilom", "Ujjayi"],
            meditation: "10 minutes of breath awareness each morning",
        },
        None => Protocol {
            foods: &[
                ("seasonal fruits", "Vitamins and fibre", "Whole fruit, not juice", "Daily"),
                ("whole grains", "Steady energy", "Replace refined grains", "Daily"),
            ],
            meals: [
                "Poha with vegetables and peanuts",
                "Chapati, dal, seasonal sabzi, salad",
                "Light khichdi or soup",
            ],
            avoid: &["Ultra-processed foods", "Excess sugar"],
            medications: &[],
            herbs: &[
                ("ashwagandha", "Traditionally used for stress and vitality", "1/2 tsp powder in warm milk at night"),
            ],
            ayurvedic_lifestyle: &["Follow a regular daily routine (dinacharya)", "Wake before sunrise"],
            poses: &["Surya Namaskar", "Tadasana", "Vrikshasana"],
            breathing: &["Anulom Vilom"],
            meditation: "10 minutes of silent sitting daily",
        },
    }
}

/// Builds the integrative plan for the primary concern
///
/// `primary` is the top prediction and its confidence, or `None` when only
/// a general assessment is possible.
pub fn build_hybrid_plan(request: &AssessmentRequest, primary: Option<(Condition, f64)>) -> HybridPlan {
    let condition = primary.map(|(c, _)| c);
    let confidence = primary.map(|(_, c)| c).unwrap_or(0.5);
    let patient = &request.patient_data;
    let allergies: Vec<String> = request
        .dietary_preferences
        .allergy_list()
        .into_iter()
        .map(|a| a.to_lowercase())
        .collect();
    let p = protocol(condition);

    let mut contraindications = Vec::new();
    let mut flag_allergy = |name: &str| -> bool {
        let lower = name.to_lowercase();
        match allergies.iter().find(|a| lower.contains(a.as_str())) {
            Some(allergy) => {
                let note = format!("Patient allergic to {allergy}");
                if !contraindications.contains(&note) {
                    contraindications.push(note);
                }
                true
            }
            None => false,
        }
    };

    let therapeutic_foods = p
        .foods
        .iter()
        .filter(|(food, ..)| !flag_allergy(*food))
        .map(|&(food, benefit, preparation, frequency)| TherapeuticFood {
            food: food.to_string(),
            benefit: benefit.to_string(),
            preparation: preparation.to_string(),
            frequency: frequency.to_string(),
        })
        .collect();
    let herbs = p
        .herbs
        .iter()
        .filter(|(herb, ..)| !flag_allergy(*herb))
        .map(|&(herb, benefit, preparation)| HerbalRemedy {
            herb: herb.to_string(),
            benefit: benefit.to_string(),
            preparation: preparation.to_string(),
        })
        .collect();

    if patient.age < 18 {
        contraindications.push("Some adult medications not suitable for pediatric use".to_string());
    }
    if patient.age > 75 {
        contraindications.push("Consider dose adjustments for advanced age".to_string());
    }

    let sedentary = request
        .lifestyle_factors
        .exercise_frequency
        .as_deref()
        .is_some_and(|f| f.eq_ignore_ascii_case("never"));

    HybridPlan {
        focus: condition.map_or("general_wellness", |c| c.as_str()).to_string(),
        diet_plan: DietPlan {
            therapeutic_foods,
            meal_schedule: MealSchedule {
                breakfast: p.meals[0].to_string(),
                lunch: p.meals[1].to_string(),
                dinner: p.meals[2].to_string(),
            },
            foods_to_avoid: strings(p.avoid),
        },
        modern_treatment: ModernTreatment {
            medications: p
                .medications
                .iter()
                .map(|&(medicine, dosage, duration)| Medication {
                    medicine: medicine.to_string(),
                    dosage: dosage.to_string(),
                    duration: duration.to_string(),
                })
                .collect(),
            monitoring: guidance::monitoring_parameters(condition),
        },
        ayurvedic_treatment: AyurvedicTreatment {
            herbs,
            lifestyle: strings(p.ayurvedic_lifestyle),
        },
        yoga_therapy: YogaTherapy {
            poses: strings(p.poses),
            breathing: strings(p.breathing),
            meditation: p.meditation.to_string(),
        },
        integration_plan: IntegrationPlan {
            morning_routine: format!(
                "{} practice, then {}",
                p.breathing.first().copied().unwrap_or("Breathing"),
                p.meals[0].to_lowercase()
            ),
            throughout_day: "Take prescribed medicines on time, stay hydrated and take short walks".to_string(),
            evening_routine: format!("{}, then {}", p.meditation, p.meals[2].to_lowercase()),
            contraindications,
            synergies: vec![
                "Allopathic and Ayurvedic approaches may complement each other".to_string(),
                "Yoga therapy enhances overall wellness approach".to_string(),
            ],
            sequencing: strings(&[
                "1. Initiate allopathic treatment for immediate symptom control",
                "2. Implement lifestyle modifications gradually",
                "3. Add Ayurvedic therapies after stabilization",
                "4. Introduce complementary therapies as adjunct",
            ]),
            cost_considerations: cost_estimates(),
        },
        risk_stratification: RiskStratification {
            overall_risk: RiskLevel::from_confidence(confidence),
            factors: guidance::risk_factors(patient, patient.smoking, sedentary),
            mitigation_strategies: guidance::mitigation_strategies(condition),
        },
        monitoring_protocol: MonitoringProtocol {
            frequency: guidance::monitoring_frequency(confidence).to_string(),
            parameters: guidance::monitoring_parameters(condition),
            alert_thresholds: guidance::alert_thresholds(condition, patient.age),
        },
        patient_education: PatientEducation {
            condition_info: format!(
                "Educational materials about {}",
                condition.map_or("general wellness", |c| c.display_name())
            ),
            self_management: guidance::self_management_tips(condition),
            warning_signs: guidance::warning_signs(condition),
            lifestyle_modifications: guidance::lifestyle_recommendations(condition, patient.age),
        },
    }
}

fn cost_estimates() -> BTreeMap<String, String> {
    [
        ("allopathic", "Moderate to high (insurance may cover)"),
        ("ayurvedic", "Low to moderate (typically out-of-pocket)"),
        ("yoga_therapy", "Low (group classes) to moderate (private sessions)"),
        ("lifestyle_modifications", "Low (mainly lifestyle changes)"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
