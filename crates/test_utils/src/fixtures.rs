//! Pre-built Test Fixtures
//!
//! Ready-to-use test data that lines up with the reference seed in
//! `migrations/0001_init.sql` and the in-memory catalogs, so the same
//! expectations hold against either backend.

use core_kernel::Money;
use rust_decimal_macros::dec;

use domain_assessment::{AssessmentRequest, LabResults, LifestyleFactors, PatientProfile, VitalSigns};
use domain_claims::ClaimRequest;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Base tariff of the fracture package (PKG001)
    pub fn fracture_tariff() -> Money {
        Money::inr(dec!(25000))
    }

    /// An estimate above the Basic plan's fracture sub-limit
    pub fn over_basic_sublimit() -> Money {
        Money::inr(dec!(30000))
    }
}

/// Fixture for seeded catalog codes
pub struct CatalogFixtures;

impl CatalogFixtures {
    pub const FRACTURE_PACKAGE: &'static str = "PKG001";
    pub const DIABETES_PACKAGE: &'static str = "PKG002";
    pub const HYPERTENSION_PACKAGE: &'static str = "PKG003";

    pub const FRACTURE_ICD: &'static str = "S52.5";
    pub const DIABETES_ICD: &'static str = "E11";
    pub const HYPERTENSION_ICD: &'static str = "I10";

    pub const BASIC_PLAN: &'static str = "PLAN_BASIC";
    pub const STANDARD_PLAN: &'static str = "PLAN_STANDARD";
    pub const PREMIUM_PLAN: &'static str = "PLAN_PREMIUM";

    /// Plan ids in listing order
    pub fn plan_ids() -> Vec<&'static str> {
        vec![Self::BASIC_PLAN, Self::PREMIUM_PLAN, Self::STANDARD_PLAN]
    }
}

/// Fixture for claim requests against the reference catalog
pub struct ClaimFixtures;

impl ClaimFixtures {
    /// Fracture on the Premium plan: fully covered, no waiting period
    pub fn premium_fracture() -> ClaimRequest {
        ClaimRequest::new(
            "MEM-0001",
            "Premium Plan",
            CatalogFixtures::FRACTURE_ICD,
            CatalogFixtures::FRACTURE_PACKAGE,
            "emergency",
        )
        .with_estimated_cost(MoneyFixtures::fracture_tariff())
    }

    /// Fracture on the Basic plan with an estimate above the sub-limit
    pub fn basic_fracture_over_sublimit() -> ClaimRequest {
        ClaimRequest::new(
            "MEM-0002",
            CatalogFixtures::BASIC_PLAN,
            CatalogFixtures::FRACTURE_ICD,
            CatalogFixtures::FRACTURE_PACKAGE,
            "emergency",
        )
        .with_estimated_cost(MoneyFixtures::over_basic_sublimit())
    }

    /// Diabetes on the Basic plan, which excludes the package
    pub fn basic_diabetes_excluded() -> ClaimRequest {
        ClaimRequest::new(
            "MEM-0003",
            "Basic Plan",
            CatalogFixtures::DIABETES_ICD,
            CatalogFixtures::DIABETES_PACKAGE,
            "elective",
        )
    }

    /// Elective diabetes admission on the Standard plan, which needs pre-authorization
    pub fn standard_diabetes_elective() -> ClaimRequest {
        ClaimRequest::new(
            "MEM-0004",
            "Standard Plan",
            CatalogFixtures::DIABETES_ICD,
            CatalogFixtures::DIABETES_PACKAGE,
            "elective",
        )
    }

    /// A package id missing from the catalog
    pub fn unknown_package() -> ClaimRequest {
        ClaimRequest::new("MEM-0005", "Premium Plan", "S52.5", "PKG999", "emergency")
    }
}

/// Fixture for drug names known to the fake normalizer
pub struct DrugFixtures;

impl DrugFixtures {
    pub const PENICILLIN: &'static str = "Penicillin G";
    pub const PENICILLIN_RXCUI: &'static str = "7980";
    pub const IBUPROFEN: &'static str = "Ibuprofen";
    pub const IBUPROFEN_RXCUI: &'static str = "5640";
    /// Known drug whose classes derive no indication keywords
    pub const VITAMIN_D: &'static str = "Cholecalciferol";
    pub const UNKNOWN: &'static str = "Notarealdrugium";
}

/// Fixture for hybrid assessment requests
pub struct PatientFixtures;

impl PatientFixtures {
    /// Middle-aged patient with high glucose; diabetes is the primary risk
    pub fn diabetic() -> AssessmentRequest {
        AssessmentRequest::new(
            PatientProfile::new("Sunita Rao", 52, "Female").with_body(160.0, 82.0),
            &["Fatigue", "Dizziness"],
        )
        .with_labs(LabResults {
            glucose: 210.0,
            cholesterol: 190.0,
        })
    }

    /// Older smoker with raised blood pressure
    pub fn hypertensive() -> AssessmentRequest {
        AssessmentRequest::new(
            PatientProfile::new("Ramesh Iyer", 61, "Male")
                .with_body(170.0, 88.0)
                .smoker(),
            &["Headache", "High BP"],
        )
        .with_vitals(VitalSigns {
            systolic_bp: 158.0,
            diastolic_bp: 96.0,
            ..VitalSigns::default()
        })
        .with_lifestyle(LifestyleFactors {
            stress_level: Some(8),
            ..LifestyleFactors::default()
        })
    }

    /// Young patient with a vague symptom; no condition passes the threshold
    pub fn healthy() -> AssessmentRequest {
        AssessmentRequest::new(PatientProfile::new("Kiran", 25, "Male"), &["Bloating"])
    }
}
