//! Property-Based Test Generators
//!
//! Proptest strategies producing values that respect the catalog's domain
//! constraints (INR amounts, percentages in range, seeded codes).

use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::Money;
use domain_claims::ClaimRequest;

use crate::fixtures::CatalogFixtures;

/// Strategy for positive INR amounts with paise
pub fn inr_money_strategy() -> impl Strategy<Value = Money> {
    (1i64..10_000_000_00i64).prop_map(|paise| Money::inr(Decimal::new(paise, 2)))
}

/// Strategy for percentages from 0 to 100 with two decimal places
pub fn percentage_strategy() -> impl Strategy<Value = Decimal> {
    (0u32..=10_000u32).prop_map(|n| Decimal::new(n as i64, 2))
}

/// Strategy for seeded plan references, by id or by display name in any case
pub fn plan_reference_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(CatalogFixtures::BASIC_PLAN.to_string()),
        Just(CatalogFixtures::STANDARD_PLAN.to_string()),
        Just(CatalogFixtures::PREMIUM_PLAN.to_string()),
        Just("basic plan".to_string()),
        Just(" Standard Plan ".to_string()),
        Just("PREMIUM PLAN".to_string()),
    ]
}

/// Strategy for admission types as callers send them
pub fn admission_type_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("elective".to_string()),
        Just("Elective".to_string()),
        Just("emergency".to_string()),
        Just("daycare".to_string()),
    ]
}

/// Strategy for claim requests against seeded packages
pub fn claim_request_strategy() -> impl Strategy<Value = ClaimRequest> {
    (
        plan_reference_strategy(),
        prop_oneof![
            Just((CatalogFixtures::FRACTURE_PACKAGE, CatalogFixtures::FRACTURE_ICD)),
            Just((CatalogFixtures::DIABETES_PACKAGE, CatalogFixtures::DIABETES_ICD)),
            Just((CatalogFixtures::HYPERTENSION_PACKAGE, CatalogFixtures::HYPERTENSION_ICD)),
        ],
        admission_type_strategy(),
        0u32..36,
        proptest::option::of(inr_money_strategy()),
    )
        .prop_map(|(plan, (package, icd), admission, months, cost)| {
            let mut request = ClaimRequest::new("MEM-PROP", plan, icd, package, admission)
                .with_months_enrolled(months);
            if let Some(cost) = cost {
                request = request.with_estimated_cost(cost);
            }
            request
        })
}

/// Strategy for symptom lists drawn from the assessment vocabulary
pub fn symptoms_strategy() -> impl Strategy<Value = Vec<&'static str>> {
    prop::sample::subsequence(
        vec![
            "Chest Pain",
            "Shortness of breath",
            "Fatigue",
            "Dizziness",
            "Headache",
            "Frequent urination",
            "Excessive thirst",
            "Cough",
            "Wheezing",
        ],
        1..=4,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn prop_percentages_in_range(p in percentage_strategy()) {
            prop_assert!(p >= Decimal::ZERO);
            prop_assert!(p <= Decimal::ONE_HUNDRED);
        }

        #[test]
        fn prop_generated_claims_reference_seeded_packages(request in claim_request_strategy()) {
            prop_assert!(request.package_id.as_str().starts_with("PKG00"));
            prop_assert!(request.months_enrolled < 36);
        }
    }
}
