//! Plan registry types and JSON parsing.
//!
//! The registry holds named dataset plans so a seeding run can be reproduced
//! by name instead of by remembering a seed and two counts.

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::RegistryError;
use crate::plan::DatasetPlan;

/// Current supported registry version.
const SUPPORTED_VERSION: u32 = 1;

/// A registry of named dataset plans.
///
/// # Example
///
/// ```
/// use synthetic_data::PlanRegistry;
///
/// let json = r#"{
///     "version": 1,
///     "plans": [{"name": "demo", "seed": 42, "clientCount": 100, "supplierCount": 50}]
/// }"#;
///
/// let registry = PlanRegistry::from_json(json).expect("valid registry");
/// let plan = registry.find_plan("demo").expect("plan exists");
/// assert_eq!(plan.plan().client_count(), 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRegistry {
    version: u32,
    plans: Vec<PlanDefinition>,
}

impl PlanRegistry {
    /// Parses a plan registry from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if:
    /// - The JSON is malformed or required fields are missing
    /// - The version is unsupported
    /// - The plans array is empty
    /// - A plan name is blank or repeated
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: RawPlanRegistry =
            serde_json::from_str(json).map_err(|e| RegistryError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    fn from_raw(raw: RawPlanRegistry) -> Result<Self, RegistryError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        if raw.plans.is_empty() {
            return Err(RegistryError::EmptyPlans);
        }

        let mut seen = HashSet::new();
        let mut plans = Vec::with_capacity(raw.plans.len());
        for (index, raw_plan) in raw.plans.into_iter().enumerate() {
            let name = raw_plan.name.trim().to_owned();
            if name.is_empty() {
                return Err(RegistryError::BlankPlanName { index });
            }
            if !seen.insert(name.clone()) {
                return Err(RegistryError::DuplicatePlan { name });
            }
            plans.push(PlanDefinition {
                name,
                plan: DatasetPlan::new(
                    raw_plan.seed,
                    raw_plan.client_count,
                    raw_plan.supplier_count,
                ),
            });
        }

        Ok(Self {
            version: raw.version,
            plans,
        })
    }

    /// Returns the registry version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns all plan definitions in file order.
    #[must_use]
    pub fn plans(&self) -> &[PlanDefinition] {
        &self.plans
    }

    /// Finds a plan definition by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::PlanNotFound`] if no plan has the given name.
    pub fn find_plan(&self, name: &str) -> Result<&PlanDefinition, RegistryError> {
        self.plans
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| RegistryError::PlanNotFound {
                name: name.to_owned(),
            })
    }
}

/// A named dataset plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanDefinition {
    name: String,
    plan: DatasetPlan,
}

impl PlanDefinition {
    /// Returns the plan name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the dataset plan.
    #[must_use]
    pub const fn plan(&self) -> DatasetPlan {
        self.plan
    }
}

/// Raw JSON representation for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPlanRegistry {
    version: u32,
    plans: Vec<RawPlanDefinition>,
}

/// Raw JSON representation of a plan definition.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPlanDefinition {
    name: String,
    seed: u64,
    client_count: usize,
    supplier_count: usize,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const VALID_JSON: &str = r#"{
        "version": 1,
        "plans": [
            {"name": "demo", "seed": 2024, "clientCount": 100, "supplierCount": 50},
            {"name": "tiny", "seed": 7, "clientCount": 3, "supplierCount": 1}
        ]
    }"#;

    #[test]
    fn parses_valid_registry() {
        let registry = PlanRegistry::from_json(VALID_JSON).expect("valid registry");

        assert_eq!(registry.version(), 1);
        assert_eq!(registry.plans().len(), 2);
    }

    #[test]
    fn finds_plan_by_name() {
        let registry = PlanRegistry::from_json(VALID_JSON).expect("valid registry");
        let definition = registry.find_plan("tiny").expect("plan found");

        assert_eq!(definition.name(), "tiny");
        assert_eq!(definition.plan(), DatasetPlan::new(7, 3, 1));
    }

    #[test]
    fn returns_error_for_unknown_plan() {
        let registry = PlanRegistry::from_json(VALID_JSON).expect("valid registry");

        assert_eq!(
            registry.find_plan("unknown"),
            Err(RegistryError::PlanNotFound {
                name: "unknown".to_owned()
            })
        );
    }

    #[rstest]
    #[case::malformed_json("not valid json")]
    #[case::missing_version(r#"{"plans": []}"#)]
    #[case::negative_seed(
        r#"{"version": 1, "plans": [{"name": "a", "seed": -1, "clientCount": 1, "supplierCount": 1}]}"#
    )]
    fn rejects_json_with_parse_error(#[case] json: &str) {
        let result = PlanRegistry::from_json(json);
        assert!(matches!(result, Err(RegistryError::ParseError { .. })));
    }

    #[rstest]
    #[case::unsupported_version(
        r#"{"version": 2, "plans": [{"name": "a", "seed": 1, "clientCount": 1, "supplierCount": 1}]}"#,
        RegistryError::UnsupportedVersion { expected: 1, actual: 2 }
    )]
    #[case::empty_plans(r#"{"version": 1, "plans": []}"#, RegistryError::EmptyPlans)]
    #[case::blank_name(
        r#"{"version": 1, "plans": [{"name": "  ", "seed": 1, "clientCount": 1, "supplierCount": 1}]}"#,
        RegistryError::BlankPlanName { index: 0 }
    )]
    #[case::duplicate_name(
        r#"{"version": 1, "plans": [
            {"name": "a", "seed": 1, "clientCount": 1, "supplierCount": 1},
            {"name": "a", "seed": 2, "clientCount": 1, "supplierCount": 1}
        ]}"#,
        RegistryError::DuplicatePlan { name: "a".to_owned() }
    )]
    fn rejects_invalid_registry(#[case] json: &str, #[case] expected: RegistryError) {
        assert_eq!(PlanRegistry::from_json(json), Err(expected));
    }

    #[test]
    fn plan_names_are_trimmed() {
        let json = r#"{"version": 1, "plans": [{"name": " padded ", "seed": 1, "clientCount": 1, "supplierCount": 1}]}"#;
        let registry = PlanRegistry::from_json(json).expect("valid registry");

        assert!(registry.find_plan("padded").is_ok());
    }
}
