//! Seeder settings: which plan to generate and how large.

use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use ortho_config::OrthoConfig;
use serde::Deserialize;
use synthetic_data::{DatasetPlan, PlanRegistry};
use tracing::info;

use super::SettingsError;

fn default_registry_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("plans.json")
}

fn entropy_seed() -> u64 {
    let seed = rand::random();
    info!(seed, "no seed configured; drew a fresh one");
    seed
}

/// Configuration values selecting the dataset plan for a seeding run.
///
/// With no plan name the built-in default counts are used with a freshly
/// drawn seed, so repeated runs insert new rows. Explicit seed and count
/// values override whichever plan was chosen.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SEEDER")]
pub struct SeederSettings {
    /// Generate and report the dataset without touching the warehouse.
    #[ortho_config(default = false)]
    pub dry_run: bool,
    /// Plan name to load from the registry.
    pub plan: Option<String>,
    /// Optional registry path override.
    pub registry_path: Option<PathBuf>,
    /// Optional RNG seed override.
    pub seed: Option<u64>,
    /// Optional override for the number of clients generated.
    pub client_count: Option<usize>,
    /// Optional override for the number of suppliers generated.
    pub supplier_count: Option<usize>,
}

impl SeederSettings {
    /// Return the configured registry path, falling back to the bundled
    /// fixture.
    #[must_use]
    pub fn registry_path(&self) -> PathBuf {
        self.registry_path
            .clone()
            .unwrap_or_else(default_registry_path)
    }

    /// Resolve the dataset plan for this run.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if the plan name is blank, or the registry
    /// cannot be read, parsed, or does not contain the plan.
    pub fn resolve_plan(&self) -> Result<DatasetPlan, SettingsError> {
        let base = match self.plan.as_deref().map(str::trim) {
            Some("") => return Err(SettingsError::EmptyPlanName),
            Some(name) => {
                let registry = load_registry(&self.registry_path())?;
                registry.find_plan(name)?.plan()
            }
            None => DatasetPlan::default().with_seed(self.seed.unwrap_or_else(entropy_seed)),
        };

        let seeded = self.seed.map_or(base, |seed| base.with_seed(seed));
        let with_clients = self
            .client_count
            .map_or(seeded, |count| seeded.with_client_count(count));
        Ok(self
            .supplier_count
            .map_or(with_clients, |count| with_clients.with_supplier_count(count)))
    }
}

fn load_registry(path: &Path) -> Result<PlanRegistry, SettingsError> {
    let read_error = |source: std::io::Error| SettingsError::RegistryRead {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "registry path must be a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let contents = dir.read_to_string(Path::new(file_name)).map_err(read_error)?;
    Ok(PlanRegistry::from_json(&contents)?)
}

#[cfg(test)]
mod tests {
    //! Unit tests for seeder configuration and plan resolution.

    use super::*;
    use std::ffi::OsString;
    use std::io::Write;
    use std::sync::Arc;

    use env_lock::lock_env;
    use rstest::rstest;
    use synthetic_data::RegistryError;
    use tempfile::NamedTempFile;

    use crate::domain::WarehouseSeeder;
    use crate::test_support::InMemoryWarehouse;

    fn load_from_empty_args() -> SeederSettings {
        SeederSettings::load_from_iter([OsString::from("warehouse-seed")])
            .expect("config should load")
    }

    fn registry_file(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(json.as_bytes()).expect("write registry");
        file
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("SEEDER_DRY_RUN", None::<String>),
            ("SEEDER_PLAN", None::<String>),
            ("SEEDER_REGISTRY_PATH", None::<String>),
            ("SEEDER_SEED", None::<String>),
            ("SEEDER_CLIENT_COUNT", None::<String>),
            ("SEEDER_SUPPLIER_COUNT", None::<String>),
        ]);

        let settings = load_from_empty_args();

        assert!(!settings.dry_run);
        assert!(settings.plan.is_none());
        assert!(settings.seed.is_none());
        assert_eq!(settings.registry_path(), default_registry_path());
        let plan = settings.resolve_plan().expect("plan");
        assert_eq!(plan.client_count(), DatasetPlan::default().client_count());
        assert_eq!(plan.supplier_count(), DatasetPlan::default().supplier_count());
    }

    #[rstest]
    fn unseeded_runs_draw_distinct_seeds() {
        let settings = SeederSettings::default();

        let first = settings.resolve_plan().expect("plan");
        let second = settings.resolve_plan().expect("plan");

        assert_ne!(first.seed(), second.seed());
    }

    #[rstest]
    fn unseeded_reruns_insert_new_rows() {
        let settings = SeederSettings {
            client_count: Some(5),
            supplier_count: Some(2),
            ..SeederSettings::default()
        };
        let warehouse = InMemoryWarehouse::new();
        let seeder = WarehouseSeeder::new(Arc::new(warehouse.clone()));

        let first = seeder
            .seed_plan(&settings.resolve_plan().expect("plan"))
            .expect("first run");
        let second = seeder
            .seed_plan(&settings.resolve_plan().expect("plan"))
            .expect("second run");

        assert!(first.client_ids.iter().all(|id| !second.client_ids.contains(id)));
        assert!(first.product_ids.iter().all(|id| !second.product_ids.contains(id)));
        let state = warehouse.snapshot();
        assert_eq!(state.clients.len(), 10);
        assert_eq!(state.suppliers.len(), 4);
    }

    #[rstest]
    fn configured_seed_is_kept_without_a_plan() {
        let settings = SeederSettings {
            seed: Some(9),
            ..SeederSettings::default()
        };

        assert_eq!(settings.resolve_plan().expect("plan").seed(), 9);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("SEEDER_DRY_RUN", Some("true".to_owned())),
            ("SEEDER_PLAN", None::<String>),
            ("SEEDER_REGISTRY_PATH", Some("/tmp/plans.json".to_owned())),
            ("SEEDER_SEED", Some("99".to_owned())),
            ("SEEDER_CLIENT_COUNT", Some("3".to_owned())),
            ("SEEDER_SUPPLIER_COUNT", Some("1".to_owned())),
        ]);

        let settings = load_from_empty_args();

        assert!(settings.dry_run);
        assert_eq!(settings.registry_path(), PathBuf::from("/tmp/plans.json"));
        assert_eq!(
            settings.resolve_plan().expect("plan"),
            DatasetPlan::new(99, 3, 1)
        );
    }

    #[rstest]
    fn bundled_registry_provides_named_plans() {
        let settings = SeederSettings {
            plan: Some("smoke".to_owned()),
            ..SeederSettings::default()
        };

        assert_eq!(settings.resolve_plan().expect("plan"), DatasetPlan::new(7, 3, 1));
    }

    #[rstest]
    fn overrides_apply_on_top_of_named_plan() {
        let file = registry_file(
            r#"{"version": 1, "plans": [{"name": "team", "seed": 5, "clientCount": 20, "supplierCount": 4}]}"#,
        );
        let settings = SeederSettings {
            plan: Some(" team ".to_owned()),
            registry_path: Some(file.path().to_path_buf()),
            client_count: Some(2),
            ..SeederSettings::default()
        };

        assert_eq!(settings.resolve_plan().expect("plan"), DatasetPlan::new(5, 2, 4));
    }

    #[rstest]
    fn unknown_plan_is_reported() {
        let settings = SeederSettings {
            plan: Some("missing".to_owned()),
            ..SeederSettings::default()
        };

        let error = settings.resolve_plan().expect_err("plan missing");

        assert!(matches!(
            error,
            SettingsError::Registry(RegistryError::PlanNotFound { .. })
        ));
    }

    #[rstest]
    fn blank_plan_name_is_rejected() {
        let settings = SeederSettings {
            plan: Some("   ".to_owned()),
            ..SeederSettings::default()
        };

        assert!(matches!(
            settings.resolve_plan(),
            Err(SettingsError::EmptyPlanName)
        ));
    }

    #[rstest]
    fn missing_registry_reports_its_path() {
        let path = std::env::temp_dir().join("warehouse-no-such-registry.json");
        let settings = SeederSettings {
            plan: Some("demo".to_owned()),
            registry_path: Some(path.clone()),
            ..SeederSettings::default()
        };

        let error = settings.resolve_plan().expect_err("registry missing");

        assert!(matches!(error, SettingsError::RegistryRead { path: reported, .. } if reported == path));
    }
}
