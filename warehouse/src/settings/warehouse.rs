//! Connection settings shared by both binaries.

use std::env;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::{Identifier, PostgresWarehouse, TableLayout};

use super::SettingsError;

const DATABASE_URL_FALLBACK: &str = "DATABASE_URL";

/// Seconds to wait for a connection before giving up.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Where and as whom to connect to the warehouse.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "WAREHOUSE")]
pub struct WarehouseSettings {
    /// `PostgreSQL` connection URL.
    pub url: Option<String>,
    /// Optional database qualifier for three-part table names.
    pub database: Option<String>,
    /// Optional role assumed with `SET ROLE` after connecting.
    pub role: Option<String>,
    /// Connection timeout in seconds; `0` waits indefinitely.
    #[ortho_config(default = 10)]
    pub connect_timeout_secs: u64,
}

impl Default for WarehouseSettings {
    fn default() -> Self {
        Self {
            url: None,
            database: None,
            role: None,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl WarehouseSettings {
    /// Resolve the connection URL.
    ///
    /// `explicit` (the `--database-url` flag) wins over `WAREHOUSE_URL`,
    /// which wins over `DATABASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::EmptyDatabaseUrl`] when the winning value is
    /// blank and [`SettingsError::MissingDatabaseUrl`] when none is set.
    pub fn database_url(&self, explicit: Option<String>) -> Result<String, SettingsError> {
        if let Some(value) = explicit {
            return non_blank(value, "--database-url");
        }
        if let Some(value) = self.url.clone() {
            return non_blank(value, "WAREHOUSE_URL");
        }
        let from_env =
            env::var(DATABASE_URL_FALLBACK).map_err(|_| SettingsError::MissingDatabaseUrl)?;
        non_blank(from_env, DATABASE_URL_FALLBACK)
    }

    /// Connection timeout, or `None` when set to wait indefinitely.
    #[must_use]
    pub const fn connect_timeout(&self) -> Option<Duration> {
        if self.connect_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.connect_timeout_secs))
        }
    }

    /// Table layout, qualified with the configured database if any.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidIdentifier`] for an unsafe qualifier.
    pub fn table_layout(&self) -> Result<TableLayout, SettingsError> {
        let database = optional_identifier(self.database.as_deref(), "database qualifier")?;
        Ok(TableLayout::standard(database))
    }

    /// Build a connector from these settings.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if the URL is missing or blank, or if the
    /// database qualifier or role is not a plain identifier. No connection is
    /// attempted.
    pub fn connector(
        &self,
        explicit_url: Option<String>,
    ) -> Result<PostgresWarehouse, SettingsError> {
        let url = self.database_url(explicit_url)?;
        let mut connector = PostgresWarehouse::new(url, self.table_layout()?);
        if let Some(timeout) = self.connect_timeout() {
            connector = connector.with_connect_timeout(timeout);
        }
        match optional_identifier(self.role.as_deref(), "role")? {
            Some(role) => Ok(connector.with_role(role)),
            None => Ok(connector),
        }
    }
}

fn non_blank(value: String, origin: &'static str) -> Result<String, SettingsError> {
    if value.trim().is_empty() {
        return Err(SettingsError::EmptyDatabaseUrl { origin });
    }
    Ok(value)
}

fn optional_identifier(
    value: Option<&str>,
    setting: &'static str,
) -> Result<Option<Identifier>, SettingsError> {
    value
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(|raw| {
            Identifier::new(raw).map_err(|source| SettingsError::InvalidIdentifier { setting, source })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    //! Unit tests for connection settings.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use crate::domain::Entity;

    fn load_from_empty_args() -> WarehouseSettings {
        WarehouseSettings::load_from_iter([OsString::from("kpi-dashboard")])
            .expect("config should load")
    }

    fn cleared_env(url: Option<&str>, fallback: Option<&str>) -> impl Sized {
        lock_env([
            ("WAREHOUSE_URL", url.map(str::to_owned)),
            ("WAREHOUSE_DATABASE", None::<String>),
            ("WAREHOUSE_ROLE", None::<String>),
            ("WAREHOUSE_CONNECT_TIMEOUT_SECS", None::<String>),
            (DATABASE_URL_FALLBACK, fallback.map(str::to_owned)),
        ])
    }

    #[rstest]
    fn defaults_are_empty() {
        let _guard = cleared_env(None, None);

        let settings = load_from_empty_args();

        assert!(settings.url.is_none());
        assert!(settings.database.is_none());
        assert!(settings.role.is_none());
        assert_eq!(settings.connect_timeout_secs, DEFAULT_CONNECT_TIMEOUT_SECS);
        assert_eq!(
            settings.connect_timeout_secs,
            WarehouseSettings::default().connect_timeout_secs
        );
    }

    #[rstest]
    fn explicit_url_is_enough_without_any_environment() {
        let _guard = cleared_env(None, None);

        let settings = load_from_empty_args();
        let connector = settings.connector(Some("postgres://localhost/warehouse".to_owned()));

        assert!(connector.is_ok(), "{connector:?}");
        assert_eq!(
            settings.connect_timeout(),
            Some(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        );
    }

    #[rstest]
    #[case(0, None)]
    #[case(3, Some(Duration::from_secs(3)))]
    fn zero_timeout_waits_indefinitely(#[case] seconds: u64, #[case] expected: Option<Duration>) {
        let settings = WarehouseSettings {
            connect_timeout_secs: seconds,
            ..WarehouseSettings::default()
        };

        assert_eq!(settings.connect_timeout(), expected);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("WAREHOUSE_URL", Some("postgres://env/warehouse".to_owned())),
            ("WAREHOUSE_DATABASE", Some("analytics".to_owned())),
            ("WAREHOUSE_ROLE", Some("reporting".to_owned())),
            ("WAREHOUSE_CONNECT_TIMEOUT_SECS", Some("30".to_owned())),
            (DATABASE_URL_FALLBACK, None::<String>),
        ]);

        let settings = load_from_empty_args();

        assert_eq!(settings.url.as_deref(), Some("postgres://env/warehouse"));
        assert_eq!(settings.database.as_deref(), Some("analytics"));
        assert_eq!(settings.role.as_deref(), Some("reporting"));
        assert_eq!(settings.connect_timeout_secs, 30);
        let layout = settings.table_layout().expect("valid layout");
        assert_eq!(
            layout.table(Entity::Product).to_string(),
            "analytics.products_schema.products_table"
        );
    }

    #[rstest]
    #[case(
        Some("postgres://flag"),
        Some("postgres://settings"),
        Some("postgres://fallback"),
        "postgres://flag"
    )]
    #[case(
        None,
        Some("postgres://settings"),
        Some("postgres://fallback"),
        "postgres://settings"
    )]
    #[case(None, None, Some("postgres://fallback"), "postgres://fallback")]
    fn url_precedence_is_flag_then_settings_then_fallback(
        #[case] flag: Option<&str>,
        #[case] configured: Option<&str>,
        #[case] fallback: Option<&str>,
        #[case] expected: &str,
    ) {
        let _guard = cleared_env(None, fallback);
        let settings = WarehouseSettings {
            url: configured.map(str::to_owned),
            ..WarehouseSettings::default()
        };

        let url = settings
            .database_url(flag.map(str::to_owned))
            .expect("url resolves");

        assert_eq!(url, expected);
    }

    #[rstest]
    fn missing_url_is_reported() {
        let _guard = cleared_env(None, None);

        let error = WarehouseSettings::default()
            .database_url(None)
            .expect_err("no url configured");

        assert!(matches!(error, SettingsError::MissingDatabaseUrl));
    }

    #[rstest]
    #[case(Some("  "), None, "--database-url")]
    #[case(None, Some(""), "WAREHOUSE_URL")]
    fn blank_url_is_rejected(
        #[case] flag: Option<&str>,
        #[case] configured: Option<&str>,
        #[case] expected_origin: &str,
    ) {
        let _guard = cleared_env(None, Some("postgres://fallback"));
        let settings = WarehouseSettings {
            url: configured.map(str::to_owned),
            ..WarehouseSettings::default()
        };

        let error = settings
            .database_url(flag.map(str::to_owned))
            .expect_err("blank url");

        assert!(
            matches!(error, SettingsError::EmptyDatabaseUrl { origin } if origin == expected_origin)
        );
    }

    #[rstest]
    fn unsafe_role_is_rejected_before_connecting() {
        let settings = WarehouseSettings {
            url: Some("postgres://localhost/warehouse".to_owned()),
            role: Some("admin; DROP ROLE x".to_owned()),
            ..WarehouseSettings::default()
        };

        let error = settings.connector(None).expect_err("invalid role");

        assert!(matches!(
            error,
            SettingsError::InvalidIdentifier { setting: "role", .. }
        ));
    }
}
