//! # appkit-config
//!
//! Validation configuration: schema, env overrides, and file loading.
//! This crate depends on `validation` and `shared` only.

/// Environment variable parsing and merging.
pub mod env;
/// Config loading helpers (env + file).
pub mod load;
/// Configuration schema types and helpers.
pub mod schema;

pub use env::{
    ENV_PREFIX, ENV_VALIDATION_ISSUE_PATH, ENV_VALIDATION_LOG_REJECTIONS, EnvParseError,
    ValidationEnv, apply_env_overrides,
};
pub use load::{
    load_config_from_path, load_config_from_sources, load_config_std_env, to_pretty_json,
    to_pretty_toml,
};
pub use schema::{
    AppkitConfig, CURRENT_CONFIG_VERSION, ValidationConfig, config_json_schema, parse_config_json,
    parse_config_toml, validate_config_value,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
