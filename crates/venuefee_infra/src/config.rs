//! Dashboard configuration defaults.
//!
//! Every tunable has a default in [`param_default`]. Explicit values (from the
//! environment or a caller override) take precedence, but are rejected when
//! they are non-finite or negative; the process fails closed instead of
//! running with a nonsensical chart or comparison basis.

use std::num::NonZeroU32;

use thiserror::Error;
use venuefee_core::chart::DomainConfig;

/// Prefix for environment overrides: `VENUEFEE_DEFAULT_DAY_BASIS`, ...
pub const ENV_PREFIX: &str = "VENUEFEE_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigParam {
    // Comparison basis
    DefaultDayBasis,
    DefaultHoverVolumeM,

    // Chart domains
    VolumePaddingFrac,
    FeePaddingFrac,
    MinFeePaddingBps,
    MakerFeeFloorBps,
    TakerFeeFloorBps,
}

/// Config value rejected or unavailable.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("config fail-closed: '{param_name}' {reason}")]
pub struct MissingConfigError {
    pub param_name: &'static str,
    pub reason: &'static str,
}

/// Default for a parameter, or `None` if it must be supplied explicitly.
pub fn param_default(param: ConfigParam) -> Option<f64> {
    match param {
        ConfigParam::DefaultDayBasis => Some(14.0),
        ConfigParam::DefaultHoverVolumeM => Some(2000.0),

        ConfigParam::VolumePaddingFrac => Some(0.10),
        ConfigParam::FeePaddingFrac => Some(0.30),
        ConfigParam::MinFeePaddingBps => Some(1.0),
        // Floors are magnitudes; the domain extends to the negated value.
        ConfigParam::MakerFeeFloorBps => Some(3.0),
        ConfigParam::TakerFeeFloorBps => Some(1.0),
    }
}

/// snake_case name of a parameter.
pub fn param_name(param: ConfigParam) -> &'static str {
    match param {
        ConfigParam::DefaultDayBasis => "default_day_basis",
        ConfigParam::DefaultHoverVolumeM => "default_hover_volume_m",
        ConfigParam::VolumePaddingFrac => "volume_padding_frac",
        ConfigParam::FeePaddingFrac => "fee_padding_frac",
        ConfigParam::MinFeePaddingBps => "min_fee_padding_bps",
        ConfigParam::MakerFeeFloorBps => "maker_fee_floor_bps",
        ConfigParam::TakerFeeFloorBps => "taker_fee_floor_bps",
    }
}

/// Environment variable holding the override for `param`.
pub fn env_var_name(param: ConfigParam) -> String {
    format!("{ENV_PREFIX}{}", param_name(param).to_ascii_uppercase())
}

/// Update alongside `ALL_PARAMS` when adding a variant.
pub const EXPECTED_PARAM_COUNT: usize = 7;

pub const ALL_PARAMS: &[ConfigParam] = &[
    ConfigParam::DefaultDayBasis,
    ConfigParam::DefaultHoverVolumeM,
    ConfigParam::VolumePaddingFrac,
    ConfigParam::FeePaddingFrac,
    ConfigParam::MinFeePaddingBps,
    ConfigParam::MakerFeeFloorBps,
    ConfigParam::TakerFeeFloorBps,
];

/// Resolve a configuration value.
///
/// - `Some(v)` with `v` finite and non-negative → `v`
/// - `Some(v)` otherwise → `Err`
/// - `None` → the default, or `Err` if there is none
pub fn resolve_config_value(
    param: ConfigParam,
    value: Option<f64>,
) -> Result<f64, MissingConfigError> {
    if let Some(v) = value {
        if !v.is_finite() {
            return Err(MissingConfigError {
                param_name: param_name(param),
                reason: "is non-finite (NaN or Infinity)",
            });
        }
        if v < 0.0 {
            return Err(MissingConfigError {
                param_name: param_name(param),
                reason: "is negative; all config params must be non-negative",
            });
        }
        return Ok(v);
    }
    param_default(param).ok_or(MissingConfigError {
        param_name: param_name(param),
        reason: "is missing and has no default",
    })
}

/// Fully resolved dashboard settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Day basis every exchange is normalized to before comparison.
    pub default_day_basis: NonZeroU32,
    /// Initial ranking volume, in millions.
    pub default_hover_volume_m: f64,
    pub domains: DomainConfig,
}

impl DashboardConfig {
    /// Resolve every parameter from `overrides`, falling back to defaults.
    ///
    /// Values that cannot be parsed as numbers are rejected rather than
    /// ignored.
    pub fn from_lookup<F>(mut overrides: F) -> Result<Self, MissingConfigError>
    where
        F: FnMut(ConfigParam) -> Option<String>,
    {
        Self::resolve(|param| {
            overrides(param).map(|raw| raw.trim().parse::<f64>().unwrap_or(f64::NAN))
        })
    }

    /// Resolve every parameter from numeric overrides.
    pub fn resolve<F>(mut overrides: F) -> Result<Self, MissingConfigError>
    where
        F: FnMut(ConfigParam) -> Option<f64>,
    {
        let mut get = |param| resolve_config_value(param, overrides(param));

        let day_basis = get(ConfigParam::DefaultDayBasis)?;
        let default_day_basis = Some(day_basis)
            .filter(|days| days.fract() == 0.0 && *days <= f64::from(u32::MAX))
            .and_then(|days| NonZeroU32::new(days as u32))
            .ok_or(MissingConfigError {
                param_name: param_name(ConfigParam::DefaultDayBasis),
                reason: "must be a positive integer",
            })?;

        Ok(Self {
            default_day_basis,
            default_hover_volume_m: get(ConfigParam::DefaultHoverVolumeM)?,
            domains: DomainConfig {
                volume_padding_frac: get(ConfigParam::VolumePaddingFrac)?,
                fee_padding_frac: get(ConfigParam::FeePaddingFrac)?,
                min_fee_padding_bps: get(ConfigParam::MinFeePaddingBps)?,
                maker_fee_floor_bps: get(ConfigParam::MakerFeeFloorBps)?,
                taker_fee_floor_bps: get(ConfigParam::TakerFeeFloorBps)?,
            },
        })
    }

    /// Resolve from `VENUEFEE_*` environment variables.
    pub fn from_env() -> Result<Self, MissingConfigError> {
        Self::from_lookup(|param| std::env::var(env_var_name(param)).ok())
    }
}
