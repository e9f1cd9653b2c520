use crate::domain::error::{CbtcError, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// How directed CBTC links are reconciled into the final topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum AsymmetricMode {
    /// Keep the asymmetric graph as built
    #[default]
    Directed,
    /// Add the reverse of every one-sided link
    UnionSymmetrize,
    /// Remove one-sided links unless coverage depends on them
    DropAsymmetric,
}

/// How a node grows its transmission power while searching for coverage
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PowerSchedule {
    /// Admit one neighbor at a time, nearest first
    #[default]
    Incremental,
    /// Start at `initial_power` and multiply by `growth_factor` each round,
    /// admitting every neighbor within the current power as a batch
    Geometric {
        initial_power: f64,
        growth_factor: f64,
    },
}

/// Immutable simulation configuration, threaded explicitly through every stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub node_count: usize,
    pub transmission_radius: f64,
    /// Cone width α in radians, within (0, 2π)
    pub cone_angle: f64,
    pub shrink_back: bool,
    pub asymmetric_mode: AsymmetricMode,
    pub path_loss_exponent: f64,
    pub random_seed: u64,
    /// Side length of the square deployment area
    pub area_size: f64,
    pub power_schedule: PowerSchedule,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            node_count: 100,
            transmission_radius: 20.0,
            cone_angle: 2.0 * PI / 3.0,
            shrink_back: false,
            asymmetric_mode: AsymmetricMode::Directed,
            path_loss_exponent: 2.0,
            random_seed: 42,
            area_size: 100.0,
            power_schedule: PowerSchedule::Incremental,
        }
    }
}

impl SimulationConfig {
    /// Check every field against its domain.
    pub fn validate(&self) -> Result<()> {
        if self.node_count < 2 {
            return Err(CbtcError::config(format!(
                "node_count must be at least 2, got {}",
                self.node_count
            )));
        }
        if !(self.transmission_radius.is_finite() && self.transmission_radius > 0.0) {
            return Err(CbtcError::config(format!(
                "transmission_radius must be positive, got {}",
                self.transmission_radius
            )));
        }
        if !(self.cone_angle > 0.0 && self.cone_angle < TAU) {
            return Err(CbtcError::config(format!(
                "cone_angle must lie in (0, 2π), got {}",
                self.cone_angle
            )));
        }
        if !(self.path_loss_exponent.is_finite() && self.path_loss_exponent >= 1.0) {
            return Err(CbtcError::config(format!(
                "path_loss_exponent must be at least 1, got {}",
                self.path_loss_exponent
            )));
        }
        if !(self.area_size.is_finite() && self.area_size > 0.0) {
            return Err(CbtcError::config(format!(
                "area_size must be positive, got {}",
                self.area_size
            )));
        }
        if let PowerSchedule::Geometric {
            initial_power,
            growth_factor,
        } = self.power_schedule
        {
            if !(initial_power.is_finite() && initial_power > 0.0) {
                return Err(CbtcError::config(format!(
                    "initial_power must be positive, got {initial_power}"
                )));
            }
            if !(growth_factor.is_finite() && growth_factor > 1.0) {
                return Err(CbtcError::config(format!(
                    "growth_factor must be greater than 1, got {growth_factor}"
                )));
            }
        }
        Ok(())
    }

    pub fn with_cone_angle(mut self, cone_angle: f64) -> Self {
        self.cone_angle = cone_angle;
        self
    }

    pub fn with_shrink_back(mut self, shrink_back: bool) -> Self {
        self.shrink_back = shrink_back;
        self
    }

    pub fn with_asymmetric_mode(mut self, mode: AsymmetricMode) -> Self {
        self.asymmetric_mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let c = SimulationConfig::default();
        assert!(c.validate().is_ok());
        assert!((c.cone_angle - 2.0 * PI / 3.0).abs() < 1e-12);
        assert!((c.path_loss_exponent - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_cone_angle_outside_open_interval() {
        for bad in [0.0, -1.0, TAU, 7.0, f64::NAN] {
            let c = SimulationConfig::default().with_cone_angle(bad);
            assert!(
                matches!(c.validate(), Err(CbtcError::InvalidConfiguration(_))),
                "cone_angle {bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_bad_scalars() {
        let mut c = SimulationConfig {
            node_count: 1,
            ..Default::default()
        };
        assert!(c.validate().is_err());

        c.node_count = 2;
        c.transmission_radius = 0.0;
        assert!(c.validate().is_err());

        c.transmission_radius = 1.0;
        c.path_loss_exponent = 0.5;
        assert!(c.validate().is_err());

        c.path_loss_exponent = 1.0;
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_growing_geometric_schedule() {
        let c = SimulationConfig {
            power_schedule: PowerSchedule::Geometric {
                initial_power: 2.0,
                growth_factor: 1.0,
            },
            ..Default::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_deserialize_partial_json_uses_defaults() {
        let c: SimulationConfig = serde_json::from_str(
            r#"{ "node_count": 10, "asymmetric_mode": "drop-asymmetric",
                 "power_schedule": { "kind": "geometric", "initial_power": 2.0, "growth_factor": 1.5 } }"#,
        )
        .unwrap();
        assert_eq!(c.node_count, 10);
        assert_eq!(c.asymmetric_mode, AsymmetricMode::DropAsymmetric);
        assert_eq!(c.random_seed, 42);
        assert!(matches!(c.power_schedule, PowerSchedule::Geometric { .. }));
    }
}
