use crate::domain::config::{AsymmetricMode, SimulationConfig};
use std::f64::consts::PI;

/// What a scenario runs on the shared network
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScenarioKind {
    /// Every node transmits at full radius
    NoTopologyControl,
    Cbtc {
        cone_angle: f64,
        shrink_back: bool,
        asymmetric_mode: AsymmetricMode,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub label: String,
    pub kind: ScenarioKind,
}

impl Scenario {
    pub fn baseline(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: ScenarioKind::NoTopologyControl,
        }
    }

    pub fn cbtc(
        label: impl Into<String>,
        cone_angle: f64,
        shrink_back: bool,
        asymmetric_mode: AsymmetricMode,
    ) -> Self {
        Self {
            label: label.into(),
            kind: ScenarioKind::Cbtc {
                cone_angle,
                shrink_back,
                asymmetric_mode,
            },
        }
    }

    /// The seven-panel comparison: baseline, two cone angles, then the optimizations layered on.
    pub fn paper_suite() -> Vec<Self> {
        let narrow = 2.0 * PI / 3.0;
        let wide = 5.0 * PI / 6.0;
        vec![
            Self::baseline("(a) no topology control"),
            Self::cbtc("(b) α = 2π/3", narrow, false, AsymmetricMode::Directed),
            Self::cbtc("(c) α = 5π/6", wide, false, AsymmetricMode::Directed),
            Self::cbtc("(d) α = 2π/3, shrink-back", narrow, true, AsymmetricMode::Directed),
            Self::cbtc("(e) α = 5π/6, shrink-back", wide, true, AsymmetricMode::Directed),
            Self::cbtc(
                "(f) α = 2π/3, shrink-back, asymmetric removal",
                narrow,
                true,
                AsymmetricMode::DropAsymmetric,
            ),
            Self::cbtc(
                "(g) α = 5π/6, all optimizations",
                wide,
                true,
                AsymmetricMode::DropAsymmetric,
            ),
        ]
    }

    /// Configuration for this scenario, keeping the base's placement and power settings.
    ///
    /// Returns `None` for the baseline, which needs no CBTC run.
    pub fn apply(&self, base: &SimulationConfig) -> Option<SimulationConfig> {
        match self.kind {
            ScenarioKind::NoTopologyControl => None,
            ScenarioKind::Cbtc {
                cone_angle,
                shrink_back,
                asymmetric_mode,
            } => Some(
                base.clone()
                    .with_cone_angle(cone_angle)
                    .with_shrink_back(shrink_back)
                    .with_asymmetric_mode(asymmetric_mode),
            ),
        }
    }
}
