//! Cross-section oracle boundary.
//!
//! The oracle measures the illuminated panel area (as a fraction of the
//! configured reference area) for a given body-to-sun attitude. The real
//! measurement backs onto a single mutable 3D scene, so the trait takes
//! `&mut self` and callers must serialize their calls per timestep.

use nalgebra::{UnitQuaternion, Vector3};
use thiserror::Error;

/// Errors surfaced by cross-section measurements.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("cross-section target `{0}` is not available")]
    TargetMissing(String),
    #[error("cross-section measurement failed: {0}")]
    Measurement(String),
    #[error("oracle returned illuminated fraction {0} outside [0, 1]")]
    FractionOutOfRange(f64),
}

/// Measures the illuminated cross-section for a sun-pointing attitude.
pub trait CrossSectionOracle {
    /// Illuminated fraction of the reference area at timestep `index`, in
    /// `[0, 1]`. The index keeps recorded measurements aligned with the input
    /// series even when eclipsed steps skip measurement entirely.
    fn measure(
        &mut self,
        index: usize,
        attitude: &UnitQuaternion<f64>,
    ) -> Result<f64, OracleError>;
}

/// One body-fixed flat panel.
#[derive(Debug, Clone, Copy)]
pub struct Panel {
    /// Outward panel normal in the body frame.
    pub normal_body: Vector3<f64>,
    /// Panel area as a fraction of the reference area.
    pub area_fraction: f64,
}

/// Analytic oracle projecting a set of flat panels toward the Sun.
///
/// Under the alignment solver's attitude the body x-axis points away from
/// the Sun, so in the slewed body frame the sun direction is `-x̂` and each
/// panel contributes `area · max(0, n̂ · (-x̂))`. The quaternion is accepted
/// per the oracle contract but carries no extra information for flat convex
/// layouts; concave geometries need a rendering oracle for self-shadowing.
#[derive(Debug, Clone)]
pub struct PanelArrayOracle {
    panels: Vec<Panel>,
}

impl PanelArrayOracle {
    pub fn new(panels: Vec<Panel>) -> Self {
        Self { panels }
    }

    /// Single panel of the full reference area, mounted on the -x body face
    /// so it is fully illuminated under the alignment solver's attitude.
    pub fn single_panel() -> Self {
        Self::new(vec![Panel {
            normal_body: -Vector3::x(),
            area_fraction: 1.0,
        }])
    }
}

impl CrossSectionOracle for PanelArrayOracle {
    fn measure(
        &mut self,
        _index: usize,
        _attitude: &UnitQuaternion<f64>,
    ) -> Result<f64, OracleError> {
        let sun_body = -Vector3::x();
        let fraction: f64 = self
            .panels
            .iter()
            .map(|panel| {
                panel.area_fraction * panel.normal_body.normalize().dot(&sun_body).max(0.0)
            })
            .sum();
        if !(0.0..=1.0).contains(&fraction) {
            return Err(OracleError::FractionOutOfRange(fraction));
        }
        Ok(fraction)
    }
}

/// Playback oracle replaying a recorded per-timestep cross-section series.
///
/// Used to validate the pipeline against externally measured areas (e.g. an
/// STK export); the attitude argument is accepted but not consulted. Rows
/// are looked up by timestep index, so eclipsed steps that skip measurement
/// leave later reads aligned with the recording. Errors when the index falls
/// outside the recording rather than inventing data.
#[derive(Debug, Clone)]
pub struct RecordedOracle {
    name: String,
    fractions: Vec<f64>,
}

impl RecordedOracle {
    pub fn new(name: impl Into<String>, fractions: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            fractions,
        }
    }

    /// Number of recorded timesteps.
    pub fn len(&self) -> usize {
        self.fractions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fractions.is_empty()
    }
}

impl CrossSectionOracle for RecordedOracle {
    fn measure(
        &mut self,
        index: usize,
        _attitude: &UnitQuaternion<f64>,
    ) -> Result<f64, OracleError> {
        let Some(&fraction) = self.fractions.get(index) else {
            return Err(OracleError::TargetMissing(self.name.clone()));
        };
        if !(0.0..=1.0).contains(&fraction) {
            return Err(OracleError::FractionOutOfRange(fraction));
        }
        Ok(fraction)
    }
}
