use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{Dpi, Pipeline, TargetSize};

/// Batch parameters suitable for config files and presets.
///
/// Constant for a whole batch run; defaults target a 4.5x6 inch print
/// (1350x1800 at 300,300 DPI, confidence 0.5, 70% chin cut).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchParams {
    pub pipeline: Pipeline,
    pub target: TargetSize,
    pub dpi: Dpi,
    /// Minimum detector confidence for a face to count, in [0, 1].
    pub confidence: f32,
    /// Chin cut position as a fraction of the face box height, in (0, 1).
    pub cut_fraction: f64,
}

impl Default for BatchParams {
    fn default() -> Self {
        Self {
            pipeline: Pipeline::Autocrop,
            target: TargetSize {
                width: 1350,
                height: 1800,
            },
            dpi: Dpi { x: 300, y: 300 },
            confidence: 0.5,
            cut_fraction: 0.7,
        }
    }
}

impl BatchParams {
    /// Validate ranges up front; a bad value aborts before any file is touched.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(Error::InvalidArgument {
                arg: "confidence",
                value: self.confidence.to_string(),
            });
        }
        if !(self.cut_fraction > 0.0 && self.cut_fraction < 1.0) {
            return Err(Error::InvalidArgument {
                arg: "cut_fraction",
                value: self.cut_fraction.to_string(),
            });
        }
        Ok(())
    }
}
