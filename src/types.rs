//! Shared types used across BATCHCUT.
//! Includes the `Pipeline` selector and the operator-facing value types
//! `TargetSize` ("WIDTHxHEIGHT") and `Dpi` ("X,Y").
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Which of the two processing pipelines to apply.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
pub enum Pipeline {
    /// Face-aware crop to a fixed output size.
    Autocrop,
    /// Background removal onto white, then resize to the print size.
    Matting,
}

impl std::fmt::Display for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pipeline::Autocrop => write!(f, "Autocrop"),
            Pipeline::Matting => write!(f, "Matting"),
        }
    }
}

/// Output dimensions in pixels. Every processed image is exactly this size.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

impl FromStr for TargetSize {
    type Err = Error;

    /// Parses the operator syntax `WIDTHxHEIGHT`, e.g. `1350x1800`.
    fn from_str(s: &str) -> Result<Self, Error> {
        let invalid = || Error::InvalidArgument {
            arg: "size",
            value: s.to_string(),
        };
        let (w, h) = s.split_once(['x', 'X']).ok_or_else(invalid)?;
        let width = w.trim().parse::<u32>().map_err(|_| invalid())?;
        let height = h.trim().parse::<u32>().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        Ok(Self { width, height })
    }
}

impl std::fmt::Display for TargetSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Pixels-per-inch pair embedded in the saved JPEG header.
///
/// Write-only metadata: it affects print-size interpretation of the file,
/// never pixel content.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Dpi {
    pub x: u16,
    pub y: u16,
}

impl FromStr for Dpi {
    type Err = Error;

    /// Parses the operator syntax `X,Y`, e.g. `300,300`.
    fn from_str(s: &str) -> Result<Self, Error> {
        let invalid = || Error::InvalidArgument {
            arg: "dpi",
            value: s.to_string(),
        };
        let (x, y) = s.split_once(',').ok_or_else(invalid)?;
        let x = x.trim().parse::<u16>().map_err(|_| invalid())?;
        let y = y.trim().parse::<u16>().map_err(|_| invalid())?;
        if x == 0 || y == 0 {
            return Err(invalid());
        }
        Ok(Self { x, y })
    }
}

impl std::fmt::Display for Dpi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}
