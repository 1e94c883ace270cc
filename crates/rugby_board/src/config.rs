//! # Board Configuration
//!
//! Every drawing constant and the storage key live here so hosts can tune
//! the board without touching the renderer.
//!
//! ```rust
//! use rugby_board::config::BoardConfig;
//!
//! let config = BoardConfig::default();
//! assert_eq!(config.storage_key, "rugby-u12-state");
//! ```

use std::{env, fs};

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, Result};
use crate::geometry::TOKEN_HALF_EXTENT;
use crate::persistence::STORAGE_KEY;
use crate::token::RestorePolicy;

pub const CONFIG_PATH_ENV: &str = "RUGBY_BOARD_CONFIG_PATH";

/// Field markings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldStyle {
    pub background: String,
    pub line_color: String,
    pub line_width: f64,
    /// Inset of the bounding rectangle on all sides
    pub margin: f64,
    /// Distance of each 22 m line from the midline
    pub twenty_two_offset: f64,
    pub twenty_two_dash: Vec<f64>,
    pub end_zone_width: f64,
    pub end_zone_fill: String,
}

impl Default for FieldStyle {
    fn default() -> Self {
        Self {
            background: "#8fd18f".to_string(),
            line_color: "#ffffff".to_string(),
            line_width: 3.0,
            margin: 20.0,
            twenty_two_offset: 220.0,
            twenty_two_dash: vec![10.0, 8.0],
            end_zone_width: 60.0,
            end_zone_fill: "rgba(255,255,255,0.08)".to_string(),
        }
    }
}

/// Movement arrows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrowStyle {
    pub color: String,
    pub line_width: f64,
    pub head_length: f64,
    /// Wing angle from the shaft, in degrees
    pub head_angle_deg: f64,
}

impl Default for ArrowStyle {
    fn default() -> Self {
        Self { color: "#333333".to_string(), line_width: 3.0, head_length: 12.0, head_angle_deg: 30.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub field: FieldStyle,
    pub arrow: ArrowStyle,
    pub token_half_extent: f64,
    pub storage_key: String,
    pub restore_policy: RestorePolicy,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            field: FieldStyle::default(),
            arrow: ArrowStyle::default(),
            token_half_extent: TOKEN_HALF_EXTENT,
            storage_key: STORAGE_KEY.to_string(),
            restore_policy: RestorePolicy::default(),
        }
    }
}

impl BoardConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| BoardError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file named by `RUGBY_BOARD_CONFIG_PATH`, or defaults when unset.
    pub fn from_env() -> Result<Self> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(Self::default());
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|source| BoardError::ConfigIo { path: path.to_string(), source })?;
        let config = Self::from_json(&content)?;
        log::info!("Board config loaded from {}", path);
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.storage_key.trim().is_empty() {
            return Err(BoardError::InvalidConfig("storage_key is empty".to_string()));
        }

        let field = &self.field;
        let arrow = &self.arrow;
        non_negative("token_half_extent", self.token_half_extent)?;
        non_negative("field.line_width", field.line_width)?;
        non_negative("field.margin", field.margin)?;
        non_negative("field.twenty_two_offset", field.twenty_two_offset)?;
        non_negative("field.end_zone_width", field.end_zone_width)?;
        for &segment in &field.twenty_two_dash {
            non_negative("field.twenty_two_dash", segment)?;
        }
        non_negative("arrow.line_width", arrow.line_width)?;
        non_negative("arrow.head_length", arrow.head_length)?;
        non_negative("arrow.head_angle_deg", arrow.head_angle_deg)?;
        Ok(())
    }
}

fn non_negative(name: &str, value: f64) -> Result<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(BoardError::InvalidConfig(format!("{} must be a non-negative number, got {}", name, value)))
    }
}
