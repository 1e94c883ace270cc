use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::error::PersistError;
use crate::annotation::{AnnotationStore, Arrow};
use crate::token::{Role, TokenRegistry};

/// The persisted board: every token and every arrow.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct BoardSnapshot {
    pub pieces: Vec<PieceState>,

    /// Older saves may omit arrows or store `null`
    #[serde(default, deserialize_with = "null_as_empty")]
    pub arrows: Vec<Arrow>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Arrow>, D::Error> {
    Ok(Option::<Vec<Arrow>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Role as written in a save. Roles this board does not field are kept
/// verbatim and skipped on restore.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum PieceRole {
    Known(Role),
    Unknown(String),
}

impl PieceRole {
    pub fn known(&self) -> Option<Role> {
        match self {
            Self::Known(role) => Some(*role),
            Self::Unknown(_) => None,
        }
    }
}

impl From<Role> for PieceRole {
    fn from(role: Role) -> Self {
        Self::Known(role)
    }
}

impl fmt::Display for PieceRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Known(role) => f.write_str(role.as_str()),
            Self::Unknown(name) => f.write_str(name),
        }
    }
}

/// One token as stored: role, centre position, cosmetic classes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PieceState {
    pub role: PieceRole,
    pub x: f64,
    pub y: f64,
    #[serde(rename = "classList", default)]
    pub class_list: Vec<String>,
}

impl BoardSnapshot {
    pub fn capture(tokens: &TokenRegistry, annotations: &AnnotationStore) -> Self {
        Self { pieces: tokens.snapshot(), arrows: annotations.all().to_vec() }
    }

    /// JSON text; refuses coordinates JSON cannot hold (they would read
    /// back as `null`).
    pub fn to_json(&self) -> Result<String, PersistError> {
        self.check_finite()?;
        serde_json::to_string(self).map_err(PersistError::Serialization)
    }

    fn check_finite(&self) -> Result<(), PersistError> {
        for (i, piece) in self.pieces.iter().enumerate() {
            if !piece.x.is_finite() || !piece.y.is_finite() {
                return Err(PersistError::InvalidData(format!(
                    "piece {} ({}) at ({}, {})",
                    i, piece.role, piece.x, piece.y
                )));
            }
        }
        for (i, arrow) in self.arrows.iter().enumerate() {
            let coords = [arrow.from.x, arrow.from.y, arrow.to.x, arrow.to.y];
            if coords.iter().any(|c| !c.is_finite()) {
                return Err(PersistError::InvalidData(format!("arrow {} has a non-finite point", i)));
            }
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, PersistError> {
        serde_json::from_str(json).map_err(PersistError::CorruptData)
    }
}
