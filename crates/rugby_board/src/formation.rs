//! Formation Presets
//!
//! One literal offset table per (mode, role) pair, anchored at the centre
//! of the canvas. Applying a formation is a pure lookup: no search, no
//! randomness, and no remembered "current mode". Applying the same mode
//! twice with the same dimensions yields the same positions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, Result};
use crate::geometry::{FieldDimensions, Point};
use crate::token::{Role, TokenRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormationMode {
    #[serde(rename = "attaque")]
    Attack,
    #[serde(rename = "defense")]
    Defense,
    #[serde(rename = "contre")]
    Counter,
}

impl FormationMode {
    pub const ALL: [FormationMode; 3] = [Self::Attack, Self::Defense, Self::Counter];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Attack => "attaque",
            Self::Defense => "defense",
            Self::Counter => "contre",
        }
    }

    pub fn display_name_en(&self) -> &'static str {
        match self {
            Self::Attack => "Attack",
            Self::Defense => "Defense",
            Self::Counter => "Counter-attack",
        }
    }

    pub fn display_name_fr(&self) -> &'static str {
        match self {
            Self::Attack => "Attaque",
            Self::Defense => "Défense",
            Self::Counter => "Contre-attaque",
        }
    }
}

impl fmt::Display for FormationMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.display_name_en())
    }
}

impl FromStr for FormationMode {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "attack" | "attaque" => Ok(Self::Attack),
            "defense" | "defence" => Ok(Self::Defense),
            "counter" | "contre" => Ok(Self::Counter),
            other => Err(BoardError::UnknownMode(other.to_string())),
        }
    }
}

/// Pixel offset from the canvas centre.
pub type Offset = (f64, f64);

/// Literal target layout for one role in one mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormationPreset {
    pub mode: FormationMode,
    pub role: Role,
    pub description: &'static str,
    pub description_fr: &'static str,
    pub offsets: &'static [Offset],
}

impl FormationPreset {
    /// Absolute positions for `dims`.
    pub fn positions(&self, dims: FieldDimensions) -> Vec<Point> {
        let anchor = dims.center();
        self.offsets.iter().map(|&(dx, dy)| anchor.offset(dx, dy)).collect()
    }

    pub fn find(mode: FormationMode, role: Role) -> &'static FormationPreset {
        // the table covers every (mode, role) pair
        let index = mode_index(mode) * Role::ALL.len() + role_index(role);
        &FORMATION_PRESETS[index]
    }

    pub fn all() -> &'static [FormationPreset] {
        FORMATION_PRESETS
    }
}

fn mode_index(mode: FormationMode) -> usize {
    match mode {
        FormationMode::Attack => 0,
        FormationMode::Defense => 1,
        FormationMode::Counter => 2,
    }
}

fn role_index(role: Role) -> usize {
    match role {
        Role::Forward => 0,
        Role::Back => 1,
        Role::DefenderOpponent => 2,
    }
}

// ============================================================================
// Attack
// ============================================================================

pub const ATTACK_FORWARDS: FormationPreset = FormationPreset {
    mode: FormationMode::Attack,
    role: Role::Forward,
    description: "Forwards bunched centre-left to fix the defence",
    description_fr: "Avants: groupe au centre côté gauche (fixation)",
    offsets: &[(-140.0, -40.0), (-120.0, 10.0), (-160.0, 60.0), (-100.0, -90.0), (-80.0, 100.0)],
};

pub const ATTACK_BACKS: FormationPreset = FormationPreset {
    mode: FormationMode::Attack,
    role: Role::Back,
    description: "Backs in a deep line, shifted toward the right wing",
    description_fr: "Trois-quarts: ligne en profondeur, décalée vers l'aile droite",
    offsets: &[(-40.0, -80.0), (0.0, -20.0), (40.0, 40.0), (120.0, -40.0), (180.0, 20.0)],
};

pub const ATTACK_OPPONENTS: FormationPreset = FormationPreset {
    mode: FormationMode::Attack,
    role: Role::DefenderOpponent,
    description: "Opposition holding the halfway line",
    description_fr: "Défense: ligne médiane",
    offsets: &[
        (40.0, -120.0),
        (40.0, -80.0),
        (40.0, -40.0),
        (40.0, 0.0),
        (40.0, 40.0),
        (40.0, 80.0),
        (40.0, 120.0),
        (80.0, -60.0),
        (80.0, 60.0),
        (120.0, 0.0),
    ],
};

// ============================================================================
// Defense
// ============================================================================

pub const DEFENSE_FORWARDS: FormationPreset = FormationPreset {
    mode: FormationMode::Defense,
    role: Role::Forward,
    description: "Forwards in a compact central line ready to push up",
    description_fr: "Avants: ligne compacte au centre pour la montée",
    offsets: &[(-60.0, -80.0), (-60.0, -20.0), (-60.0, 40.0), (-60.0, 90.0), (-60.0, -130.0)],
};

pub const DEFENSE_BACKS: FormationPreset = FormationPreset {
    mode: FormationMode::Defense,
    role: Role::Back,
    description: "Backs covering the outside channels",
    description_fr: "Trois-quarts: couverture des extérieurs",
    offsets: &[(20.0, -120.0), (20.0, -40.0), (20.0, 40.0), (20.0, 120.0), (-20.0, 0.0)],
};

pub const DEFENSE_OPPONENTS: FormationPreset = FormationPreset {
    mode: FormationMode::Defense,
    role: Role::DefenderOpponent,
    description: "Opposition lined up facing (illustration)",
    description_fr: "Défense: en face (illustration)",
    offsets: &[
        (120.0, -120.0),
        (120.0, -80.0),
        (120.0, -40.0),
        (120.0, 0.0),
        (120.0, 40.0),
        (120.0, 80.0),
        (120.0, 120.0),
        (160.0, -60.0),
        (160.0, 60.0),
        (200.0, 0.0),
    ],
};

// ============================================================================
// Counter-attack
// ============================================================================

pub const COUNTER_FORWARDS: FormationPreset = FormationPreset {
    mode: FormationMode::Counter,
    role: Role::Forward,
    description: "Forwards supporting close to the turnover",
    description_fr: "Avants: soutien proche du point de récupération",
    offsets: &[(-160.0, -20.0), (-140.0, 20.0), (-120.0, 60.0), (-100.0, -60.0), (-80.0, 90.0)],
};

pub const COUNTER_BACKS: FormationPreset = FormationPreset {
    mode: FormationMode::Counter,
    role: Role::Back,
    description: "Backs taking depth and width to exploit space",
    description_fr: "Trois-quarts: profondeur et largeur pour exploiter l'espace",
    offsets: &[(-20.0, -120.0), (40.0, -60.0), (100.0, 0.0), (160.0, 60.0), (220.0, 120.0)],
};

pub const COUNTER_OPPONENTS: FormationPreset = FormationPreset {
    mode: FormationMode::Counter,
    role: Role::DefenderOpponent,
    description: "Opposition scrambling back in disorder (illustration)",
    description_fr: "Défense: repli en désordre (illustration)",
    offsets: &[
        (80.0, -140.0),
        (60.0, -20.0),
        (120.0, 20.0),
        (140.0, 100.0),
        (100.0, -80.0),
        (180.0, -40.0),
        (200.0, 40.0),
        (220.0, -120.0),
        (240.0, 60.0),
        (260.0, 0.0),
    ],
};

/// Ordered by mode, then role (`FormationPreset::find` relies on it).
pub const FORMATION_PRESETS: &[FormationPreset] = &[
    ATTACK_FORWARDS,
    ATTACK_BACKS,
    ATTACK_OPPONENTS,
    DEFENSE_FORWARDS,
    DEFENSE_BACKS,
    DEFENSE_OPPONENTS,
    COUNTER_FORWARDS,
    COUNTER_BACKS,
    COUNTER_OPPONENTS,
];

/// Absolute target positions for every role in one mode.
#[derive(Debug, Clone, PartialEq)]
pub struct FormationLayout {
    pub mode: FormationMode,
    pub forwards: Vec<Point>,
    pub backs: Vec<Point>,
    pub opponents: Vec<Point>,
}

impl FormationLayout {
    pub fn for_role(&self, role: Role) -> &[Point] {
        match role {
            Role::Forward => &self.forwards,
            Role::Back => &self.backs,
            Role::DefenderOpponent => &self.opponents,
        }
    }
}

pub fn positions(mode: FormationMode, role: Role, dims: FieldDimensions) -> Vec<Point> {
    FormationPreset::find(mode, role).positions(dims)
}

pub fn layout(mode: FormationMode, dims: FieldDimensions) -> FormationLayout {
    FormationLayout {
        mode,
        forwards: positions(mode, Role::Forward, dims),
        backs: positions(mode, Role::Back, dims),
        opponents: positions(mode, Role::DefenderOpponent, dims),
    }
}

/// Move every token to its preset slot for `mode`.
pub fn apply_formation(registry: &mut TokenRegistry, mode: FormationMode, dims: FieldDimensions) {
    let layout = layout(mode, dims);
    for role in Role::ALL {
        registry.apply_role_positions(role, layout.for_role(role));
    }
    log::debug!("Applied {} formation on {}x{}", mode, dims.width, dims.height);
}
