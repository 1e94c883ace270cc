//! Player tokens and the registry that owns them
//!
//! Tokens are created once from a roster and never destroyed during a
//! session. Positions are field-pixel coordinates and are never clamped:
//! a coach may park a token outside the drawn field.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, Result};
use crate::geometry::Point;
use crate::persistence::{PieceRole, PieceState};

/// Token role on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    /// Pack forwards
    #[serde(rename = "avant")]
    Forward,
    /// Three-quarter line
    #[serde(rename = "troisquarts")]
    Back,
    /// Opposition defenders (illustration)
    #[serde(rename = "defense")]
    DefenderOpponent,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Forward, Role::Back, Role::DefenderOpponent];

    /// Wire name, also the token's role class.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forward => "avant",
            Self::Back => "troisquarts",
            Self::DefenderOpponent => "defense",
        }
    }

    /// Tokens of this role in a full formation.
    pub fn cardinality(&self) -> usize {
        match self {
            Self::Forward => 5,
            Self::Back => 5,
            Self::DefenderOpponent => 10,
        }
    }

    pub fn display_name_en(&self) -> &'static str {
        match self {
            Self::Forward => "Forwards",
            Self::Back => "Backs",
            Self::DefenderOpponent => "Opposition",
        }
    }

    pub fn display_name_fr(&self) -> &'static str {
        match self {
            Self::Forward => "Avants",
            Self::Back => "Trois-quarts",
            Self::DefenderOpponent => "Défense",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "avant" | "forward" => Ok(Self::Forward),
            "troisquarts" | "back" => Ok(Self::Back),
            "defense" | "opponent" => Ok(Self::DefenderOpponent),
            other => Err(BoardError::UnknownRole(other.to_string())),
        }
    }
}

/// Stable per-session token identity, assigned in roster order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenId(pub usize);

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "token #{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub id: TokenId,
    pub role: Role,
    pub position: Point,
    /// Cosmetic tags carried opaquely through save/load
    pub extra_classes: BTreeSet<String>,
}

/// How saved pieces are matched to live tokens on restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestorePolicy {
    /// Every saved piece goes to the first live token of its role.
    #[default]
    FirstMatchByRole,
    /// The k-th saved piece of a role goes to the k-th live token of that role.
    OrdinalWithinRole,
}

/// Outcome of `TokenRegistry::restore`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestoreReport {
    pub applied: usize,
    /// Roles of saved pieces that had no live token to land on,
    /// including roles this board does not know
    pub skipped: Vec<PieceRole>,
}

#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
    tokens: Vec<Token>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build tokens in roster order, all at the origin.
    pub fn from_roster(roster: &[(Role, usize)]) -> Self {
        let mut registry = Self::new();
        for &(role, count) in roster {
            for _ in 0..count {
                registry.push(role);
            }
        }
        registry
    }

    /// Standard U12 board: 5 forwards, 5 backs, 10 opposition defenders.
    pub fn u12() -> Self {
        Self::from_roster(&Role::ALL.map(|role| (role, role.cardinality())))
    }

    /// Append a token; returns its id.
    pub fn push(&mut self, role: Role) -> TokenId {
        let id = TokenId(self.tokens.len());
        let extra_classes = ["piece", role.as_str()].into_iter().map(String::from).collect();
        self.tokens.push(Token { id, role, position: Point::default(), extra_classes });
        id
    }

    pub fn get(&self, id: TokenId) -> Option<&Token> {
        self.tokens.iter().find(|t| t.id == id)
    }

    pub fn get_mut(&mut self, id: TokenId) -> Option<&mut Token> {
        self.tokens.iter_mut().find(|t| t.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens of `role` in declaration order.
    pub fn tokens_by_role(&self, role: Role) -> Vec<&Token> {
        self.tokens.iter().filter(|t| t.role == role).collect()
    }

    pub fn set_position(&mut self, id: TokenId, position: Point) -> Result<()> {
        let token = self.get_mut(id).ok_or(BoardError::UnknownToken(id))?;
        token.position = position;
        Ok(())
    }

    /// Token k of `role` gets `positions[k % positions.len()]`.
    pub fn apply_role_positions(&mut self, role: Role, positions: &[Point]) {
        if positions.is_empty() {
            return;
        }
        for (k, token) in self.tokens.iter_mut().filter(|t| t.role == role).enumerate() {
            token.position = positions[k % positions.len()];
        }
    }

    pub fn snapshot(&self) -> Vec<PieceState> {
        self.tokens
            .iter()
            .map(|t| PieceState {
                role: t.role.into(),
                x: t.position.x,
                y: t.position.y,
                class_list: t.extra_classes.iter().cloned().collect(),
            })
            .collect()
    }

    /// Move live tokens to saved positions. Class lists are not re-applied.
    pub fn restore(&mut self, pieces: &[PieceState], policy: RestorePolicy) -> RestoreReport {
        let mut report = RestoreReport::default();
        let mut seen: Vec<(Role, usize)> = Vec::new();

        for piece in pieces {
            let Some(role) = piece.role.known() else {
                log::debug!("restore: unknown role {}, skipped", piece.role);
                report.skipped.push(piece.role.clone());
                continue;
            };
            let ordinal = match policy {
                RestorePolicy::FirstMatchByRole => 0,
                RestorePolicy::OrdinalWithinRole => next_ordinal(&mut seen, role),
            };

            match self.tokens.iter_mut().filter(|t| t.role == role).nth(ordinal) {
                Some(token) => {
                    token.position = Point::new(piece.x, piece.y);
                    report.applied += 1;
                }
                None => {
                    log::debug!("restore: no live {} token at ordinal {}, skipped", piece.role, ordinal);
                    report.skipped.push(piece.role.clone());
                }
            }
        }
        report
    }
}

fn next_ordinal(seen: &mut Vec<(Role, usize)>, role: Role) -> usize {
    match seen.iter_mut().find(|(r, _)| *r == role) {
        Some((_, count)) => {
            *count += 1;
            *count - 1
        }
        None => {
            seen.push((role, 1));
            0
        }
    }
}
