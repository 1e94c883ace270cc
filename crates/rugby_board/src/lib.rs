//! # rugby_board - Tactics Board Engine for U12 Rugby Coaching
//!
//! The board state and rendering core of an interactive tactics board:
//! a coach drags player tokens on a drawn field, switches formation
//! presets, draws movement arrows, and saves/restores one board.
//!
//! ## Features
//! - Field-pixel geometry with exact screen round trips
//! - Deterministic field rendering onto any `DrawSurface` (canvas command
//!   list, SVG export)
//! - Nine literal formation presets (attack / defense / counter × role)
//! - JSON snapshot persistence compatible with the browser board's
//!   `rugby-u12-state` save
//!
//! The host UI (DOM, buttons, pointer events, toasts) lives outside this
//! crate and drives a `TacticsBoard` through its `on_*` methods.

pub mod annotation;
pub mod board;
pub mod config;
pub mod error;
pub mod formation;
pub mod geometry;
pub mod gesture;
pub mod notice;
pub mod persistence;
pub mod render;
pub mod token;

pub use annotation::{AnnotationStore, Arrow};
pub use board::{LoadOutcome, TacticsBoard};
pub use config::{ArrowStyle, BoardConfig, FieldStyle};
pub use error::{BoardError, Result};
pub use formation::{apply_formation, FormationLayout, FormationMode, FormationPreset};
pub use geometry::{FieldDimensions, Point, ScreenRect, TOKEN_HALF_EXTENT};
pub use gesture::{ArrowGesture, ClickOutcome};
pub use notice::Notice;
pub use persistence::{
    BoardSnapshot, FileStore, KeyValueStore, MemoryStore, PersistError, PersistenceAdapter,
    PieceRole, PieceState, STORAGE_KEY,
};
pub use render::{DrawCommand, DrawSurface, RecordingSurface, SvgSurface};
pub use token::{RestorePolicy, RestoreReport, Role, Token, TokenId, TokenRegistry};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
