//! Tactics board session
//!
//! `TacticsBoard` owns the token registry, the arrows and the pending arrow
//! gesture for one session. The host's interaction layer (pointer events,
//! buttons, toasts) calls the `on_*` methods and redraws with `render`
//! after any of them returns.

use crate::annotation::AnnotationStore;
use crate::config::BoardConfig;
use crate::error::{BoardError, Result};
use crate::formation::{apply_formation, FormationMode};
use crate::geometry::{to_field_coords, to_screen_rect, FieldDimensions, Point, ScreenRect};
use crate::gesture::{ArrowGesture, ClickOutcome};
use crate::notice::Notice;
use crate::persistence::{KeyValueStore, PersistError, PersistenceAdapter};
use crate::render::{render, DrawSurface};
use crate::token::{RestoreReport, TokenId, TokenRegistry};

/// Result of `TacticsBoard::on_load` when nothing went wrong.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Restored(RestoreReport),
    /// No save under the key; the board was left as it was.
    NoSave,
}

impl LoadOutcome {
    pub fn notice(&self) -> Notice {
        match self {
            Self::Restored(_) => Notice::Loaded,
            Self::NoSave => Notice::NoSaveFound,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TacticsBoard {
    config: BoardConfig,
    dims: FieldDimensions,
    tokens: TokenRegistry,
    annotations: AnnotationStore,
    gesture: ArrowGesture,
    persistence: PersistenceAdapter,
}

impl TacticsBoard {
    /// Standard U12 roster in attack formation.
    pub fn new(config: BoardConfig, dims: FieldDimensions) -> Self {
        Self::with_tokens(config, dims, TokenRegistry::u12())
    }

    /// Custom roster; tokens start in attack formation.
    pub fn with_tokens(config: BoardConfig, dims: FieldDimensions, mut tokens: TokenRegistry) -> Self {
        apply_formation(&mut tokens, FormationMode::Attack, dims);
        let persistence = PersistenceAdapter::new(config.storage_key.clone());
        Self {
            config,
            dims,
            tokens,
            annotations: AnnotationStore::new(),
            gesture: ArrowGesture::Idle,
            persistence,
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn dims(&self) -> FieldDimensions {
        self.dims
    }

    pub fn tokens(&self) -> &TokenRegistry {
        &self.tokens
    }

    pub fn annotations(&self) -> &AnnotationStore {
        &self.annotations
    }

    pub fn gesture(&self) -> ArrowGesture {
        self.gesture
    }

    // ------------------------------------------------------------------
    // Tokens
    // ------------------------------------------------------------------

    /// Live drag update; `screen_center` is the token's centre on screen.
    pub fn on_drag_move(&mut self, id: TokenId, screen_center: Point, canvas_rect: &ScreenRect) -> Result<Point> {
        let field = to_field_coords(screen_center, canvas_rect);
        self.tokens.set_position(id, field)?;
        Ok(field)
    }

    pub fn on_drag_end(&mut self, id: TokenId, screen_center: Point, canvas_rect: &ScreenRect) -> Result<Point> {
        let field = self.on_drag_move(id, screen_center, canvas_rect)?;
        log::debug!("{} dropped at ({}, {})", id, field.x, field.y);
        Ok(field)
    }

    /// Where the host should place a token's element.
    pub fn token_screen_rect(&self, id: TokenId, canvas_rect: &ScreenRect) -> Result<ScreenRect> {
        let token = self.tokens.get(id).ok_or(BoardError::UnknownToken(id))?;
        Ok(to_screen_rect(token.position, canvas_rect, self.config.token_half_extent))
    }

    pub fn on_mode_select(&mut self, mode: FormationMode) -> Notice {
        apply_formation(&mut self.tokens, mode, self.dims);
        Notice::FormationApplied(mode)
    }

    // ------------------------------------------------------------------
    // Arrows
    // ------------------------------------------------------------------

    pub fn begin_arrow(&mut self) -> Notice {
        self.gesture.begin();
        Notice::ArrowPrompt
    }

    /// `None` when no arrow gesture is in progress.
    pub fn on_arrow_click(&mut self, screen: Point, canvas_rect: &ScreenRect) -> Option<Notice> {
        match self.gesture.click(to_field_coords(screen, canvas_rect)) {
            ClickOutcome::Ignored => None,
            ClickOutcome::StartRecorded(_) => Some(Notice::ArrowStartRecorded),
            ClickOutcome::Completed(arrow) => {
                self.annotations.add_arrow(arrow.from, arrow.to);
                Some(Notice::ArrowAdded)
            }
        }
    }

    pub fn remove_arrows(&mut self) -> Notice {
        self.annotations.clear();
        Notice::ArrowsRemoved
    }

    // ------------------------------------------------------------------
    // Session
    // ------------------------------------------------------------------

    pub fn on_save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<Notice> {
        self.persistence.save(store, &self.tokens, &self.annotations)?;
        Ok(Notice::Saved)
    }

    /// Restore the saved board. On error (corrupt save, storage failure)
    /// nothing on the board has changed; hosts show `Notice::LoadFailed`.
    pub fn on_load<S: KeyValueStore + ?Sized>(&mut self, store: &S) -> Result<LoadOutcome> {
        let snapshot = match self.persistence.load(store) {
            Ok(snapshot) => snapshot,
            Err(PersistError::NotFound { .. }) => return Ok(LoadOutcome::NoSave),
            Err(e) => return Err(e.into()),
        };

        let report = self.tokens.restore(&snapshot.pieces, self.config.restore_policy);
        self.annotations.replace(snapshot.arrows);
        if !report.skipped.is_empty() {
            log::debug!("{} saved pieces had no matching token", report.skipped.len());
        }
        Ok(LoadOutcome::Restored(report))
    }

    /// Drop arrows and any pending gesture, back to attack formation.
    pub fn on_reset(&mut self) -> Notice {
        self.annotations.clear();
        self.gesture.cancel();
        apply_formation(&mut self.tokens, FormationMode::Attack, self.dims);
        log::info!("Board reset to attack formation");
        Notice::Reset
    }

    pub fn render<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        render(surface, self.dims, self.annotations.all(), &self.config.field, &self.config.arrow);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formation::positions;
    use crate::persistence::{MemoryStore, PieceRole, STORAGE_KEY};
    use crate::render::RecordingSurface;
    use crate::token::{RestorePolicy, Role};

    fn board() -> TacticsBoard {
        TacticsBoard::new(BoardConfig::default(), FieldDimensions::new(800.0, 500.0))
    }

    fn canvas() -> ScreenRect {
        ScreenRect::new(100.0, 40.0, 800.0, 500.0)
    }

    fn positions_of(board: &TacticsBoard) -> Vec<Point> {
        board.tokens().iter().map(|t| t.position).collect()
    }

    #[test]
    fn test_new_board_starts_in_attack() {
        let board = board();
        let forwards: Vec<Point> = board.tokens().tokens_by_role(Role::Forward).iter().map(|t| t.position).collect();
        assert_eq!(forwards, positions(FormationMode::Attack, Role::Forward, board.dims()));
        assert!(board.annotations().is_empty());
    }

    #[test]
    fn test_drag_converts_screen_to_field() {
        let mut board = board();
        let field = board.on_drag_end(TokenId(2), Point::new(350.0, 140.0), &canvas()).unwrap();
        assert_eq!(field, Point::new(250.0, 100.0));
        assert_eq!(board.tokens().get(TokenId(2)).unwrap().position, field);

        let rect = board.token_screen_rect(TokenId(2), &canvas()).unwrap();
        assert_eq!(rect, ScreenRect::new(330.0, 120.0, 40.0, 40.0));
        assert!(board.on_drag_end(TokenId(500), Point::default(), &canvas()).is_err());
    }

    #[test]
    fn test_arrow_clicks() {
        let mut board = board();
        assert_eq!(board.on_arrow_click(Point::new(110.0, 50.0), &canvas()), None);

        assert_eq!(board.begin_arrow(), Notice::ArrowPrompt);
        assert_eq!(board.on_arrow_click(Point::new(110.0, 50.0), &canvas()), Some(Notice::ArrowStartRecorded));
        assert_eq!(board.on_arrow_click(Point::new(210.0, 50.0), &canvas()), Some(Notice::ArrowAdded));

        let arrows = board.annotations().all();
        assert_eq!(arrows.len(), 1);
        assert_eq!(arrows[0].from, Point::new(10.0, 10.0));
        assert_eq!(arrows[0].to, Point::new(110.0, 10.0));
        assert_eq!(board.gesture(), ArrowGesture::Idle);
    }

    #[test]
    fn test_load_without_save_leaves_board_untouched() {
        let mut board = board();
        board.on_drag_end(TokenId(0), Point::new(0.0, 0.0), &canvas()).unwrap();
        board.begin_arrow();
        board.on_arrow_click(Point::new(110.0, 50.0), &canvas());
        board.on_arrow_click(Point::new(210.0, 50.0), &canvas());
        let before = positions_of(&board);

        let outcome = board.on_load(&MemoryStore::new()).unwrap();
        assert_eq!(outcome, LoadOutcome::NoSave);
        assert_eq!(outcome.notice(), Notice::NoSaveFound);
        assert_eq!(positions_of(&board), before);
        assert_eq!(board.annotations().len(), 1);
    }

    #[test]
    fn test_corrupt_load_leaves_board_untouched() {
        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, r#"{"pieces":[{"role":"avant","x":1,"y":"#).unwrap();

        let mut board = board();
        let before = positions_of(&board);
        let err = board.on_load(&store).unwrap_err();
        assert!(matches!(err, BoardError::Persist(PersistError::CorruptData(_))));
        assert_eq!(positions_of(&board), before);
    }

    #[test]
    fn test_load_skips_unknown_role() {
        let mut store = MemoryStore::new();
        let blob = r#"{"pieces":[
            {"role":"pilier","x":5,"y":5,"classList":["piece","pilier"]},
            {"role":"avant","x":11,"y":22,"classList":["piece","avant"]}
        ],"arrows":[{"from":{"x":1,"y":2},"to":{"x":3,"y":4}}]}"#;
        store.set(STORAGE_KEY, blob).unwrap();

        let mut board = board();
        let outcome = board.on_load(&store).unwrap();
        let LoadOutcome::Restored(report) = outcome else {
            panic!("expected a restored board");
        };
        assert_eq!(report.applied, 1);
        assert_eq!(report.skipped, vec![PieceRole::Unknown("pilier".to_string())]);
        assert_eq!(board.tokens().get(TokenId(0)).unwrap().position, Point::new(11.0, 22.0));
        assert_eq!(board.annotations().len(), 1);
        assert_eq!(board.annotations().all()[0].to, Point::new(3.0, 4.0));
    }

    #[test]
    fn test_non_finite_drag_does_not_clobber_save() {
        let mut store = MemoryStore::new();
        let mut board = board();
        board.on_save(&mut store).unwrap();
        let good = store.get(STORAGE_KEY).unwrap().unwrap();

        board.on_drag_end(TokenId(0), Point::new(f64::INFINITY, 140.0), &canvas()).unwrap();
        let err = board.on_save(&mut store).unwrap_err();
        assert!(matches!(err, BoardError::Persist(PersistError::InvalidData(_))));
        assert_eq!(store.get(STORAGE_KEY).unwrap().unwrap(), good);

        let mut fresh = TacticsBoard::new(BoardConfig::default(), board.dims());
        assert!(matches!(fresh.on_load(&store).unwrap(), LoadOutcome::Restored(_)));
    }

    #[test]
    fn test_save_load_replaces_arrows() {
        let mut store = MemoryStore::new();
        let mut board = board();
        board.on_mode_select(FormationMode::Defense);
        board.begin_arrow();
        board.on_arrow_click(Point::new(150.0, 90.0), &canvas());
        board.on_arrow_click(Point::new(250.0, 190.0), &canvas());
        assert_eq!(board.on_save(&mut store).unwrap(), Notice::Saved);

        let saved_arrows = board.annotations().clone();
        board.on_reset();
        assert!(board.annotations().is_empty());

        let outcome = board.on_load(&store).unwrap();
        assert_eq!(outcome.notice(), Notice::Loaded);
        assert_eq!(board.annotations(), &saved_arrows);
    }

    #[test]
    fn test_ordinal_policy_restores_every_token() {
        let config = BoardConfig { restore_policy: RestorePolicy::OrdinalWithinRole, ..BoardConfig::default() };
        let dims = FieldDimensions::new(800.0, 500.0);
        let mut store = MemoryStore::new();

        let mut board = TacticsBoard::new(config.clone(), dims);
        board.on_mode_select(FormationMode::Counter);
        let saved = positions_of(&board);
        board.on_save(&mut store).unwrap();

        let mut fresh = TacticsBoard::new(config, dims);
        let outcome = fresh.on_load(&store).unwrap();
        assert_eq!(positions_of(&fresh), saved);
        assert!(matches!(outcome, LoadOutcome::Restored(report) if report.applied == 20));
    }

    #[test]
    fn test_reset_returns_to_attack() {
        let mut board = board();
        let attack = positions_of(&board);
        board.on_mode_select(FormationMode::Counter);
        board.begin_arrow();
        board.on_arrow_click(Point::new(110.0, 50.0), &canvas());

        assert_eq!(board.on_reset(), Notice::Reset);
        assert_eq!(positions_of(&board), attack);
        assert_eq!(board.gesture(), ArrowGesture::Idle);
    }

    #[test]
    fn test_render_uses_board_state() {
        let mut board = board();
        board.begin_arrow();
        board.on_arrow_click(Point::new(110.0, 50.0), &canvas());
        board.on_arrow_click(Point::new(210.0, 50.0), &canvas());

        let mut surface = RecordingSurface::new();
        board.render(&mut surface);
        assert_eq!(surface.filled_polygons().len(), 1);
        assert_eq!(surface.filled_polygons()[0][0], Point::new(110.0, 10.0));
    }
}
