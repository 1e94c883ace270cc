use super::error::PersistError;
use super::snapshot::BoardSnapshot;
use super::store::KeyValueStore;
use super::STORAGE_KEY;
use crate::annotation::AnnotationStore;
use crate::token::TokenRegistry;

/// Reads and writes the single saved board under one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceAdapter {
    key: String,
}

impl Default for PersistenceAdapter {
    fn default() -> Self {
        Self::new(STORAGE_KEY)
    }
}

impl PersistenceAdapter {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Serialize tokens and arrows, overwriting any previous save.
    pub fn save<S: KeyValueStore + ?Sized>(
        &self,
        store: &mut S,
        tokens: &TokenRegistry,
        annotations: &AnnotationStore,
    ) -> Result<BoardSnapshot, PersistError> {
        let snapshot = BoardSnapshot::capture(tokens, annotations);
        store.set(&self.key, &snapshot.to_json()?)?;
        log::info!(
            "Board saved under {} ({} pieces, {} arrows)",
            self.key,
            snapshot.pieces.len(),
            snapshot.arrows.len()
        );
        Ok(snapshot)
    }

    /// Fully parsed snapshot, or why there is none. Never touches board state.
    pub fn load<S: KeyValueStore + ?Sized>(&self, store: &S) -> Result<BoardSnapshot, PersistError> {
        let raw = store.get(&self.key)?.ok_or_else(|| PersistError::NotFound { key: self.key.clone() })?;
        let snapshot = BoardSnapshot::from_json(&raw).inspect_err(|e| {
            log::warn!("Saved board under {} is corrupt: {}", self.key, e);
        })?;
        log::info!("Board loaded from {}", self.key);
        Ok(snapshot)
    }

    pub fn exists<S: KeyValueStore + ?Sized>(&self, store: &S) -> Result<bool, PersistError> {
        Ok(store.get(&self.key)?.is_some())
    }

    pub fn clear<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), PersistError> {
        store.remove(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formation::{apply_formation, FormationMode};
    use crate::geometry::{FieldDimensions, Point};
    use crate::persistence::MemoryStore;
    use crate::token::{RestorePolicy, Role, TokenId};
    use proptest::prelude::*;

    #[test]
    fn test_default_key() {
        assert_eq!(PersistenceAdapter::default().key(), "rugby-u12-state");
    }

    #[test]
    fn test_load_empty_store_is_not_found() {
        let store = MemoryStore::new();
        let adapter = PersistenceAdapter::default();
        assert!(matches!(adapter.load(&store), Err(PersistError::NotFound { .. })));
        assert!(!adapter.exists(&store).unwrap());
    }

    #[test]
    fn test_load_corrupt_blob() {
        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, "not json at all").unwrap();
        let err = PersistenceAdapter::default().load(&store).unwrap_err();
        assert!(matches!(err, PersistError::CorruptData(_)));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_save_then_clear() {
        let mut store = MemoryStore::new();
        let adapter = PersistenceAdapter::default();
        adapter.save(&mut store, &TokenRegistry::u12(), &AnnotationStore::new()).unwrap();
        assert!(adapter.exists(&store).unwrap());
        adapter.clear(&mut store).unwrap();
        assert!(!adapter.exists(&store).unwrap());
    }

    #[test]
    fn test_roundtrip_restores_positions_and_arrows() {
        let dims = FieldDimensions::new(800.0, 500.0);
        let mut tokens = TokenRegistry::from_roster(&[
            (Role::Forward, 1),
            (Role::Back, 1),
            (Role::DefenderOpponent, 1),
        ]);
        apply_formation(&mut tokens, FormationMode::Counter, dims);
        tokens.set_position(TokenId(1), Point::new(12.5, 700.25)).unwrap();
        let mut arrows = AnnotationStore::new();
        arrows.add_arrow(Point::new(10.0, 10.0), Point::new(110.0, 10.0));

        let mut store = MemoryStore::new();
        let adapter = PersistenceAdapter::default();
        adapter.save(&mut store, &tokens, &arrows).unwrap();

        let mut restored = TokenRegistry::from_roster(&[
            (Role::Forward, 1),
            (Role::Back, 1),
            (Role::DefenderOpponent, 1),
        ]);
        let mut restored_arrows = AnnotationStore::new();
        let snapshot = adapter.load(&store).unwrap();
        restored.restore(&snapshot.pieces, RestorePolicy::FirstMatchByRole);
        restored_arrows.replace(snapshot.arrows);

        let before: Vec<Point> = tokens.iter().map(|t| t.position).collect();
        let after: Vec<Point> = restored.iter().map(|t| t.position).collect();
        assert_eq!(before, after);
        assert_eq!(arrows, restored_arrows);
    }

    #[test]
    fn test_custom_class_survives_roundtrip() {
        let mut tokens = TokenRegistry::from_roster(&[(Role::Back, 2)]);
        tokens.get_mut(TokenId(1)).unwrap().extra_classes.insert("captain".to_string());

        let mut store = MemoryStore::new();
        let adapter = PersistenceAdapter::default();
        adapter.save(&mut store, &tokens, &AnnotationStore::new()).unwrap();

        let snapshot = adapter.load(&store).unwrap();
        assert_eq!(snapshot.pieces[1].class_list, vec!["captain", "piece", "troisquarts"]);
        assert!(!snapshot.pieces[0].class_list.iter().any(|c| c == "captain"));
    }

    proptest! {
        /// Property: any positions and arrows survive save -> load -> restore exactly
        #[test]
        fn prop_persistence_roundtrip(
            coords in proptest::collection::vec((-1.0e6f64..1.0e6, -1.0e6f64..1.0e6), 3),
            arrow_coords in proptest::collection::vec((-1.0e4f64..1.0e4, -1.0e4f64..1.0e4, -1.0e4f64..1.0e4, -1.0e4f64..1.0e4), 0..8),
        ) {
            let roster = [
                (Role::Forward, 1),
                (Role::Back, 1),
                (Role::DefenderOpponent, 1),
            ];
            let mut tokens = TokenRegistry::from_roster(&roster);
            for (i, (x, y)) in coords.iter().enumerate() {
                tokens.set_position(TokenId(i), Point::new(*x, *y)).unwrap();
            }
            let mut arrows = AnnotationStore::new();
            for (x0, y0, x1, y1) in &arrow_coords {
                arrows.add_arrow(Point::new(*x0, *y0), Point::new(*x1, *y1));
            }

            let mut store = MemoryStore::new();
            let adapter = PersistenceAdapter::default();
            adapter.save(&mut store, &tokens, &arrows).unwrap();

            let snapshot = adapter.load(&store).unwrap();
            let mut restored = TokenRegistry::from_roster(&roster);
            restored.restore(&snapshot.pieces, RestorePolicy::FirstMatchByRole);

            for (a, b) in tokens.iter().zip(restored.iter()) {
                prop_assert_eq!(a.position, b.position);
            }
            prop_assert_eq!(snapshot.arrows.as_slice(), arrows.all());
        }
    }
}
