// SPDX-License-Identifier: AGPL-3.0
// Course Catalog Core - Favorites controller
//
// Favorites are a JSON array of course ids in the local store.
// Every read goes to the store, so changes made from another screen
// show up on the next load.

use crate::store::{read_json, write_json, KeyValueStore, FAVORITES_KEY};
use crate::types::{AppError, FavoriteSet};
use std::sync::Arc;

/// Reads, toggles and persists the favorite course ids
#[derive(Clone)]
pub struct FavoritesController {
    store: Arc<dyn KeyValueStore>,
}

impl FavoritesController {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the persisted set. Absent or corrupt records yield an empty set.
    pub fn load_favorites(&self) -> FavoriteSet {
        read_json(self.store.as_ref(), FAVORITES_KEY).unwrap_or_default()
    }

    pub fn is_favorite(&self, course_id: u64) -> bool {
        self.load_favorites().contains(course_id)
    }

    /// Flip membership of `course_id`, persist the full set and return it.
    ///
    /// Read-modify-write is not atomic across concurrent callers.
    pub fn toggle_favorite(&self, course_id: u64) -> Result<FavoriteSet, AppError> {
        let mut favorites = self.load_favorites();
        let added = favorites.toggle(course_id);

        write_json(self.store.as_ref(), FAVORITES_KEY, &favorites)?;

        if added {
            tracing::info!("Marked course {} as favorite", course_id);
        } else {
            tracing::info!("Unmarked course {} as favorite", course_id);
        }
        Ok(favorites)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn controller() -> (Arc<MemoryStore>, FavoritesController) {
        let store = Arc::new(MemoryStore::new());
        let controller = FavoritesController::new(store.clone());
        (store, controller)
    }

    #[test]
    fn test_missing_record_is_empty() {
        let (_, favorites) = controller();
        assert!(favorites.load_favorites().is_empty());
    }

    #[test]
    fn test_corrupt_record_is_empty() {
        let (store, favorites) = controller();
        store.set(FAVORITES_KEY, "not json").unwrap();
        assert!(favorites.load_favorites().is_empty());
    }

    #[test]
    fn test_toggle_persists_full_set() {
        let (store, favorites) = controller();

        favorites.toggle_favorite(3).unwrap();
        let set = favorites.toggle_favorite(1).unwrap();
        assert_eq!(set.ids(), &[3, 1]);
        assert_eq!(store.get(FAVORITES_KEY).unwrap().as_deref(), Some("[3,1]"));

        let set = favorites.toggle_favorite(3).unwrap();
        assert_eq!(set.ids(), &[1]);
        assert!(!favorites.is_favorite(3));
        assert!(favorites.is_favorite(1));
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        let (store, favorites) = controller();
        store.set(FAVORITES_KEY, "[5,6]").unwrap();

        let before = favorites.load_favorites();
        favorites.toggle_favorite(6).unwrap();
        let after = favorites.toggle_favorite(6).unwrap();

        assert_eq!(before.contains(6), after.contains(6));
        assert_eq!(after.len(), 2);
    }

    #[test]
    fn test_sees_writes_from_other_controller() {
        let (store, list_view) = controller();
        let detail_view = FavoritesController::new(store);

        detail_view.toggle_favorite(8).unwrap();
        assert!(list_view.load_favorites().contains(8));
    }
}
