//! Assignment store: image path → ordered category assignments.

use crate::model::{Assignment, AssignmentMap};
use crate::registry::CategoryRegistry;

/// Owns the image → assignments mapping.
///
/// Per-image lists keep attachment order. A path is only present while it
/// has at least one assignment; removing the last one removes the entry.
///
/// Mutators return whether a change occurred so callers can decide whether
/// to persist.
#[derive(Debug, Clone, Default)]
pub struct AssignmentStore {
    by_image: AssignmentMap,
}

impl AssignmentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole mapping (used when loading a document).
    ///
    /// Empty lists are dropped to uphold the non-empty-entry invariant.
    pub fn set_assignments(&mut self, mut map: AssignmentMap) {
        map.retain(|_, list| !list.is_empty());
        self.by_image = map;
    }

    /// Read access to the live mapping.
    pub fn assignments(&self) -> &AssignmentMap {
        &self.by_image
    }

    /// The assignment list for a path, if it has any.
    pub fn assignments_for(&self, path: &str) -> Option<&[Assignment]> {
        self.by_image.get(path).map(Vec::as_slice)
    }

    /// Whether `path` carries `category_id`.
    pub fn contains(&self, path: &str, category_id: &str) -> bool {
        self.by_image
            .get(path)
            .is_some_and(|list| list.iter().any(|a| a.category_id == category_id))
    }

    /// Whether `path` has no assignments at all.
    pub fn is_uncategorized(&self, path: &str) -> bool {
        !self.by_image.contains_key(path)
    }

    /// Attach `category_id` to `path`.
    ///
    /// No-op returning `false` when already present. Otherwise the new
    /// assignment is appended with the current timestamp and any assignment
    /// whose category appears in the new category's exclusivity set is
    /// removed from the path's list.
    pub fn assign(&mut self, path: &str, category_id: &str, registry: &CategoryRegistry) -> bool {
        if self.contains(path, category_id) {
            return false;
        }
        let excluded = registry.exclusions_of(category_id);
        let list = self.by_image.entry(path.to_string()).or_default();
        list.push(Assignment::now(category_id));
        if !excluded.is_empty() {
            list.retain(|a| !excluded.contains(a.category_id.as_str()));
        }
        if list.is_empty() {
            // Only reachable with self-referential exclusivity data.
            self.by_image.remove(path);
        }
        log::debug!("Assigned {} to {}", category_id, path);
        true
    }

    /// Toggle `category_id` on `path`: remove when present, assign otherwise.
    pub fn toggle(&mut self, path: &str, category_id: &str, registry: &CategoryRegistry) -> bool {
        if self.contains(path, category_id) {
            self.remove(path, category_id)
        } else {
            self.assign(path, category_id, registry)
        }
    }

    /// Detach `category_id` from `path`, dropping the entry if emptied.
    pub fn remove(&mut self, path: &str, category_id: &str) -> bool {
        let Some(list) = self.by_image.get_mut(path) else {
            return false;
        };
        let before = list.len();
        list.retain(|a| a.category_id != category_id);
        let changed = list.len() != before;
        if list.is_empty() {
            self.by_image.remove(path);
        }
        if changed {
            log::debug!("Removed {} from {}", category_id, path);
        }
        changed
    }

    /// Remove every assignment referencing `category_id`, dropping emptied
    /// entries. Cascade half of category deletion.
    pub fn purge_category(&mut self, category_id: &str) -> bool {
        let mut changed = false;
        self.by_image.retain(|_, list| {
            let before = list.len();
            list.retain(|a| a.category_id != category_id);
            changed |= list.len() != before;
            !list.is_empty()
        });
        changed
    }
}
