//! Category registry: owns category definitions and exclusivity rules.

use std::collections::HashSet;

use chrono::Utc;
use rand::seq::IndexedRandom;

use crate::model::{Category, CategoryId, CategoryPatch, CATEGORY_PALETTE};

/// Owns the ordered list of category definitions.
///
/// The registry hands out fresh ids and answers exclusivity lookups; it does
/// not enforce name uniqueness (callers check [`is_duplicate_name`] before
/// creating) and it does not cascade deletions itself; the session
/// orchestrates the cascade across the assignment store and hotkeys.
///
/// [`is_duplicate_name`]: CategoryRegistry::is_duplicate_name
#[derive(Debug, Clone, Default)]
pub struct CategoryRegistry {
    categories: Vec<Category>,
    next_seq: u64,
}

impl CategoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all definitions (used when loading a document).
    pub fn set_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }

    /// All categories in definition order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a category by id.
    pub fn get(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Number of defined categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether no categories are defined.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Create a new category with a fresh id.
    ///
    /// When `color` is omitted, one is drawn uniformly at random from the
    /// fixed palette. The name is stored as given, untrimmed.
    pub fn create(&mut self, name: impl Into<String>, color: Option<String>) -> &Category {
        let id = self.fresh_id();
        let color = color.unwrap_or_else(random_palette_color);
        log::debug!("Creating category {}", id);
        self.categories.push(Category::new(id, name, color));
        let idx = self.categories.len() - 1;
        &self.categories[idx]
    }

    /// Check whether `name` collides with an existing category name,
    /// optionally ignoring the category with id `exclude_id`.
    ///
    /// The candidate is trimmed and lowercased; stored names are lowercased
    /// but deliberately not trimmed, matching the observed behavior of the
    /// original tool.
    pub fn is_duplicate_name(&self, name: &str, exclude_id: Option<&str>) -> bool {
        let candidate = name.trim().to_lowercase();
        self.categories.iter().any(|c| {
            exclude_id != Some(c.id.as_str()) && c.name.to_lowercase() == candidate
        })
    }

    /// Merge `patch` into the category with the given id.
    ///
    /// Returns `false` when the id is unknown. Exclusivity symmetry is not
    /// revalidated.
    pub fn update(&mut self, id: &str, patch: CategoryPatch) -> bool {
        let Some(category) = self.categories.iter_mut().find(|c| c.id == id) else {
            return false;
        };
        if let Some(name) = patch.name {
            category.name = name;
        }
        if let Some(color) = patch.color {
            category.color = color;
        }
        if let Some(exclusions) = patch.mutually_exclusive_with {
            category.mutually_exclusive_with = exclusions;
        }
        true
    }

    /// Remove a category definition, returning it if present.
    ///
    /// This is only the registry half of deletion; assignment and hotkey
    /// cleanup is driven by the session.
    pub fn remove(&mut self, id: &str) -> Option<Category> {
        let idx = self.categories.iter().position(|c| c.id == id)?;
        Some(self.categories.remove(idx))
    }

    /// The exclusivity set declared by a category. Unknown ids yield an
    /// empty set, so assignment tolerates dangling category references.
    pub fn exclusions_of(&self, id: &str) -> HashSet<CategoryId> {
        self.get(id)
            .map(|c| c.mutually_exclusive_with.clone())
            .unwrap_or_default()
    }

    fn fresh_id(&mut self) -> CategoryId {
        let seq = self.next_seq;
        self.next_seq += 1;
        format!("cat-{}-{}", Utc::now().timestamp_millis(), seq)
    }
}

fn random_palette_color() -> String {
    CATEGORY_PALETTE
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(CATEGORY_PALETTE[0])
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_generates_distinct_ids() {
        let mut registry = CategoryRegistry::new();
        let a = registry.create("Keep", None).id.clone();
        let b = registry.create("Archive", None).id.clone();
        assert_ne!(a, b);
        assert!(!a.contains('_'));
    }

    #[test]
    fn test_create_picks_palette_color_when_omitted() {
        let mut registry = CategoryRegistry::new();
        let color = registry.create("Keep", None).color.clone();
        assert!(CATEGORY_PALETTE.contains(&color.as_str()));
    }

    #[test]
    fn test_create_keeps_explicit_color_and_untrimmed_name() {
        let mut registry = CategoryRegistry::new();
        let cat = registry.create("  Keep ", Some("#123456".to_string()));
        assert_eq!(cat.color, "#123456");
        assert_eq!(cat.name, "  Keep ");
    }

    #[test]
    fn test_duplicate_name_trims_candidate_only() {
        let mut registry = CategoryRegistry::new();
        registry.create("Keep", None);
        registry.create(" Archive", None);

        // Candidate is trimmed and case-folded before comparison.
        assert!(registry.is_duplicate_name("  keep  ", None));
        // Stored names are not trimmed, so " Archive" only matches itself.
        assert!(!registry.is_duplicate_name("Archive", None));
        assert!(registry.is_duplicate_name(" archive", None));
    }

    #[test]
    fn test_duplicate_name_excludes_id() {
        let mut registry = CategoryRegistry::new();
        let id = registry.create("Keep", None).id.clone();
        assert!(registry.is_duplicate_name("keep", None));
        assert!(!registry.is_duplicate_name("keep", Some(&id)));
    }

    #[test]
    fn test_update_merges_fields() {
        let mut registry = CategoryRegistry::new();
        let id = registry.create("Keep", Some("#111111".to_string())).id.clone();

        let changed = registry.update(
            &id,
            CategoryPatch {
                name: Some("Hold".to_string()),
                ..Default::default()
            },
        );
        assert!(changed);

        let cat = registry.get(&id).unwrap();
        assert_eq!(cat.name, "Hold");
        assert_eq!(cat.color, "#111111");
    }

    #[test]
    fn test_update_unknown_id() {
        let mut registry = CategoryRegistry::new();
        assert!(!registry.update("missing", CategoryPatch::default()));
    }

    #[test]
    fn test_exclusions_of_unknown_is_empty() {
        let registry = CategoryRegistry::new();
        assert!(registry.exclusions_of("missing").is_empty());
    }

    #[test]
    fn test_remove() {
        let mut registry = CategoryRegistry::new();
        let id = registry.create("Keep", None).id.clone();
        assert!(registry.remove(&id).is_some());
        assert!(registry.remove(&id).is_none());
        assert!(registry.is_empty());
    }
}
