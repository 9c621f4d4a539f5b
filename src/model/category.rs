//! Category data model for image labels.

use std::collections::HashSet;

/// Unique identifier for a category.
///
/// Ids are opaque strings. Freshly generated ids never contain an
/// underscore, which keeps the hotkey action encoding unambiguous
/// (see [`crate::model::HotkeyAction`]).
pub type CategoryId = String;

/// Fixed palette used when a category is created without an explicit color.
pub const CATEGORY_PALETTE: [&str; 10] = [
    "#e74c3c", "#e67e22", "#f1c40f", "#2ecc71", "#1abc9c", "#3498db", "#9b59b6", "#e84393",
    "#95a5a6", "#34495e",
];

/// A user-defined label with a name, color, and optional set of mutually
/// exclusive peer categories.
///
/// Exclusivity is declared per-category and is only as symmetric as the
/// stored data makes it; nothing here auto-symmetrizes the relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Opaque stable identifier.
    pub id: CategoryId,
    /// Display name. Not guaranteed unique; callers are expected to check
    /// [`crate::registry::CategoryRegistry::is_duplicate_name`].
    pub name: String,
    /// Display color (`#rrggbb`).
    pub color: String,
    /// Ids of categories that may not coexist with this one on an image.
    pub mutually_exclusive_with: HashSet<CategoryId>,
}

impl Category {
    /// Create a new category with the given id, name, and color.
    pub fn new(
        id: impl Into<CategoryId>,
        name: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
            mutually_exclusive_with: HashSet::new(),
        }
    }

    /// Declare categories that are mutually exclusive with this one.
    pub fn with_exclusions<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CategoryId>,
    {
        self.mutually_exclusive_with = ids.into_iter().map(Into::into).collect();
        self
    }
}

/// Partial update applied to a category in place.
///
/// `None` fields are left untouched. Exclusivity symmetry is not
/// revalidated on update.
#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    /// New display name, if changing.
    pub name: Option<String>,
    /// New display color, if changing.
    pub color: Option<String>,
    /// Replacement exclusivity set, if changing.
    pub mutually_exclusive_with: Option<HashSet<CategoryId>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_exclusions() {
        let cat = Category::new("keep", "Keep", "#2ecc71").with_exclusions(["archive"]);
        assert!(cat.mutually_exclusive_with.contains("archive"));
        assert_eq!(cat.mutually_exclusive_with.len(), 1);
    }

    #[test]
    fn test_palette_size() {
        assert_eq!(CATEGORY_PALETTE.len(), 10);
    }
}
