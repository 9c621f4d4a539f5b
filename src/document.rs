//! Persisted document shape and the boundary conversion to internal types.
//!
//! One logical document is stored per browsed directory:
//!
//! ```json
//! {
//!   "categories": [
//!     {"id": "cat-1", "name": "Keep", "color": "#2ecc71", "mutuallyExclusiveWith": ["cat-2"]}
//!   ],
//!   "image_categories": [
//!     ["/photos/a.jpg", [{"category_id": "cat-1", "assigned_at": "2026-08-06T10:00:00.000Z"}]]
//!   ],
//!   "hotkeys": [
//!     {"id": "hotkey-next", "key": "ArrowRight", "modifiers": [], "action": "next_image"}
//!   ]
//! }
//! ```
//!
//! The document types are deliberately loose (every field defaulted) so that
//! partially damaged files load; the conversion into internal types filters
//! out entries that are unusable rather than failing the whole load. Untrusted
//! data is validated here, once; the rest of the crate assumes well-formed
//! state.

use serde::{Deserialize, Serialize};

use crate::model::{Assignment, AssignmentMap, Category, Hotkey, HotkeyAction};

/// On-disk document for one browsed directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Category definitions, in display order.
    #[serde(default)]
    pub categories: Vec<CategoryDoc>,
    /// `[imagePath, assignments]` pairs.
    #[serde(default)]
    pub image_categories: Vec<(String, Vec<AssignmentDoc>)>,
    /// Keyboard bindings with string-encoded actions.
    #[serde(default)]
    pub hotkeys: Vec<HotkeyDoc>,
}

/// Persisted category definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryDoc {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(
        rename = "mutuallyExclusiveWith",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub mutually_exclusive_with: Vec<String>,
}

/// Persisted assignment entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignmentDoc {
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub assigned_at: String,
}

/// Persisted hotkey binding.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HotkeyDoc {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub action: String,
}

impl CatalogDocument {
    /// Build the document from live session state.
    ///
    /// Image pairs are emitted sorted by path and exclusivity sets sorted by
    /// id so repeated saves of the same state are byte-identical; per-image
    /// assignment order is written verbatim.
    pub fn from_state(
        categories: &[Category],
        assignments: &AssignmentMap,
        hotkeys: &[Hotkey],
    ) -> Self {
        let categories = categories
            .iter()
            .map(|c| {
                let mut exclusions: Vec<String> =
                    c.mutually_exclusive_with.iter().cloned().collect();
                exclusions.sort();
                CategoryDoc {
                    id: c.id.clone(),
                    name: c.name.clone(),
                    color: c.color.clone(),
                    mutually_exclusive_with: exclusions,
                }
            })
            .collect();

        let mut image_categories: Vec<(String, Vec<AssignmentDoc>)> = assignments
            .iter()
            .map(|(path, list)| {
                let docs = list
                    .iter()
                    .map(|a| AssignmentDoc {
                        category_id: a.category_id.clone(),
                        assigned_at: a.assigned_at.clone(),
                    })
                    .collect();
                (path.clone(), docs)
            })
            .collect();
        image_categories.sort_by(|a, b| a.0.cmp(&b.0));

        let hotkeys = hotkeys
            .iter()
            .map(|h| HotkeyDoc {
                id: h.id.clone(),
                key: h.key.clone(),
                modifiers: h.modifiers.clone(),
                action: h.action.encode(),
            })
            .collect();

        Self {
            categories,
            image_categories,
            hotkeys,
        }
    }

    /// Convert into internal state, tolerating malformed entries by
    /// filtering: categories without an id, assignments without a category
    /// id, pairs with a blank path, and pairs left with no assignments are
    /// all dropped silently.
    pub fn into_state(self) -> (Vec<Category>, AssignmentMap, Vec<Hotkey>) {
        let categories = self
            .categories
            .into_iter()
            .filter(|c| !c.id.is_empty())
            .map(|c| {
                Category::new(c.id, c.name, c.color)
                    .with_exclusions(c.mutually_exclusive_with)
            })
            .collect();

        let mut assignments = AssignmentMap::new();
        for (path, list) in self.image_categories {
            if path.trim().is_empty() {
                continue;
            }
            let list: Vec<Assignment> = list
                .into_iter()
                .filter(|a| !a.category_id.is_empty())
                .map(|a| Assignment::at(a.category_id, a.assigned_at))
                .collect();
            if list.is_empty() {
                continue;
            }
            assignments.insert(path, list);
        }

        let hotkeys = self
            .hotkeys
            .into_iter()
            .map(|h| Hotkey {
                id: h.id,
                key: h.key,
                modifiers: h.modifiers,
                action: HotkeyAction::parse(&h.action),
            })
            .collect();

        (categories, assignments, hotkeys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::default_hotkeys;

    #[test]
    fn test_round_trip_preserves_state() {
        let categories = vec![
            Category::new("keep", "Keep", "#2ecc71").with_exclusions(["archive"]),
            Category::new("archive", "Archive", "#e74c3c").with_exclusions(["keep"]),
        ];
        let mut assignments = AssignmentMap::new();
        assignments.insert(
            "/b.jpg".to_string(),
            vec![
                Assignment::at("archive", "2026-08-06T10:00:00.000Z"),
                Assignment::at("keep", "2026-08-06T10:05:00.000Z"),
            ],
        );
        assignments.insert(
            "/a.jpg".to_string(),
            vec![Assignment::at("keep", "2026-08-06T09:00:00.000Z")],
        );
        let hotkeys = default_hotkeys();

        let doc = CatalogDocument::from_state(&categories, &assignments, &hotkeys);
        let json = serde_json::to_string_pretty(&doc).unwrap();
        let reloaded: CatalogDocument = serde_json::from_str(&json).unwrap();
        let (categories2, assignments2, hotkeys2) = reloaded.into_state();

        assert_eq!(categories2, categories);
        assert_eq!(assignments2, assignments);
        assert_eq!(hotkeys2, hotkeys);
    }

    #[test]
    fn test_pairs_sorted_by_path_and_lists_kept_in_order() {
        let mut assignments = AssignmentMap::new();
        assignments.insert(
            "/z.jpg".to_string(),
            vec![
                Assignment::at("second", "t1"),
                Assignment::at("first", "t0"),
            ],
        );
        assignments.insert("/a.jpg".to_string(), vec![Assignment::at("x", "t2")]);

        let doc = CatalogDocument::from_state(&[], &assignments, &[]);
        assert_eq!(doc.image_categories[0].0, "/a.jpg");
        assert_eq!(doc.image_categories[1].0, "/z.jpg");
        // Attachment order is not re-sorted by timestamp.
        assert_eq!(doc.image_categories[1].1[0].category_id, "second");
    }

    #[test]
    fn test_malformed_entries_filtered_not_fatal() {
        let json = r##"{
            "categories": [
                {"id": "keep", "name": "Keep", "color": "#2ecc71"},
                {"name": "no id"}
            ],
            "image_categories": [
                ["/a.jpg", [{"category_id": "keep", "assigned_at": "t"}, {"assigned_at": "t"}]],
                ["   ", [{"category_id": "keep"}]],
                ["/empty.jpg", []]
            ],
            "hotkeys": [
                {"id": "hk", "key": "k", "action": "toggle_category_keep"}
            ]
        }"##;
        let doc: CatalogDocument = serde_json::from_str(json).unwrap();
        let (categories, assignments, hotkeys) = doc.into_state();

        assert_eq!(categories.len(), 1);
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments["/a.jpg"].len(), 1);
        assert_eq!(hotkeys.len(), 1);
        assert_eq!(
            hotkeys[0].action,
            HotkeyAction::ToggleCategory {
                id: "keep".to_string(),
                suffix: None,
            }
        );
    }

    #[test]
    fn test_missing_sections_default_empty() {
        let doc: CatalogDocument = serde_json::from_str("{}").unwrap();
        let (categories, assignments, hotkeys) = doc.into_state();
        assert!(categories.is_empty());
        assert!(assignments.is_empty());
        assert!(hotkeys.is_empty());
    }
}
