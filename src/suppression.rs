//! Deferred-refilter suppression for in-place edit sessions.
//!
//! Editing the categories of the image currently shown in the viewer, while
//! one of those categories is the active filter, would immediately shrink the
//! filtered set and yank the viewer to another image mid-edit. The
//! suppression controller defers that: the first edit of an episode freezes a
//! snapshot of the assignment mapping, filtering reads the snapshot until the
//! user explicitly navigates, and only then does the live mapping become
//! authoritative again.

use crate::model::AssignmentMap;

/// Holds the frozen assignment view used by filtering during an edit session.
#[derive(Debug, Clone, Default)]
pub struct RefilterSuppression {
    suppressed: bool,
    snapshot: Option<AssignmentMap>,
}

impl RefilterSuppression {
    /// Create a controller with suppression off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an edit session is currently freezing the filter view.
    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    /// Begin (or continue) a suppression episode.
    ///
    /// Must be called with the live mapping *before* the mutation is applied;
    /// only the first call of an episode takes the snapshot, so membership
    /// stays frozen at its pre-edit state across repeated edits.
    pub fn engage(&mut self, live: &AssignmentMap) {
        if self.snapshot.is_none() {
            log::debug!("Refilter suppression engaged ({} images snapshotted)", live.len());
            self.snapshot = Some(live.clone());
        }
        self.suppressed = true;
    }

    /// The assignment view filtering should read: the snapshot while
    /// suppressed, the live mapping otherwise.
    pub fn view<'a>(&'a self, live: &'a AssignmentMap) -> &'a AssignmentMap {
        if self.suppressed {
            if let Some(snapshot) = &self.snapshot {
                return snapshot;
            }
        }
        live
    }

    /// End the episode and discard the snapshot. Called on the next explicit
    /// viewer navigation.
    pub fn clear(&mut self) {
        if self.suppressed {
            log::debug!("Refilter suppression cleared");
        }
        self.suppressed = false;
        self.snapshot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Assignment;

    fn map_with(path: &str, category: &str) -> AssignmentMap {
        let mut map = AssignmentMap::new();
        map.insert(path.to_string(), vec![Assignment::at(category, "t0")]);
        map
    }

    #[test]
    fn test_view_is_live_by_default() {
        let suppression = RefilterSuppression::new();
        let live = map_with("/a.jpg", "cat1");
        assert!(!suppression.is_suppressed());
        assert!(suppression.view(&live).contains_key("/a.jpg"));
    }

    #[test]
    fn test_engage_freezes_pre_edit_state() {
        let mut suppression = RefilterSuppression::new();
        let mut live = AssignmentMap::new();

        suppression.engage(&live);
        live = map_with("/a.jpg", "cat1");

        // The snapshot predates the edit, so the view stays empty.
        assert!(suppression.is_suppressed());
        assert!(suppression.view(&live).is_empty());
    }

    #[test]
    fn test_second_engage_keeps_first_snapshot() {
        let mut suppression = RefilterSuppression::new();
        let mut live = AssignmentMap::new();

        suppression.engage(&live);
        live = map_with("/a.jpg", "cat1");
        suppression.engage(&live);
        live.insert("/b.jpg".to_string(), vec![Assignment::at("cat2", "t1")]);

        assert!(suppression.view(&live).is_empty());
    }

    #[test]
    fn test_clear_makes_live_authoritative() {
        let mut suppression = RefilterSuppression::new();
        let live = map_with("/a.jpg", "cat1");

        suppression.engage(&AssignmentMap::new());
        suppression.clear();

        assert!(!suppression.is_suppressed());
        assert!(suppression.view(&live).contains_key("/a.jpg"));
    }
}
