//! Catalog session: the explicit state object wiring the engine together.
//!
//! A host constructs one [`Catalog`] per browsed directory and calls into it
//! from UI events, passing its collaborator implementations (viewer surface,
//! confirmation prompt, file-size metadata) into the methods that need them.
//! Nothing in the crate lives in module-level statics.
//!
//! Mutating methods return whether a change occurred; the host persists the
//! document (see [`crate::config_sync`]) after every `true`.

use crate::document::CatalogDocument;
use crate::filter::{self, FilterCriteria, SizeProvider};
use crate::model::{default_hotkeys, CategoryId, CategoryPatch, Hotkey, HotkeyAction};
use crate::navigation::{self, NavigationOutcome};
use crate::registry::CategoryRegistry;
use crate::store::AssignmentStore;
use crate::suppression::RefilterSuppression;

/// Single-image viewer control surface, driven by navigation decisions.
pub trait ViewerSurface {
    /// Show the given image.
    fn open(&mut self, path: &str);
    /// Hide the viewer; there is nothing to show.
    fn close(&mut self);
}

/// Yes/no confirmation prompt shown before destructive operations.
pub trait ConfirmPrompt {
    /// Ask the user; `false` aborts the operation.
    fn confirm(&mut self, message: &str) -> bool;
}

/// Session state for one browsed directory.
#[derive(Debug, Default)]
pub struct Catalog {
    registry: CategoryRegistry,
    store: AssignmentStore,
    suppression: RefilterSuppression,
    hotkeys: Vec<Hotkey>,
    /// Active filter criteria. Hosts mutate this directly when the user
    /// changes the filter controls.
    pub criteria: FilterCriteria,
    images: Vec<String>,
    current_image: Option<String>,
}

impl Catalog {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the browsed image list. Blank identifiers are dropped at this
    /// boundary so filtering can assume well-formed paths.
    pub fn set_images<I, S>(&mut self, raw: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.images = filter::sanitize_paths(raw);
        log::info!("Catalog now tracks {} images", self.images.len());
    }

    /// The browsed image list, in enumeration order.
    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// The image currently open in the viewer, if any.
    pub fn current_image(&self) -> Option<&str> {
        self.current_image.as_deref()
    }

    /// Category definitions.
    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    /// Assignment state.
    pub fn store(&self) -> &AssignmentStore {
        &self.store
    }

    /// Hotkey bindings.
    pub fn hotkeys(&self) -> &[Hotkey] {
        &self.hotkeys
    }

    /// Whether a suppression episode is active.
    pub fn is_refilter_suppressed(&self) -> bool {
        self.suppression.is_suppressed()
    }

    /// The ordered subset of images matching the active criteria, evaluated
    /// against the suppression-selected assignment view.
    pub fn filtered_images(&self, sizes: &dyn SizeProvider) -> Vec<String> {
        let view = self.suppression.view(self.store.assignments());
        filter::filtered_paths(&self.images, &self.criteria, view, sizes)
    }

    // ------------------------------------------------------------------
    // Category management
    // ------------------------------------------------------------------

    /// Create a category; returns its fresh id. Name uniqueness is the
    /// caller's concern via [`CategoryRegistry::is_duplicate_name`].
    pub fn create_category(&mut self, name: &str, color: Option<String>) -> CategoryId {
        self.registry.create(name, color).id.clone()
    }

    /// Merge a patch into a category. Returns whether anything was found to
    /// update.
    pub fn update_category(&mut self, id: &str, patch: CategoryPatch) -> bool {
        self.registry.update(id, patch)
    }

    /// Delete a category after external confirmation.
    ///
    /// Declined confirmation aborts normally and returns `false`. On
    /// confirmation the definition is removed, every assignment referencing
    /// it is purged (emptied image entries dropped), and every hotkey whose
    /// action targets it is disarmed; the binding itself survives.
    pub fn delete_category(&mut self, id: &str, confirm: &mut dyn ConfirmPrompt) -> bool {
        let Some(category) = self.registry.get(id) else {
            return false;
        };
        let prompt = format!("Delete category \"{}\"?", category.name);
        if !confirm.confirm(&prompt) {
            log::debug!("Category deletion declined: {}", id);
            return false;
        }

        let removed = self.registry.remove(id).is_some();
        self.store.purge_category(id);
        for hotkey in &mut self.hotkeys {
            if hotkey.category_id() == Some(id) {
                hotkey.disarm();
            }
        }
        if removed {
            log::info!("Deleted category {}", id);
        }
        removed
    }

    // ------------------------------------------------------------------
    // Assignment entry points
    // ------------------------------------------------------------------

    /// Attach a category to an arbitrary path (grid context menu, drag
    /// target, ...). May retarget the viewer immediately: when no
    /// suppression episode is active, a category filter is on, and the
    /// mutated path is the image being viewed, the viewer is re-resolved
    /// against the live mapping.
    pub fn assign_to_path(
        &mut self,
        path: &str,
        category_id: &str,
        viewer: &mut dyn ViewerSurface,
        sizes: &dyn SizeProvider,
    ) -> bool {
        let changed = self.store.assign(path, category_id, &self.registry);
        if changed {
            self.after_direct_mutation(path, viewer, sizes);
        }
        changed
    }

    /// Toggle a category on an arbitrary path. Same navigation policy as
    /// [`assign_to_path`].
    ///
    /// [`assign_to_path`]: Catalog::assign_to_path
    pub fn toggle_on_path(
        &mut self,
        path: &str,
        category_id: &str,
        viewer: &mut dyn ViewerSurface,
        sizes: &dyn SizeProvider,
    ) -> bool {
        let changed = self.store.toggle(path, category_id, &self.registry);
        if changed {
            self.after_direct_mutation(path, viewer, sizes);
        }
        changed
    }

    /// Attach a category to the image open in the viewer, via the viewer's
    /// own controls. With a category filter active this engages refilter
    /// suppression *before* mutating, so the image's filter membership stays
    /// frozen at its pre-edit state; the viewer is never retargeted here.
    pub fn assign_to_current(&mut self, category_id: &str) -> bool {
        let Some(path) = self.current_image.clone() else {
            return false;
        };
        if self.criteria.category.is_active() {
            self.suppression.engage(self.store.assignments());
        }
        self.store.assign(&path, category_id, &self.registry)
    }

    /// Toggle a category on the image open in the viewer. Same suppression
    /// policy as [`assign_to_current`].
    ///
    /// [`assign_to_current`]: Catalog::assign_to_current
    pub fn toggle_on_current(&mut self, category_id: &str) -> bool {
        let Some(path) = self.current_image.clone() else {
            return false;
        };
        if self.criteria.category.is_active() {
            self.suppression.engage(self.store.assignments());
        }
        self.store.toggle(&path, category_id, &self.registry)
    }

    fn after_direct_mutation(
        &mut self,
        path: &str,
        viewer: &mut dyn ViewerSurface,
        sizes: &dyn SizeProvider,
    ) {
        if self.suppression.is_suppressed() {
            // Deferred policy: navigation waits for the next explicit move.
            return;
        }
        if !self.criteria.category.is_active() {
            return;
        }
        if self.current_image.as_deref() != Some(path) {
            return;
        }
        let filtered = self.filtered_images(sizes);
        let outcome = navigation::resolve_after_change(path, &filtered);
        self.apply_outcome(outcome, viewer);
    }

    // ------------------------------------------------------------------
    // Viewer navigation
    // ------------------------------------------------------------------

    /// The user opened an image (grid click). Ends any suppression episode.
    pub fn open_image(&mut self, path: &str, viewer: &mut dyn ViewerSurface) {
        self.suppression.clear();
        self.current_image = Some(path.to_string());
        viewer.open(path);
    }

    /// The user closed the viewer. Ends any suppression episode.
    pub fn close_viewer(&mut self, viewer: &mut dyn ViewerSurface) {
        self.suppression.clear();
        self.current_image = None;
        viewer.close();
    }

    /// Explicit "next image". Clears suppression first, so the step is
    /// computed against the live mapping.
    pub fn next_image(&mut self, viewer: &mut dyn ViewerSurface, sizes: &dyn SizeProvider) {
        self.step_viewer(viewer, sizes, true);
    }

    /// Explicit "previous image". Clears suppression first.
    pub fn previous_image(&mut self, viewer: &mut dyn ViewerSurface, sizes: &dyn SizeProvider) {
        self.step_viewer(viewer, sizes, false);
    }

    fn step_viewer(&mut self, viewer: &mut dyn ViewerSurface, sizes: &dyn SizeProvider, forward: bool) {
        self.suppression.clear();
        let filtered = self.filtered_images(sizes);
        let outcome = navigation::step(self.current_image.as_deref(), &filtered, forward);
        self.apply_outcome(outcome, viewer);
    }

    fn apply_outcome(&mut self, outcome: NavigationOutcome, viewer: &mut dyn ViewerSurface) {
        match outcome {
            NavigationOutcome::Open(path) => {
                self.current_image = Some(path.clone());
                viewer.open(&path);
            }
            NavigationOutcome::Close => {
                self.current_image = None;
                viewer.close();
            }
        }
    }

    // ------------------------------------------------------------------
    // Hotkey dispatch
    // ------------------------------------------------------------------

    /// Execute a hotkey action. Returns whether assignments changed (and
    /// therefore need persisting).
    pub fn apply_hotkey(
        &mut self,
        action: &HotkeyAction,
        viewer: &mut dyn ViewerSurface,
        sizes: &dyn SizeProvider,
    ) -> bool {
        match action {
            HotkeyAction::None | HotkeyAction::Other(_) => false,
            HotkeyAction::NextImage => {
                self.next_image(viewer, sizes);
                false
            }
            HotkeyAction::PreviousImage => {
                self.previous_image(viewer, sizes);
                false
            }
            HotkeyAction::ToggleCategory { id, .. } => self.toggle_on_current(id),
            HotkeyAction::AssignCategory { id, .. } => self.assign_to_current(id),
            HotkeyAction::ToggleCategoryNext { id, .. } => {
                let changed = self.toggle_on_current(id);
                self.next_image(viewer, sizes);
                changed
            }
        }
    }

    // ------------------------------------------------------------------
    // Document boundary
    // ------------------------------------------------------------------

    /// Install loaded state. A missing document loads as the default (empty)
    /// one, clearing assignments. Returns whether the caller should persist
    /// right away: true when the document carried no hotkeys and the two
    /// defaults were seeded.
    pub fn apply_document(&mut self, document: CatalogDocument) -> bool {
        let (categories, assignments, mut hotkeys) = document.into_state();
        self.registry.set_categories(categories);
        self.store.set_assignments(assignments);
        self.suppression.clear();

        let seeded = hotkeys.is_empty();
        if seeded {
            log::info!("No stored hotkeys; seeding defaults");
            hotkeys = default_hotkeys();
        }
        self.hotkeys = hotkeys;
        seeded
    }

    /// Snapshot the session into the persisted document shape.
    pub fn to_document(&self) -> CatalogDocument {
        CatalogDocument::from_state(
            self.registry.categories(),
            self.store.assignments(),
            &self.hotkeys,
        )
    }

    /// Direct access for hosts managing bindings in a settings UI.
    pub fn set_hotkeys(&mut self, hotkeys: Vec<Hotkey>) {
        self.hotkeys = hotkeys;
    }

    #[cfg(test)]
    pub(crate) fn registry_mut(&mut self) -> &mut CategoryRegistry {
        &mut self.registry
    }
}

/// Test doubles shared by the unit tests in this crate.
#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Records viewer calls and mirrors the currently shown image.
    #[derive(Debug, Default)]
    pub struct RecordingViewer {
        pub shown: Option<String>,
        pub closed: u32,
    }

    impl ViewerSurface for RecordingViewer {
        fn open(&mut self, path: &str) {
            self.shown = Some(path.to_string());
        }

        fn close(&mut self) {
            self.shown = None;
            self.closed += 1;
        }
    }

    /// Prompt that always answers the same way.
    #[derive(Debug)]
    pub struct FixedPrompt(pub bool);

    impl ConfirmPrompt for FixedPrompt {
        fn confirm(&mut self, _message: &str) -> bool {
            self.0
        }
    }
}
