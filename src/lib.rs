//! picsort - category engine for a browsable image classifier.
//!
//! This crate is the state core of an image classification tool: category
//! definitions with mutual-exclusion rules, per-image label assignments,
//! filtered browsing (by category, filename, and file size), and the
//! deferred-refilter logic that keeps the single-image viewer stable while
//! the user edits the labels of the image they are looking at.
//!
//! Rendering, windowing, and dialogs are the hosting application's business;
//! they plug in through the collaborator traits in [`catalog`] and
//! [`filter`]. Persistence goes through [`config_sync`], one JSON document
//! per browsed directory.

pub mod catalog;
pub mod config_sync;
pub mod document;
pub mod filter;
pub mod model;
pub mod navigation;
pub mod registry;
pub mod scan;
pub mod store;
pub mod suppression;

pub use catalog::{Catalog, ConfirmPrompt, ViewerSurface};
pub use config_sync::{ConfigLocation, ConfigSync, SyncError, DEFAULT_CONFIG_FILENAME};
pub use document::CatalogDocument;
pub use filter::{
    CategoryFilter, FilterCriteria, NameOperator, SizeCriteria, SizeIndex, SizeProvider,
};
pub use model::{Assignment, AssignmentMap, Category, CategoryId, CategoryPatch, Hotkey, HotkeyAction};
pub use navigation::NavigationOutcome;
pub use registry::CategoryRegistry;
pub use scan::{list_images, DirectoryListing, ImageFile, ScanError};
pub use store::AssignmentStore;
pub use suppression::RefilterSuppression;
