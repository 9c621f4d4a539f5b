//! Data models for the category engine.

mod assignment;
mod category;
mod hotkey;

pub use assignment::{Assignment, AssignmentMap};
pub use category::{Category, CategoryId, CategoryPatch, CATEGORY_PALETTE};
pub use hotkey::{default_hotkeys, Hotkey, HotkeyAction};
