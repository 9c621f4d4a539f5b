//! Hotkey data model and typed action encoding.
//!
//! On disk a hotkey action is a plain string: either a fixed action name
//! (`next_image`, `previous_image`) or a category action of the form
//! `<verb>_category_<id>` with an optional `_suffix` token after the id.
//! The string is decoded into [`HotkeyAction`] once at the persistence
//! boundary so the rest of the engine dispatches on a closed enum instead
//! of prefix-matching strings.

use super::CategoryId;

/// A keyboard shortcut bound to an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hotkey {
    /// Unique identifier for the binding.
    pub id: String,
    /// Key name (e.g. `"ArrowRight"`, `"a"`).
    pub key: String,
    /// Modifier names held together with the key (e.g. `"ctrl"`, `"shift"`).
    pub modifiers: Vec<String>,
    /// What the binding does.
    pub action: HotkeyAction,
}

impl Hotkey {
    /// Create a hotkey with no modifiers.
    pub fn new(id: impl Into<String>, key: impl Into<String>, action: HotkeyAction) -> Self {
        Self {
            id: id.into(),
            key: key.into(),
            modifiers: Vec::new(),
            action,
        }
    }

    /// The category this binding acts on, if it is a category action.
    pub fn category_id(&self) -> Option<&str> {
        self.action.category_id()
    }

    /// Disarm the binding: the hotkey itself is kept, only its action is
    /// cleared. Used when the referenced category is deleted.
    pub fn disarm(&mut self) {
        self.action = HotkeyAction::None;
    }
}

/// The two bindings seeded on first load of a directory with no stored
/// hotkeys.
pub fn default_hotkeys() -> Vec<Hotkey> {
    vec![
        Hotkey::new("hotkey-next", "ArrowRight", HotkeyAction::NextImage),
        Hotkey::new("hotkey-previous", "ArrowLeft", HotkeyAction::PreviousImage),
    ]
}

/// Action bound to a hotkey.
///
/// Category-addressed variants carry the optional trailing suffix token from
/// the wire encoding so unknown suffixes round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HotkeyAction {
    /// Disarmed binding (empty string on disk).
    None,
    /// Advance the viewer to the next filtered image.
    NextImage,
    /// Move the viewer to the previous filtered image.
    PreviousImage,
    /// Toggle a category on the current image.
    ToggleCategory {
        /// Target category.
        id: CategoryId,
        /// Trailing suffix token, if present in the encoding.
        suffix: Option<String>,
    },
    /// Toggle a category on the current image, then advance.
    ToggleCategoryNext {
        /// Target category.
        id: CategoryId,
        /// Trailing suffix token, if present in the encoding.
        suffix: Option<String>,
    },
    /// Assign (never remove) a category to the current image.
    AssignCategory {
        /// Target category.
        id: CategoryId,
        /// Trailing suffix token, if present in the encoding.
        suffix: Option<String>,
    },
    /// Unrecognized action string, preserved verbatim.
    Other(String),
}

impl HotkeyAction {
    const TOGGLE_NEXT_PREFIX: &'static str = "toggle_category_next_";
    const TOGGLE_PREFIX: &'static str = "toggle_category_";
    const ASSIGN_PREFIX: &'static str = "assign_category_";

    /// Decode a wire action string.
    ///
    /// `toggle_category_next_` is matched before `toggle_category_` since the
    /// former is a textual extension of the latter. The remainder after a
    /// prefix splits on the first `_` into id and suffix; generated category
    /// ids contain no underscore, so the split is unambiguous for them.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "" => return HotkeyAction::None,
            "next_image" => return HotkeyAction::NextImage,
            "previous_image" => return HotkeyAction::PreviousImage,
            _ => {}
        }
        if let Some(rest) = raw.strip_prefix(Self::TOGGLE_NEXT_PREFIX) {
            if let Some((id, suffix)) = split_payload(rest) {
                return HotkeyAction::ToggleCategoryNext { id, suffix };
            }
        } else if let Some(rest) = raw.strip_prefix(Self::TOGGLE_PREFIX) {
            if let Some((id, suffix)) = split_payload(rest) {
                return HotkeyAction::ToggleCategory { id, suffix };
            }
        } else if let Some(rest) = raw.strip_prefix(Self::ASSIGN_PREFIX) {
            if let Some((id, suffix)) = split_payload(rest) {
                return HotkeyAction::AssignCategory { id, suffix };
            }
        }
        HotkeyAction::Other(raw.to_string())
    }

    /// Encode back to the wire string.
    pub fn encode(&self) -> String {
        match self {
            HotkeyAction::None => String::new(),
            HotkeyAction::NextImage => "next_image".to_string(),
            HotkeyAction::PreviousImage => "previous_image".to_string(),
            HotkeyAction::ToggleCategory { id, suffix } => {
                join_payload(Self::TOGGLE_PREFIX, id, suffix.as_deref())
            }
            HotkeyAction::ToggleCategoryNext { id, suffix } => {
                join_payload(Self::TOGGLE_NEXT_PREFIX, id, suffix.as_deref())
            }
            HotkeyAction::AssignCategory { id, suffix } => {
                join_payload(Self::ASSIGN_PREFIX, id, suffix.as_deref())
            }
            HotkeyAction::Other(raw) => raw.clone(),
        }
    }

    /// The category this action targets, if any.
    pub fn category_id(&self) -> Option<&str> {
        match self {
            HotkeyAction::ToggleCategory { id, .. }
            | HotkeyAction::ToggleCategoryNext { id, .. }
            | HotkeyAction::AssignCategory { id, .. } => Some(id),
            _ => None,
        }
    }
}

fn split_payload(rest: &str) -> Option<(CategoryId, Option<String>)> {
    if rest.is_empty() {
        return None;
    }
    match rest.split_once('_') {
        Some((id, suffix)) if !id.is_empty() => Some((id.to_string(), Some(suffix.to_string()))),
        Some(_) => None,
        None => Some((rest.to_string(), None)),
    }
}

fn join_payload(prefix: &str, id: &str, suffix: Option<&str>) -> String {
    match suffix {
        Some(suffix) => format!("{prefix}{id}_{suffix}"),
        None => format!("{prefix}{id}"),
    }
}
