//! Viewer retargeting after the filtered subset changes.

/// What the viewer should do after the filtered set changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Show this image.
    Open(String),
    /// No image to show; close the viewer.
    Close,
}

/// Decide where the viewer goes after a mutation changed the filtered set.
///
/// Total, deterministic rule over the freshly computed `filtered` list:
/// - current path absent: open the first element, or close if the list is
///   empty;
/// - current path last: open the element before it, or close if it is the
///   only element;
/// - otherwise: open the next element.
pub fn resolve_after_change(current: &str, filtered: &[String]) -> NavigationOutcome {
    match filtered.iter().position(|p| p == current) {
        None => match filtered.first() {
            Some(first) => NavigationOutcome::Open(first.clone()),
            None => NavigationOutcome::Close,
        },
        Some(idx) if idx + 1 == filtered.len() => {
            if filtered.len() > 1 {
                NavigationOutcome::Open(filtered[idx - 1].clone())
            } else {
                NavigationOutcome::Close
            }
        }
        Some(idx) => NavigationOutcome::Open(filtered[idx + 1].clone()),
    }
}

/// Step to the neighbouring filtered image for an explicit user navigation.
///
/// Wraps around at either end. An absent current path falls back to the
/// first element; an empty list closes the viewer.
pub fn step(current: Option<&str>, filtered: &[String], forward: bool) -> NavigationOutcome {
    if filtered.is_empty() {
        return NavigationOutcome::Close;
    }
    let Some(idx) = current.and_then(|c| filtered.iter().position(|p| p == c)) else {
        return NavigationOutcome::Open(filtered[0].clone());
    };
    let len = filtered.len();
    let next = if forward {
        (idx + 1) % len
    } else {
        (idx + len - 1) % len
    };
    NavigationOutcome::Open(filtered[next].clone())
}
