//! Key Names - Canonical key names and normalization.
//!
//! Hosts report key names in whatever form their platform uses ("Tab",
//! "ArrowUp", " ", "Spacebar"). The interaction systems compare against the
//! canonical lowercase names defined here; [`KeyEvent::new`] runs
//! [`normalize_key`] so handlers never see a raw name.
//!
//! [`KeyEvent::new`]: crate::events::KeyEvent::new

/// Canonical name for the space bar.
pub const SPACE: &str = "space";
/// Canonical name for the enter/return key.
pub const ENTER: &str = "enter";
/// Canonical name for the tab key.
pub const TAB: &str = "tab";
/// Canonical name for the escape key.
pub const ESCAPE: &str = "escape";
/// Canonical name for the up arrow.
pub const UP: &str = "up";
/// Canonical name for the down arrow.
pub const DOWN: &str = "down";
/// Canonical name for the left arrow.
pub const LEFT: &str = "left";
/// Canonical name for the right arrow.
pub const RIGHT: &str = "right";

/// Keys that drive keyboard navigation.
///
/// A keydown for one of these counts as a "qualifying" keydown for focus
/// classification and clears pointer suppression.
const FOCUS_KEYS: [&str; 8] = [TAB, ENTER, SPACE, ESCAPE, UP, DOWN, LEFT, RIGHT];

/// Map a raw host key name to its canonical lowercase form.
///
/// Names with platform aliases get explicit mappings; everything else is
/// lowercased as-is ("Enter" -> "enter", "A" -> "a").
pub fn normalize_key(raw: &str) -> String {
    match raw {
        " " | "Space" | "Spacebar" => SPACE.to_string(),
        "Esc" | "Escape" => ESCAPE.to_string(),
        "ArrowUp" | "Up" => UP.to_string(),
        "ArrowDown" | "Down" => DOWN.to_string(),
        "ArrowLeft" | "Left" => LEFT.to_string(),
        "ArrowRight" | "Right" => RIGHT.to_string(),
        "Return" => ENTER.to_string(),
        _ => raw.to_ascii_lowercase(),
    }
}

/// Check whether a canonical key name participates in keyboard navigation.
pub fn is_focus_key(key: &str) -> bool {
    FOCUS_KEYS.contains(&key)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_aliases() {
        assert_eq!(normalize_key(" "), "space");
        assert_eq!(normalize_key("Spacebar"), "space");
        assert_eq!(normalize_key("Esc"), "escape");
        assert_eq!(normalize_key("ArrowUp"), "up");
        assert_eq!(normalize_key("Return"), "enter");
    }

    #[test]
    fn test_normalize_lowercases() {
        assert_eq!(normalize_key("Enter"), "enter");
        assert_eq!(normalize_key("Tab"), "tab");
        assert_eq!(normalize_key("A"), "a");
    }

    #[test]
    fn test_focus_keys() {
        assert!(is_focus_key(TAB));
        assert!(is_focus_key(SPACE));
        assert!(is_focus_key(ESCAPE));
        assert!(!is_focus_key("a"));
        // Raw names must be normalized before the check.
        assert!(!is_focus_key("Tab"));
    }
}
