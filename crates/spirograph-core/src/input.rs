//! Input samples and keyboard shortcut actions.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Fixed angular size of one keyboard nudge, in degrees.
pub const NUDGE_DEGREES: f64 = 29.253;

/// One angle sample, either programmatic or derived from the pointer.
///
/// Pointer positions are expected in the logical frame (see
/// [`crate::viewport::Viewport`]); the session converts them to an angle
/// about whichever pivot the active mode uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AngleInput {
    Degrees(f64),
    Pointer(Point),
}

/// Semantic actions the session understands, decoupled from key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShortcutAction {
    /// Nudge the gear forward along the fixed shape by [`NUDGE_DEGREES`].
    NudgeForward,
    /// Nudge the gear backward by [`NUDGE_DEGREES`].
    NudgeBackward,
    /// Advance the meshing phase by exactly one tooth.
    ToothStepForward,
    /// Back the meshing phase off by exactly one tooth.
    ToothStepBackward,
    /// Lift the pen (modifier held).
    PenUp,
    /// Put the pen back down (modifier released).
    PenDown,
    /// Switch drags to in-place rotation (modifier held).
    InPlaceOn,
    /// Switch drags back to free motion (modifier released).
    InPlaceOff,
}

/// A key binding: what to do on press and, for held modifiers, on release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    pub key: &'static str,
    pub on_press: ShortcutAction,
    pub on_release: Option<ShortcutAction>,
    pub description: &'static str,
}

impl Shortcut {
    const fn new(
        key: &'static str,
        on_press: ShortcutAction,
        on_release: Option<ShortcutAction>,
        description: &'static str,
    ) -> Self {
        Self { key, on_press, on_release, description }
    }
}

/// The default key table. Hosts feed raw key events through this and hand
/// the resulting actions to the session.
pub fn default_shortcuts() -> Vec<Shortcut> {
    use ShortcutAction::*;
    vec![
        Shortcut::new("ArrowLeft", NudgeForward, None, "Roll the gear forward"),
        Shortcut::new("ArrowUp", NudgeForward, None, "Roll the gear forward"),
        Shortcut::new("ArrowRight", NudgeBackward, None, "Roll the gear backward"),
        Shortcut::new("ArrowDown", NudgeBackward, None, "Roll the gear backward"),
        Shortcut::new("Comma", ToothStepForward, None, "Advance meshing by one tooth"),
        Shortcut::new("Period", ToothStepBackward, None, "Back meshing off by one tooth"),
        Shortcut::new("Shift", PenUp, Some(PenDown), "Hold to move without drawing"),
        Shortcut::new("Control", InPlaceOn, Some(InPlaceOff), "Hold to rotate the gear in place"),
    ]
}

/// Look up the press action bound to `key`, if any.
pub fn action_for_key(key: &str) -> Option<ShortcutAction> {
    default_shortcuts().iter().find(|s| s.key == key).map(|s| s.on_press)
}

/// Look up the release action bound to `key`, if any.
pub fn release_action_for_key(key: &str) -> Option<ShortcutAction> {
    default_shortcuts().iter().find(|s| s.key == key).and_then(|s| s.on_release)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_have_release_actions() {
        for shortcut in default_shortcuts() {
            match shortcut.on_press {
                ShortcutAction::PenUp | ShortcutAction::InPlaceOn => {
                    assert!(shortcut.on_release.is_some(), "{} needs a release action", shortcut.key)
                }
                _ => assert!(shortcut.on_release.is_none(), "{} should not latch", shortcut.key),
            }
        }
    }

    #[test]
    fn test_key_lookup() {
        assert_eq!(action_for_key("Comma"), Some(ShortcutAction::ToothStepForward));
        assert_eq!(release_action_for_key("Shift"), Some(ShortcutAction::PenDown));
        assert_eq!(action_for_key("KeyQ"), None);
    }
}
