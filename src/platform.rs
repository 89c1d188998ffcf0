//! Platform-specific key handling

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Extra modifier accepted for shortcuts besides Ctrl
/// - macOS: SUPER (Cmd key, when the terminal reports it)
/// - Linux/Windows: CONTROL
#[cfg(target_os = "macos")]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Shortcut displays for help text. Ctrl works on all platforms.
pub const NEXT_SHORTCUT: &str = "Ctrl+N";
pub const PREVIOUS_SHORTCUT: &str = "Ctrl+P";
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";
pub const LOGOUT_SHORTCUT: &str = "Ctrl+L";

/// Whether `key` is the shortcut for `c`
pub fn is_shortcut(key: &KeyEvent, c: char) -> bool {
    let modified = key.modifiers.contains(KeyModifiers::CONTROL)
        || key.modifiers.contains(SHORTCUT_MODIFIER);
    modified && matches!(key.code, KeyCode::Char(k) if k.eq_ignore_ascii_case(&c))
}
