//! Keystroke filter for integer-only number inputs

/// A keydown as seen by the filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    /// Key name as reported by the browser (`"5"`, `"-"`, `"Backspace"`)
    pub key: String,
    pub ctrl: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into(), ctrl: false }
    }

    pub fn with_ctrl(key: impl Into<String>) -> Self {
        Self { key: key.into(), ctrl: true }
    }

    /// Decide whether the key may reach a field currently holding `current_value`
    pub fn accepts(&self, current_value: &str) -> bool {
        let mut chars = self.key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                self.ctrl || (c == '-' && current_value.is_empty()) || c.is_ascii_digit()
            }
            // Named keys: Backspace, ArrowLeft, Tab...
            (Some(_), Some(_)) => true,
            (None, _) => self.ctrl,
        }
    }
}
