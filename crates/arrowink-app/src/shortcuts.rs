//! Keyboard shortcut registry and documentation.

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: &'static str, ctrl: bool, shift: bool, description: &'static str) -> Self {
        Self {
            key,
            ctrl,
            shift,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+E").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("E", true, false, "Export arrow as SVG"),
            Shortcut::new("Escape", false, false, "Cancel drag or resize"),
            Shortcut::new("Shift+Drag", false, false, "Keep aspect ratio / snap rotation to 15°"),
            Shortcut::new("?", false, false, "Show keyboard shortcuts"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        assert_eq!(Shortcut::new("E", true, false, "").format(), "Ctrl+E");
        assert_eq!(Shortcut::new("Z", true, true, "").format(), "Ctrl+Shift+Z");
        assert_eq!(Shortcut::new("Escape", false, false, "").format(), "Escape");
    }
}
