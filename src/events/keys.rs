//! Key binding definitions and context hints.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// The view a key press is interpreted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    /// The sortable admin table.
    Table,
    /// The save route form.
    RouteForm,
    /// The help screen.
    Help,
}

impl KeyContext {
    /// Section title in the help screen.
    pub fn display(&self) -> &'static str {
        match self {
            KeyContext::Table => "Table",
            KeyContext::RouteForm => "Save Route",
            KeyContext::Help => "Help",
        }
    }
}

/// A documented key binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keybinding {
    /// Key as shown to the user.
    pub key: &'static str,
    /// What the key does.
    pub description: &'static str,
}

const fn bind(key: &'static str, description: &'static str) -> Keybinding {
    Keybinding { key, description }
}

const TABLE_BINDINGS: &[Keybinding] = &[
    bind("j / ↓", "Next row"),
    bind("k / ↑", "Previous row"),
    bind("g / G", "First / last row"),
    bind("1-9", "Sort by column"),
    bind("< / >", "Focus previous / next column"),
    bind("s", "Sort by focused column"),
    bind("click header", "Sort by column"),
    bind("space", "Check / uncheck row"),
    bind("a", "Check / uncheck all rows"),
    bind("r", "Save checked rows as a route"),
    bind("c", "Mark highlighted row complete"),
    bind("b", "Open the route builder"),
    bind("v", "Open the route list"),
    bind("R", "Reload the table"),
    bind("q", "Quit"),
];

const ROUTE_FORM_BINDINGS: &[Keybinding] = &[
    bind("Tab", "Next field"),
    bind("Shift+Tab", "Previous field"),
    bind("Enter", "Save the route"),
    bind("Esc", "Cancel"),
];

const HELP_BINDINGS: &[Keybinding] = &[
    bind("j / k", "Scroll"),
    bind("? / q / Esc", "Close help"),
];

/// Get every documented binding, grouped by context.
pub fn get_keybindings_grouped() -> Vec<(KeyContext, &'static [Keybinding])> {
    vec![
        (KeyContext::Table, TABLE_BINDINGS),
        (KeyContext::RouteForm, ROUTE_FORM_BINDINGS),
        (KeyContext::Help, HELP_BINDINGS),
    ]
}

/// Get the footer hint line for a context.
///
/// Keys are written in brackets so the help bar can highlight them.
pub fn get_context_hints(context: KeyContext) -> &'static str {
    match context {
        KeyContext::Table => {
            "[j/k] move  [1-9] sort  [</>] column  [s] sort  [space] check  [a] all  [r] route  [c] complete  [?] help"
        }
        KeyContext::RouteForm => "[Tab] next field  [Enter] save  [Esc] cancel",
        KeyContext::Help => "[Esc] close",
    }
}

/// Key binding configuration.
#[derive(Debug, Clone, Copy)]
pub struct KeyBindings {
    /// Whether vim-style bindings are enabled.
    pub vim_mode: bool,
}

impl KeyBindings {
    /// Create new key bindings.
    pub fn new(vim_mode: bool) -> Self {
        Self { vim_mode }
    }

    /// Check for "move down" (`↓`, or `j` in vim mode).
    pub fn is_down(&self, key: &KeyEvent) -> bool {
        key.code == KeyCode::Down || (self.vim_mode && is_plain(key, 'j'))
    }

    /// Check for "move up" (`↑`, or `k` in vim mode).
    pub fn is_up(&self, key: &KeyEvent) -> bool {
        key.code == KeyCode::Up || (self.vim_mode && is_plain(key, 'k'))
    }

    /// Check for "first row" (`Home`, or `g` in vim mode).
    pub fn is_top(&self, key: &KeyEvent) -> bool {
        key.code == KeyCode::Home || (self.vim_mode && is_plain(key, 'g'))
    }

    /// Check for "last row" (`End`, or `G` in vim mode).
    pub fn is_bottom(&self, key: &KeyEvent) -> bool {
        key.code == KeyCode::End
            || (self.vim_mode
                && key.code == KeyCode::Char('G')
                && !key.modifiers.contains(KeyModifiers::CONTROL))
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new(true)
    }
}

fn is_plain(key: &KeyEvent, c: char) -> bool {
    key.code == KeyCode::Char(c) && key.modifiers == KeyModifiers::NONE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrows_always_work() {
        let bindings = KeyBindings::new(false);
        assert!(bindings.is_down(&key(KeyCode::Down)));
        assert!(bindings.is_up(&key(KeyCode::Up)));
        assert!(!bindings.is_down(&key(KeyCode::Char('j'))));
    }

    #[test]
    fn test_vim_keys() {
        let bindings = KeyBindings::default();
        assert!(bindings.is_down(&key(KeyCode::Char('j'))));
        assert!(bindings.is_up(&key(KeyCode::Char('k'))));
        assert!(bindings.is_top(&key(KeyCode::Char('g'))));
        assert!(bindings.is_bottom(&KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT)));
    }

    #[test]
    fn test_grouped_bindings_cover_every_context() {
        let grouped = get_keybindings_grouped();
        assert_eq!(grouped.len(), 3);
        assert!(grouped.iter().all(|(_, bindings)| !bindings.is_empty()));
        assert!(TABLE_BINDINGS.iter().any(|b| b.key == "1-9"));
    }

    #[test]
    fn test_hints_mention_sorting() {
        assert!(get_context_hints(KeyContext::Table).contains("sort"));
        assert!(get_context_hints(KeyContext::RouteForm).contains("[Enter]"));
    }
}
