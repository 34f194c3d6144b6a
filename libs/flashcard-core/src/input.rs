//! Keyboard surface of a study session.

/// A discrete key press, independent of any terminal or UI toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    ArrowRight,
    ArrowLeft,
    Char(char),
    Other,
}

/// Session operation bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleFlip,
    Next,
    Prev,
    MarkKnown,
    MarkUnknown,
}

impl Command {
    /// Map a key to its command.
    ///
    /// Space flips, arrows navigate, `1` marks known and `2` marks unknown.
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Space => Some(Self::ToggleFlip),
            Key::ArrowRight => Some(Self::Next),
            Key::ArrowLeft => Some(Self::Prev),
            Key::Char('1') => Some(Self::MarkKnown),
            Key::Char('2') => Some(Self::MarkUnknown),
            Key::Char(_) | Key::Other => None,
        }
    }
}
