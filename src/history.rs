//! Submitted-line history with up/down navigation.

/// Command history for the lifetime of a prompt.
///
/// Entries are kept in submission order and never removed or reordered. Navigation
/// is an index into that sequence where `len()` means "past the newest entry", which
/// is the resting position at the start of every edit session.
///
/// # Examples
///
/// ```
/// use promptline::History;
///
/// let mut hist = History::new();
/// hist.push("first command");
/// hist.push("second command");
///
/// assert_eq!(hist.previous(), Some("second command"));
/// assert_eq!(hist.previous(), Some("first command"));
/// assert_eq!(hist.previous(), Some("first command")); // clamped at the oldest
/// ```
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<String>,
    position: usize,
}

impl History {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a submitted line and resets navigation past the newest entry.
    ///
    /// The caller decides what gets recorded; the prompt loop only pushes
    /// non-empty lines.
    pub fn push(&mut self, line: impl Into<String>) {
        self.entries.push(line.into());
        self.reset_navigation();
    }

    /// Number of recorded lines.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`, oldest first.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// Iterates over recorded lines, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(String::as_str)
    }

    /// Current navigation index; equals [`len`](Self::len) when not browsing.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns `true` while an entry is being shown instead of a fresh line.
    pub fn is_navigating(&self) -> bool {
        self.position < self.entries.len()
    }

    /// Moves navigation past the newest entry.
    pub fn reset_navigation(&mut self) {
        self.position = self.entries.len();
    }

    /// Steps toward older entries (Up arrow).
    ///
    /// Stops at the oldest entry: once there, every further call keeps returning it.
    /// Returns `None` only when the history is empty.
    pub fn previous(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        self.position = self.position.saturating_sub(1);
        Some(&self.entries[self.position])
    }

    /// Steps toward newer entries (Down arrow).
    ///
    /// Stepping past the newest entry returns `Some("")`, the empty line that was
    /// being edited before browsing started. Once there, further calls return `None`.
    pub fn next_entry(&mut self) -> Option<&str> {
        if !self.is_navigating() {
            return None;
        }
        self.position += 1;
        Some(self.entries.get(self.position).map_or("", String::as_str))
    }
}
