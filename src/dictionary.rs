//! Known commands for tab completion.

/// Ordered list of command strings used for prefix completion.
///
/// Entries are appended while configuring the prompt and only read while editing.
/// Duplicates are allowed; they never change which entry completes first.
///
/// # Examples
///
/// ```
/// use promptline::Dictionary;
///
/// let mut dict = Dictionary::new();
/// dict.add("remove");
/// dict.add("mkdir");
///
/// assert_eq!(dict.complete("re"), Some("remove"));
/// assert_eq!(dict.complete("zz"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    commands: Vec<String>,
}

impl Dictionary {
    /// Creates an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a command at the end of the lookup order.
    pub fn add(&mut self, command: impl Into<String>) {
        self.commands.push(command.into());
    }

    /// Number of commands, duplicates included.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if no commands have been added.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterates over commands in lookup order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().map(String::as_str)
    }

    /// First command, in insertion order, that starts with `prefix`.
    ///
    /// Matching is byte-wise, so a prefix that is not valid UTF-8 simply finds
    /// nothing. An empty prefix never completes.
    pub fn complete(&self, prefix: impl AsRef<[u8]>) -> Option<&str> {
        let prefix = prefix.as_ref();
        if prefix.is_empty() {
            return None;
        }
        self.iter().find(|command| command.as_bytes().starts_with(prefix))
    }
}

impl<S: Into<String>> Extend<S> for Dictionary {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.commands.extend(iter.into_iter().map(Into::into));
    }
}

impl<S: Into<String>> FromIterator<S> for Dictionary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut dict = Dictionary::new();
        dict.extend(iter);
        dict
    }
}
