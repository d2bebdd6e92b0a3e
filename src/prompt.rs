//! The prompt loop and its configuration.

use crate::editor::{Line, Printer};
use crate::{Dictionary, LineEditor, RawModeGuard, Result, Terminal};

/// Prompt printed before each line when none is configured.
pub const DEFAULT_PROMPT: &str = "prompt$> ";

type SubmitHandler = Box<dyn FnMut(&str)>;

/// Repeatedly prints a prompt, reads one edited line and hands it to a handler.
///
/// Non-empty lines go to the submit handler and then into history; empty lines
/// are dropped. The loop only ends on the terminate key (Ctrl+C).
///
/// # Examples
///
/// ```
/// use promptline::Prompt;
///
/// let mut prompt = Prompt::builder()
///     .prompt("> ")
///     .command("remove")
///     .command("mkdir")
///     .on_submit(|line| println!("got {line}"))
///     .build();
/// prompt.add_command("rmdir");
/// assert_eq!(prompt.editor().dictionary().len(), 3);
/// ```
pub struct Prompt {
    prompt: String,
    welcome: String,
    on_submit: Option<SubmitHandler>,
    editor: LineEditor,
}

impl std::fmt::Debug for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prompt")
            .field("prompt", &self.prompt)
            .field("welcome", &self.welcome)
            .field("on_submit", &self.on_submit.is_some())
            .field("editor", &self.editor)
            .finish()
    }
}

impl Default for Prompt {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Prompt {
    pub fn builder() -> PromptBuilder {
        PromptBuilder::default()
    }

    /// Appends a command to the completion dictionary.
    pub fn add_command(&mut self, command: impl Into<String>) {
        self.editor.dictionary_mut().add(command);
    }

    pub fn editor(&self) -> &LineEditor {
        &self.editor
    }

    /// Enters raw mode and runs the prompt loop until the terminate key.
    ///
    /// Raw mode is released before this returns, whatever the outcome, so the
    /// caller can exit the process right after `Ok(())`.
    ///
    /// # Errors
    ///
    /// Propagates terminal failures, including [`Error::Eof`](crate::Error::Eof)
    /// when input is closed.
    pub fn start<T: Terminal + ?Sized>(&mut self, terminal: &mut T) -> Result<()> {
        let mut guard = RawModeGuard::new(terminal)?;
        self.run(&mut *guard)
    }

    /// Runs the prompt loop on a terminal that is already in raw mode.
    ///
    /// Returns `Ok(())` once the terminate key is pressed.
    ///
    /// # Errors
    ///
    /// Propagates terminal failures. Panics raised by the submit handler are not
    /// caught.
    pub fn run<T: Terminal + ?Sized>(&mut self, terminal: &mut T) -> Result<()> {
        if !self.welcome.is_empty() {
            terminal.write(self.welcome.as_bytes())?;
            terminal.write(b"\n")?;
        }

        loop {
            terminal.write(self.prompt.as_bytes())?;
            terminal.flush()?;

            match self.editor.read_line(terminal)? {
                Line::Submitted(line) if line.is_empty() => {}
                Line::Submitted(line) => self.submit(line),
                Line::Terminated => return Ok(()),
            }
        }
    }

    fn submit(&mut self, line: String) {
        if let Some(on_submit) = self.on_submit.as_mut() {
            on_submit(&line);
        }
        self.editor.history_mut().push(line);
    }
}

/// Construction-time options for a [`Prompt`].
#[derive(Default)]
pub struct PromptBuilder {
    prompt: Option<String>,
    welcome: String,
    on_submit: Option<SubmitHandler>,
    printer: Option<Printer>,
    dictionary: Dictionary,
}

impl PromptBuilder {
    /// Text printed before each line. Defaults to [`DEFAULT_PROMPT`].
    pub fn prompt(mut self, text: impl Into<String>) -> Self {
        self.prompt = Some(text.into());
        self
    }

    /// Text printed once before the first prompt. Empty suppresses it.
    pub fn welcome(mut self, text: impl Into<String>) -> Self {
        self.welcome = text.into();
        self
    }

    /// Called with every non-empty submitted line.
    pub fn on_submit(mut self, handler: impl FnMut(&str) + 'static) -> Self {
        self.on_submit = Some(Box::new(handler));
        self
    }

    /// Called with the whole buffer after every inserted character.
    pub fn printer(mut self, printer: impl FnMut(&str) + 'static) -> Self {
        self.printer = Some(Box::new(printer));
        self
    }

    /// Appends one completion command.
    pub fn command(mut self, command: impl Into<String>) -> Self {
        self.dictionary.add(command);
        self
    }

    /// Appends several completion commands, keeping their order.
    pub fn commands<I, S>(mut self, commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dictionary.extend(commands);
        self
    }

    pub fn build(self) -> Prompt {
        let mut editor = LineEditor::new(self.dictionary);
        editor.set_printer(self.printer);
        Prompt {
            prompt: self.prompt.unwrap_or_else(|| DEFAULT_PROMPT.to_string()),
            welcome: self.welcome,
            on_submit: self.on_submit,
            editor,
        }
    }
}
