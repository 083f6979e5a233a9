//! Line-oriented user interaction.
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, BufRead as _, Write as _};

/// Shows text to the user and reads one line of input at a time.
pub trait Prompt {
    /// Display a line of text.
    fn show(&self, line: &str);

    /// Print `question` and read one line of input, without its terminator.
    ///
    /// End of input yields an empty string.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read or written.
    fn ask(&self, question: &str) -> io::Result<String>;
}

/// Prompt bound to the process's stdin and stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

#[allow(clippy::print_stdout)]
impl Prompt for TerminalPrompt {
    fn show(&self, line: &str) {
        println!("{line}");
    }

    fn ask(&self, question: &str) -> io::Result<String> {
        print!("{question} ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;
        Ok(input.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Prompt that replays canned answers and records everything it was asked.
///
/// Answers are consumed in order; once they run out every question is
/// answered with an empty line, as if input had reached end of file.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: RefCell<VecDeque<String>>,
    shown: RefCell<Vec<String>>,
    questions: RefCell<Vec<String>>,
}

impl ScriptedPrompt {
    /// Create a prompt that will answer with `answers`, in order.
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: RefCell::new(answers.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Every line passed to [`Prompt::show`].
    #[must_use]
    pub fn shown(&self) -> Vec<String> {
        self.shown.borrow().clone()
    }

    /// Every question passed to [`Prompt::ask`].
    #[must_use]
    pub fn questions(&self) -> Vec<String> {
        self.questions.borrow().clone()
    }
}

impl Prompt for ScriptedPrompt {
    fn show(&self, line: &str) {
        self.shown.borrow_mut().push(line.to_string());
    }

    fn ask(&self, question: &str) -> io::Result<String> {
        self.questions.borrow_mut().push(question.to_string());
        Ok(self.answers.borrow_mut().pop_front().unwrap_or_default())
    }
}
