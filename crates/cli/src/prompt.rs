//! Terminal implementation of the confirmation/notification seam.

use std::io::{self, BufRead, Write};

use clementine_dashboard::prompt::{ConfirmPrompt, Notice, NoticeTone, OperatorPrompt, PromptTone};

/// Prompts on stdin/stdout; `--yes` turns every confirmation into a yes.
pub struct TermPrompt {
    assume_yes: bool,
}

impl TermPrompt {
    #[must_use]
    pub const fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl OperatorPrompt for TermPrompt {
    fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        if self.assume_yes {
            return true;
        }

        let lead = match prompt.tone {
            PromptTone::Question => "confirm",
            PromptTone::Warning => "warning",
        };
        println!("[{lead}] {}", prompt.title);
        print!("{} [y/N] ", prompt.body);
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }

    fn notify(&self, notice: &Notice) {
        match notice.tone {
            NoticeTone::Success => println!("{} {}", notice.title, notice.body),
            NoticeTone::Error => eprintln!("{} {}", notice.title, notice.body),
        }
    }
}
