//! Blocking operator notices.
//!
//! Operator actions talk to the person at the keyboard only through a
//! [`Notifier`]. [`TerminalNotifier`] renders notices with `console` and
//! asks yes/no questions with `dialoguer`.

use console::style;
use dialoguer::Confirm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Buttons {
    Ok,
    YesNo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Ok,
    Yes,
    No,
    /// The notice was dismissed without an answer.
    Close,
}

pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, message: &str, buttons: Buttons) -> Button;
}

pub struct TerminalNotifier {
    assume_yes: bool,
}

impl TerminalNotifier {
    #[must_use]
    pub const fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, title: &str, message: &str, buttons: Buttons) -> Button {
        println!("\n  {}\n", style(title).cyan().bold());
        for line in message.lines() {
            println!("  {line}");
        }
        println!();

        match buttons {
            Buttons::Ok => Button::Ok,
            Buttons::YesNo if self.assume_yes => {
                println!("  {} confirmed by --yes", style("✓").green());
                Button::Yes
            }
            Buttons::YesNo => {
                if !console::Term::stdout().is_term() {
                    eprintln!(
                        "  {} no terminal to confirm on; pass --yes to proceed",
                        style("!").red().bold()
                    );
                    return Button::Close;
                }
                match Confirm::new()
                    .with_prompt("Proceed?")
                    .default(false)
                    .interact_opt()
                {
                    Ok(Some(true)) => Button::Yes,
                    Ok(Some(false)) => Button::No,
                    Ok(None) => Button::Close,
                    Err(e) => {
                        tracing::warn!(error = %e, "confirmation prompt failed");
                        Button::Close
                    }
                }
            }
        }
    }
}
