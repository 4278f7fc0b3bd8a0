//! Subcommand dispatch and execution.
//!
//! The [`dispatch`] function routes the parsed CLI to the appropriate
//! subcommand handler. Each handler lives in its own submodule; the
//! operator actions share their loading helpers through [`operator`].

pub mod health;
pub mod init;
pub mod install_trigger;
pub mod menu;
pub mod operator;
pub mod serve;
pub mod test_send;
pub mod validate;
pub mod view;

use crate::cli::{Cli, Commands};
use crate::error::SheethookError;

pub async fn dispatch(cli: Cli) -> Result<(), SheethookError> {
    match cli.command {
        Some(Commands::Serve(args)) => serve::execute(*args).await,
        Some(Commands::Config(ref args)) => view::execute(args).await,
        Some(Commands::Test(ref args)) => test_send::execute(args).await,
        Some(Commands::InstallTrigger(ref args)) => install_trigger::execute(args).await,
        Some(Commands::Menu(ref args)) => menu::execute(args).await,
        Some(Commands::Init(ref args)) => init::execute(args),
        Some(Commands::Validate(ref args)) => validate::execute(args),
        Some(Commands::Health(args)) => health::execute(args).await,
        None => {
            print_welcome();
            Ok(())
        }
    }
}

fn print_welcome() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        "\n  sheethook v{version}: spreadsheet form submissions to webhooks\n\n  \
         No command provided. To get started:\n\n    \
         sheethook init                          Generate a starter config\n    \
         sheethook install-trigger -w book.json  Register the form-submit trigger\n    \
         sheethook serve                         Start the endpoint (auto-detects ./sheethook.yaml)\n    \
         sheethook menu -w book.json             Operator menu\n    \
         sheethook --help                        See all commands and options\n"
    );
}
