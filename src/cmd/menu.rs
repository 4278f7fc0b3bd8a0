//! `sheethook menu`: interactive menu of operator actions.
//!
//! Offers the same three actions as the workbook menu and loops until
//! the operator quits. A failing action is reported and the menu stays
//! open.

use console::style;
use dialoguer::Select;

use crate::cli::MenuArgs;
use crate::error::SheethookError;
use crate::logging::{self, LogOutput};
use crate::operator::notify::TerminalNotifier;
use crate::operator::triggers::{install_form_submit_trigger, FileTriggerRegistry};
use crate::operator::view_configuration;
use crate::workbook::Workbook;

use super::operator::{load_config, run_test, transport};

const ITEMS: &[&str] = &[
    "1. View webhook configuration",
    "2. Check & send a test for the current tab",
    "3. Set up the form-submit trigger (important)",
    "Quit",
];

pub async fn execute(args: &MenuArgs) -> Result<(), SheethookError> {
    logging::init_from_args(&args.log, LogOutput::Stderr);

    if !console::Term::stdout().is_term() {
        return Err(SheethookError::Io(std::io::Error::other(
            "the menu requires a terminal (TTY). Use the config, test or install-trigger commands instead.",
        )));
    }

    println!(
        "\n  {} Webhook Setup\n  {}\n",
        style("sheethook").cyan().bold(),
        style("─────────────────────────").dim()
    );

    let notifier = TerminalNotifier::new(false);

    loop {
        let choice = Select::new()
            .with_prompt("Action")
            .items(ITEMS)
            .default(0)
            .interact_opt()
            .map_err(|e| SheethookError::Io(std::io::Error::other(e.to_string())))?;

        let result = match choice {
            Some(0) => view(args, &notifier).await,
            Some(1) => test(args, &notifier).await,
            Some(2) => install(args, &notifier).await,
            _ => return Ok(()),
        };

        if let Err(e) = result {
            eprintln!("\n  {} {e}\n", style("✗").red().bold());
        }
    }
}

async fn view(args: &MenuArgs, notifier: &TerminalNotifier) -> Result<(), SheethookError> {
    let loaded = load_config(args.config.as_deref()).await?;
    view_configuration(&loaded.config.webhooks, notifier);
    Ok(())
}

async fn test(args: &MenuArgs, notifier: &TerminalNotifier) -> Result<(), SheethookError> {
    let loaded = load_config(args.config.as_deref()).await?;
    let workbook = Workbook::load(&args.workbook).await?;
    let transport = transport(&loaded, args.timeout);
    run_test(
        &loaded,
        &workbook,
        args.tab.as_deref(),
        notifier,
        transport.as_ref(),
    )
    .await?;
    Ok(())
}

async fn install(args: &MenuArgs, notifier: &TerminalNotifier) -> Result<(), SheethookError> {
    let workbook = Workbook::load(&args.workbook).await?;
    let registry = FileTriggerRegistry::new(args.triggers.clone());
    install_form_submit_trigger(&registry, &workbook.spreadsheet.id, notifier).await?;
    Ok(())
}
