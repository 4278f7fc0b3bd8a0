//! `sheethook install-trigger`: register the form-submit trigger.
//!
//! Idempotent: earlier form-submit registrations for the workbook are
//! removed before the new one is created.

use crate::cli::InstallTriggerArgs;
use crate::error::SheethookError;
use crate::logging::{self, LogOutput};
use crate::operator::notify::TerminalNotifier;
use crate::operator::triggers::{install_form_submit_trigger, FileTriggerRegistry};
use crate::workbook::Workbook;

pub async fn execute(args: &InstallTriggerArgs) -> Result<(), SheethookError> {
    logging::init_from_args(&args.log, LogOutput::Stderr);

    let spreadsheet_id = match (&args.spreadsheet_id, &args.workbook) {
        (Some(id), _) => id.clone(),
        (None, Some(path)) => Workbook::load(path).await?.spreadsheet.id,
        (None, None) => {
            return Err(SheethookError::TriggerRegistry {
                message: "provide --workbook or --spreadsheet-id".into(),
            })
        }
    };

    let registry = FileTriggerRegistry::new(args.triggers.clone());
    install_form_submit_trigger(&registry, &spreadsheet_id, &TerminalNotifier::new(false)).await?;
    Ok(())
}
