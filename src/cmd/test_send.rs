//! `sheethook test`: send a test payload for the active tab.
//!
//! Reads the workbook snapshot, builds a payload from the tab's last
//! data row, and asks for confirmation before sending it.

use crate::cli::TestArgs;
use crate::error::SheethookError;
use crate::logging::{self, LogOutput};
use crate::operator::notify::TerminalNotifier;
use crate::workbook::Workbook;

use super::operator::{load_config, run_test, transport};

pub async fn execute(args: &TestArgs) -> Result<(), SheethookError> {
    logging::init_from_args(&args.log, LogOutput::Stderr);

    let loaded = load_config(args.config.as_deref()).await?;
    let workbook = Workbook::load(&args.workbook).await?;
    let transport = transport(&loaded, args.timeout);

    run_test(
        &loaded,
        &workbook,
        args.tab.as_deref(),
        &TerminalNotifier::new(args.yes),
        transport.as_ref(),
    )
    .await?;
    Ok(())
}
