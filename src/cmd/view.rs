//! `sheethook config`: show the tab → webhook configuration.

use crate::cli::ViewArgs;
use crate::error::SheethookError;
use crate::logging::{self, LogOutput};
use crate::operator::notify::TerminalNotifier;
use crate::operator::view_configuration;

use super::operator::load_config;

pub async fn execute(args: &ViewArgs) -> Result<(), SheethookError> {
    logging::init_from_args(&args.log, LogOutput::Stderr);

    let loaded = load_config(args.config.as_deref()).await?;
    view_configuration(&loaded.config.webhooks, &TerminalNotifier::new(false));
    Ok(())
}
