//! Sales Config

use clap::Args;
use stockroom_app::domain::sales::FailurePolicy;

/// Sale toggle settings.
#[derive(Debug, Args)]
pub(crate) struct SalesConfig {
    /// Restore an item's previous state when its save fails
    #[arg(long, env = "STOCKROOM_REVERT_ON_FAILURE", default_value_t = false)]
    pub revert_on_failure: bool,
}

impl SalesConfig {
    pub(crate) fn failure_policy(&self) -> FailurePolicy {
        if self.revert_on_failure {
            FailurePolicy::Revert
        } else {
            FailurePolicy::KeepLocal
        }
    }
}
