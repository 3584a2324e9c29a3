use std::process::ExitCode;

use augury_core::AuguryError;

/// How a command ended, mapped onto the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Abstain,
    /// Gate FAIL or an unrecoverable error.
    Failed,
}

impl Outcome {
    pub fn from_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<AuguryError>() {
            Some(e) if e.is_abstain() => Self::Abstain,
            _ => Self::Failed,
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::Abstain => ExitCode::from(2),
            Outcome::Failed => ExitCode::from(1),
        }
    }
}
