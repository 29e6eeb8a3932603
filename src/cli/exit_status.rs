use std::process::ExitCode;

/// Process exit status.
///
/// - `Success` (0): nothing to report
/// - `Failure` (1): errors were reported, or a dry-run found calls to rewrite
/// - `Error` (2): the command could not run (bad config, unwritable output, ...)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
            ExitStatus::Error => 2,
        }
    }
}
