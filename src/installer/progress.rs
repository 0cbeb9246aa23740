//! Installation progress events consumed by the setup front-end.

/// One progress update: overall percentage plus a human-readable status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallProgress {
    /// Overall completion, 0-100. Non-decreasing across one run.
    pub percent: u8,
    pub message: String,
}

impl InstallProgress {
    pub fn new(percent: u8, message: impl Into<String>) -> Self {
        Self {
            percent: percent.min(100),
            message: message.into(),
        }
    }
}

/// Events emitted over the channel of a running installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallEvent {
    /// A step of the sequence completed.
    Progress(InstallProgress),
    /// A best-effort side task failed (dependency install, follow-up setup).
    /// Warnings never abort the run.
    Warning(String),
    /// The installation sequence is done. Emitted exactly once on success.
    Finished,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_is_clamped_to_100() {
        let progress = InstallProgress::new(250, "over");
        assert_eq!(progress.percent, 100);
    }
}
