use std::fmt;

use crate::domain::value_objects::remote_address::RemoteAddress;

/// A single git invocation performed while updating a remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteStep {
    /// `remote add <name> <url>`
    Add { name: String },

    /// `remote rename <from> <to>`
    Rename { from: String, to: String },

    /// `remote set-url <name> <url>`
    SetUrl { name: String },
}

impl fmt::Display for RemoteStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteStep::Add { name } => write!(f, "add {}", name),
            RemoteStep::Rename { from, to } => write!(f, "rename {} -> {}", from, to),
            RemoteStep::SetUrl { name } => write!(f, "set-url {}", name),
        }
    }
}

/// Outcome of one [`RemoteStep`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
    pub step: RemoteStep,
    pub success: bool,
    /// git's standard error, trimmed; empty on success
    pub message: String,
}

impl StepResult {
    pub fn new(step: RemoteStep, success: bool, message: impl Into<String>) -> Self {
        Self {
            step,
            success,
            message: message.into(),
        }
    }
}

/// Report of everything a remote update did, in execution order.
///
/// Steps are never rolled back: a failed step leaves the effects of the
/// earlier ones in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteUpdate {
    remote: RemoteAddress,
    steps: Vec<StepResult>,
}

impl RemoteUpdate {
    /// Start a report for the address being applied.
    pub fn new(remote: RemoteAddress) -> Self {
        Self {
            remote,
            steps: Vec::new(),
        }
    }

    pub fn record(&mut self, result: StepResult) {
        self.steps.push(result);
    }

    /// True when every recorded step succeeded.
    pub fn succeeded(&self) -> bool {
        self.steps.iter().all(|s| s.success)
    }

    pub fn failed_steps(&self) -> impl Iterator<Item = &StepResult> {
        self.steps.iter().filter(|s| !s.success)
    }

    pub fn steps(&self) -> &[StepResult] {
        &self.steps
    }

    /// The address the update applied.
    pub fn remote(&self) -> &RemoteAddress {
        &self.remote
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_steps_must_succeed() {
        let mut update = RemoteUpdate::new(RemoteAddress::from_name("upstream"));
        update.record(StepResult::new(
            RemoteStep::Rename {
                from: "origin".to_string(),
                to: "upstream".to_string(),
            },
            true,
            "",
        ));
        assert!(update.succeeded());

        update.record(StepResult::new(
            RemoteStep::SetUrl {
                name: "upstream".to_string(),
            },
            false,
            "error: No such remote 'upstream'",
        ));
        assert!(!update.succeeded());
        assert_eq!(update.steps().len(), 2);

        let failed: Vec<_> = update.failed_steps().collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].step.to_string(), "set-url upstream");
    }

    #[test]
    fn test_step_display() {
        let step = RemoteStep::Rename {
            from: "a".to_string(),
            to: "b".to_string(),
        };
        assert_eq!(step.to_string(), "rename a -> b");
        assert_eq!(
            RemoteStep::Add {
                name: "origin".to_string()
            }
            .to_string(),
            "add origin"
        );
    }
}
