use thiserror::Error;

/// Failures raised while building a roster or distributing it.
///
/// Both engine variants signal a broken upstream invariant rather than
/// something the user can fix by retrying: the random source cannot change
/// capacity arithmetic.
#[derive(Error, Debug)]
pub enum MixError {
    #[error("Precondition violated: {0}")]
    PreconditionViolation(String),

    #[error("Anchorage {anchorage} ({size} players) fits on neither team")]
    InfeasibleAnchorage { anchorage: u32, size: usize },

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

impl MixError {
    /// Engine failures end the program; configuration errors come from
    /// caller-supplied text and can be reported back.
    pub fn is_fatal(&self) -> bool {
        match self {
            MixError::PreconditionViolation(_) => true,
            MixError::InfeasibleAnchorage { .. } => true,
            MixError::Config(_) => false,
        }
    }

    pub(crate) fn precondition(msg: impl Into<String>) -> Self {
        MixError::PreconditionViolation(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, MixError>;
