//! Typed failures signalled by the game rules
//!
//! None of these are fatal: the command boundary renders every variant as a
//! user-facing reply.

/// Errors raised by sheet management, dice resolution and experience rules
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// No record exists for the requested identity or entry
    #[error("{0} not found")]
    NotFound(String),

    /// A record already exists for the identity being created
    #[error("{0} already exists")]
    AlreadyExists(String),

    /// Attribute selector outside {strength, agility, cosmos, will}
    #[error("invalid attribute '{0}': use STR, AGI, COS or WIL")]
    InvalidAttribute(String),

    /// Rank name outside the patent table
    #[error(
        "invalid patent '{0}': use Aspirant, Bronze, Silver, Gold, Demigod or Divinity"
    )]
    InvalidPatent(String),

    /// A sheet invariant would be broken
    #[error("{0}")]
    ConstraintViolation(String),

    /// The character's rank does not allow the action
    #[error("{0}")]
    ForbiddenAction(String),

    /// A command argument is missing or malformed
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An aggregation found no eligible records
    #[error("{0}")]
    NoData(String),

    /// The command name is not recognised
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// The character store failed
    #[error("storage failure: {0}")]
    Storage(String),
}

impl EngineError {
    /// Stable machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::AlreadyExists(_) => "already_exists",
            Self::InvalidAttribute(_) => "invalid_attribute",
            Self::InvalidPatent(_) => "invalid_patent",
            Self::ConstraintViolation(_) => "constraint_violation",
            Self::ForbiddenAction(_) => "forbidden_action",
            Self::InvalidArgument(_) => "invalid_argument",
            Self::NoData(_) => "no_data",
            Self::UnknownCommand(_) => "unknown_command",
            Self::Storage(_) => "storage",
        }
    }
}
