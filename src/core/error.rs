//! Error infrastructure shared by every rules component.
//!
//! Most lookups in this crate treat absence as a legitimate answer (a
//! missing modifier is zero, a missing cost override means the base cost).
//! Errors are reserved for faults in the inputs themselves.

/// Severity level of an error.
///
/// - **Recoverable**: the caller may retry with different input
/// - **Validation**: invalid input, reject without retry
/// - **Internal**: unexpected state inconsistency
/// - **Fatal**: configuration or data is corrupt, cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Whether the error points at a bug or corrupt data.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common interface of the crate's error enums.
pub trait TacticsError: std::fmt::Display + std::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier of the error variant, for metrics and tests.
    fn error_code(&self) -> &'static str;
}

/// Faults in rule data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    /// A raw skill id that names no skill.
    #[error("Unknown skill id {0}")]
    UnknownSkill(u8),

    /// A known skill with no configuration entry.
    #[error("Missing configuration for skill {0}")]
    MissingSkillConfig(u8),
}

impl TacticsError for RulesError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RulesError::UnknownSkill(_) | RulesError::MissingSkillConfig(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RulesError::UnknownSkill(_) => "UNKNOWN_SKILL",
            RulesError::MissingSkillConfig(_) => "MISSING_SKILL_CONFIG",
        }
    }
}
