//! Unified error types surfaced by the runtime API.
//!
//! Every administrative call reports failure through [`RuntimeError`]; its
//! `Display` output is the message shown to whoever issued the command.
use game_core::{ErrorSeverity, GameError, ModifierKind, RegistryError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("no reserved slot named `{0}`")]
    UnknownSlot(String),

    #[error("reserved slot `{0}` is already registered")]
    DuplicateSlot(String),

    #[error("{0} modifiers carry no selection weight")]
    Unweighted(ModifierKind),

    #[error("forced skill list is empty")]
    EmptySkillList,

    #[error("runtime requires an engine handle before building")]
    MissingEngine,
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Registry(err) => err.severity(),
            Self::UnknownSlot(_) | Self::Unweighted(_) | Self::EmptySkillList => {
                ErrorSeverity::Validation
            }
            Self::DuplicateSlot(_) | Self::MissingEngine => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Registry(err) => err.error_code(),
            Self::UnknownSlot(_) => "UNKNOWN_SLOT",
            Self::DuplicateSlot(_) => "DUPLICATE_SLOT",
            Self::Unweighted(_) => "UNWEIGHTED_KIND",
            Self::EmptySkillList => "EMPTY_SKILL_LIST",
            Self::MissingEngine => "MISSING_ENGINE",
        }
    }
}
