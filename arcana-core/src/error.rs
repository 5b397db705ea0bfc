//! Contract violations.
//!
//! Anything that can merely "not happen" (too little mana, money or room,
//! a dead actor, an unknown spell) is reported as a plain `false`. The errors
//! here are reserved for arguments that break an invariant, so a caller that
//! receives one has a bug rather than an unlucky turn.

use crate::items::ItemId;
use crate::wizard::WizardId;
use thiserror::Error;

/// Error type for invalid construction arguments and illegal operations.
#[derive(Debug, Error)]
pub enum MagicError {
    #[error("{what} name must not be empty")]
    EmptyName { what: &'static str },

    #[error("Percentage must be between 0 and 100, got {0}")]
    PercentageOutOfRange(u32),

    #[error("A concoction must have at least one effect")]
    InertConcoction,

    #[error("Basic mana {basic_mp} is below the {required} required by the magic level")]
    ManaBelowLevel { basic_mp: u32, required: u32 },

    #[error("Inventory weight {weight} exceeds carrying capacity {capacity}")]
    OverCapacity { weight: u32, capacity: u32 },

    #[error("Item {0} appears more than once in one inventory")]
    DuplicateItem(ItemId),

    #[error("A trader cannot trade with itself")]
    SelfTrade,

    #[error("Unknown wizard: {0}")]
    UnknownWizard(WizardId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used by constructors and trading.
pub type MagicResult<T> = Result<T, MagicError>;
