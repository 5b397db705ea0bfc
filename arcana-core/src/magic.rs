//! Magic capabilities.
//!
//! Two traits describe what can take part in a magical effect:
//! - [`MagicSource`] supplies the mana a spell costs
//! - [`MagicEffectRealization`] receives the effect (damage, healing, mana
//!   changes and protection)
//!
//! Wizards implement both fully. Items implement both too, but as sources they
//! always grant mana and as targets they only react to percentage damage.

use crate::level::MagicLevel;
use crate::spells::Spell;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The attribute an effect changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    /// Health points.
    Hp,
    /// Mana points.
    Mp,
}

impl Stat {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Stat::Hp => "HP",
            Stat::Mp => "MP",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

/// Percentage of a base value, truncated only once the product is known.
///
/// `percent_of(10, 29)` is `2`: the intermediate `2.9` is kept as a float
/// and cut to an integer at the end.
pub fn percent_of(base: u32, percentage: u32) -> u32 {
    (base as f64 * (percentage as f64 / 100.0)) as u32
}

/// Something that can pay the mana for a spell.
pub trait MagicSource {
    /// Provide `amount` mana for an action that requires `level_needed`.
    ///
    /// Returns false without side effects when the source refuses.
    fn provide_mana(&mut self, level_needed: MagicLevel, amount: u32) -> bool;
}

/// Something a magical effect can be realized on.
///
/// Every method has a no-op default so that targets only override the
/// effects they actually react to. Percentage variants are expected to
/// convert with [`percent_of`] and delegate to the absolute variant.
pub trait MagicEffectRealization {
    /// Lose `amount` HP, never going below zero.
    fn take_damage(&mut self, _amount: u32) {}

    fn take_damage_percent(&mut self, _percentage: u32) {}

    /// Lose `amount` MP, never going below zero.
    fn weaken_magic(&mut self, _amount: u32) {}

    fn weaken_magic_percent(&mut self, _percentage: u32) {}

    /// Gain `amount` HP. There is no ceiling.
    fn heal(&mut self, _amount: u32) {}

    fn heal_percent(&mut self, _percentage: u32) {}

    /// Gain `amount` MP. There is no ceiling.
    fn enforce_magic(&mut self, _amount: u32) {}

    fn enforce_magic_percent(&mut self, _percentage: u32) {}

    /// Whether `spell` is blocked. Only attacking spells can ever be.
    fn is_protected(&self, _spell: &Spell) -> bool {
        false
    }

    /// Add protection against every attacking spell in `attacks`.
    fn set_protection(&mut self, _attacks: &[Spell]) {}

    /// Drop protection against every attacking spell in `attacks`.
    fn remove_protection(&mut self, _attacks: &[Spell]) {}
}

/// Who an action performed by a wizard lands on.
///
/// A wizard cannot lend out `&mut self` while also acting, so targeting
/// oneself is spelled out as its own variant.
pub enum Target<'a> {
    /// The acting wizard.
    Myself,
    /// Anyone or anything else.
    Other(&'a mut dyn MagicEffectRealization),
}

impl<'a, T: MagicEffectRealization> From<&'a mut T> for Target<'a> {
    fn from(target: &'a mut T) -> Self {
        Target::Other(target)
    }
}
