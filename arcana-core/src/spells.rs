//! Spells and the casting protocol.
//!
//! A spell is created once and then shared: wizards keep it in their set of
//! known spells, scrolls and concoctions bind it, and protections refer to it.
//! Equality is identity, carried by a [`SpellId`], so two spells with the same
//! name and numbers are still different spells.

use crate::error::{MagicError, MagicResult};
use crate::level::MagicLevel;
use crate::magic::{MagicEffectRealization, MagicSource, Stat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// Unique identifier for spells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpellId(pub Uuid);

impl SpellId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SpellId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SpellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a spell does once its mana has been paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpellEffect {
    /// Damage HP or drain MP.
    Attacking {
        stat: Stat,
        percentage: bool,
        amount: u32,
    },
    /// Heal HP or restore MP.
    Healing {
        stat: Stat,
        percentage: bool,
        amount: u32,
    },
}

impl SpellEffect {
    fn amount(&self) -> (Stat, bool, u32) {
        match *self {
            SpellEffect::Attacking {
                stat,
                percentage,
                amount,
            }
            | SpellEffect::Healing {
                stat,
                percentage,
                amount,
            } => (stat, percentage, amount),
        }
    }

    /// Apply the effect to a target.
    pub fn apply(&self, target: &mut dyn MagicEffectRealization) {
        match *self {
            SpellEffect::Attacking {
                stat: Stat::Hp,
                percentage,
                amount,
            } => {
                if percentage {
                    target.take_damage_percent(amount)
                } else {
                    target.take_damage(amount)
                }
            }
            SpellEffect::Attacking {
                stat: Stat::Mp,
                percentage,
                amount,
            } => {
                if percentage {
                    target.weaken_magic_percent(amount)
                } else {
                    target.weaken_magic(amount)
                }
            }
            SpellEffect::Healing {
                stat: Stat::Hp,
                percentage,
                amount,
            } => {
                if percentage {
                    target.heal_percent(amount)
                } else {
                    target.heal(amount)
                }
            }
            SpellEffect::Healing {
                stat: Stat::Mp,
                percentage,
                amount,
            } => {
                if percentage {
                    target.enforce_magic_percent(amount)
                } else {
                    target.enforce_magic(amount)
                }
            }
        }
    }
}

/// A castable spell.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SpellRecord")]
pub struct Spell {
    id: SpellId,
    name: String,
    mana_cost: u32,
    level_needed: MagicLevel,
    effect: SpellEffect,
}

/// Serialized form of a [`Spell`], validated on the way back in.
#[derive(Deserialize)]
struct SpellRecord {
    id: SpellId,
    name: String,
    mana_cost: u32,
    level_needed: MagicLevel,
    effect: SpellEffect,
}

impl TryFrom<SpellRecord> for Spell {
    type Error = MagicError;

    fn try_from(record: SpellRecord) -> MagicResult<Self> {
        let mut spell = Spell::new(
            record.name,
            record.mana_cost,
            record.level_needed,
            record.effect,
        )?;
        spell.id = record.id;
        Ok(spell)
    }
}

impl PartialEq for Spell {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Spell {}

impl Hash for Spell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Spell {
    /// Create a spell with an arbitrary effect.
    ///
    /// Fails when the name is empty or a percentage exceeds 100.
    pub fn new(
        name: impl Into<String>,
        mana_cost: u32,
        level_needed: MagicLevel,
        effect: SpellEffect,
    ) -> MagicResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(MagicError::EmptyName { what: "Spell" });
        }
        let (_, percentage, amount) = effect.amount();
        if percentage && amount > 100 {
            return Err(MagicError::PercentageOutOfRange(amount));
        }
        Ok(Self {
            id: SpellId::new(),
            name,
            mana_cost,
            level_needed,
            effect,
        })
    }

    /// Create a spell that damages HP or drains MP.
    pub fn attacking(
        name: impl Into<String>,
        mana_cost: u32,
        level_needed: MagicLevel,
        stat: Stat,
        percentage: bool,
        amount: u32,
    ) -> MagicResult<Self> {
        Self::new(
            name,
            mana_cost,
            level_needed,
            SpellEffect::Attacking {
                stat,
                percentage,
                amount,
            },
        )
    }

    /// Create a spell that heals HP or restores MP.
    pub fn healing(
        name: impl Into<String>,
        mana_cost: u32,
        level_needed: MagicLevel,
        stat: Stat,
        percentage: bool,
        amount: u32,
    ) -> MagicResult<Self> {
        Self::new(
            name,
            mana_cost,
            level_needed,
            SpellEffect::Healing {
                stat,
                percentage,
                amount,
            },
        )
    }

    pub fn id(&self) -> SpellId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mana_cost(&self) -> u32 {
        self.mana_cost
    }

    pub fn level_needed(&self) -> MagicLevel {
        self.level_needed
    }

    pub fn effect(&self) -> &SpellEffect {
        &self.effect
    }

    pub fn is_attacking(&self) -> bool {
        matches!(self.effect, SpellEffect::Attacking { .. })
    }

    /// Cast from `source` onto `target`.
    ///
    /// A protected target stops the spell before any mana is requested. A
    /// source that refuses the mana stops it before any effect. Returns true
    /// if the effect was applied.
    pub fn cast(
        &self,
        source: &mut dyn MagicSource,
        target: &mut dyn MagicEffectRealization,
    ) -> bool {
        if target.is_protected(self) {
            tracing::debug!(spell = %self.name, "spell blocked by protection");
            return false;
        }
        if !source.provide_mana(self.level_needed, self.mana_cost) {
            tracing::trace!(spell = %self.name, cost = self.mana_cost, "mana refused");
            return false;
        }
        self.effect.apply(target);
        true
    }

    /// Cast with the same object paying and receiving.
    pub fn cast_on_self<T>(&self, caster: &mut T) -> bool
    where
        T: MagicSource + MagicEffectRealization,
    {
        if caster.is_protected(self) {
            tracing::debug!(spell = %self.name, "spell blocked by protection");
            return false;
        }
        if !caster.provide_mana(self.level_needed, self.mana_cost) {
            tracing::trace!(spell = %self.name, cost = self.mana_cost, "mana refused");
            return false;
        }
        self.effect.apply(caster);
        true
    }
}

impl fmt::Display for Spell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (stat, percentage, amount) = self.effect.amount();
        let sign = if self.is_attacking() { '-' } else { '+' };
        write!(
            f,
            "[{}({}): {} mana; {}{}{} {}]",
            self.name,
            self.level_needed,
            self.mana_cost,
            sign,
            amount,
            if percentage { " %" } else { "" },
            stat
        )
    }
}
