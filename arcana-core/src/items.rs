//! Tradeable magic items.
//!
//! Every item has a name, a number of remaining usages, a price and a weight.
//! Using an item spends one usage and then applies the item's effect. Items
//! apply their effects directly and so ignore protections, except for the
//! spells a scroll or concoction casts, which go through the normal casting
//! protocol with the item itself paying the (free) mana.
//!
//! `MagicItem` is deliberately not `Clone`: an item lives in exactly one
//! inventory and trading moves it.

use crate::error::{MagicError, MagicResult};
use crate::level::MagicLevel;
use crate::magic::{percent_of, MagicEffectRealization, MagicSource};
use crate::spells::Spell;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Something that can change hands and be used on a target.
pub trait Tradeable {
    fn id(&self) -> ItemId;

    fn price(&self) -> u32;

    fn weight(&self) -> u32;

    /// Use the item on `target`. Returns false if no usage was left.
    fn use_on(&mut self, target: &mut dyn MagicEffectRealization) -> bool;
}

/// The variant-specific part of an item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ItemKind {
    /// Restores a fixed amount of MP.
    ManaPotion { amount: u32 },
    /// Restores a fixed amount of HP.
    HealthPotion { amount: u32 },
    /// Casts its bound spell.
    Scroll { spell: Spell },
    /// Changes HP and MP by signed amounts, then casts its spells in order.
    Concoction {
        health: i32,
        mana: i32,
        spells: Vec<Spell>,
    },
}

/// A magic item.
#[derive(Debug, Serialize, Deserialize)]
#[serde(try_from = "ItemRecord")]
pub struct MagicItem {
    id: ItemId,
    name: String,
    usages: u32,
    price: u32,
    weight: u32,
    kind: ItemKind,
}

#[derive(Deserialize)]
struct ItemRecord {
    id: ItemId,
    name: String,
    usages: u32,
    price: u32,
    weight: u32,
    kind: ItemKind,
}

impl TryFrom<ItemRecord> for MagicItem {
    type Error = MagicError;

    fn try_from(record: ItemRecord) -> MagicResult<Self> {
        let mut item = MagicItem::new(
            record.name,
            record.usages,
            record.price,
            record.weight,
            record.kind,
        )?;
        item.id = record.id;
        Ok(item)
    }
}

impl MagicItem {
    /// Create an item of any kind.
    pub fn new(
        name: impl Into<String>,
        usages: u32,
        price: u32,
        weight: u32,
        kind: ItemKind,
    ) -> MagicResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(MagicError::EmptyName { what: "Item" });
        }
        if let ItemKind::Concoction {
            health: 0,
            mana: 0,
            spells,
        } = &kind
        {
            if spells.is_empty() {
                return Err(MagicError::InertConcoction);
            }
        }
        Ok(Self {
            id: ItemId::new(),
            name,
            usages,
            price,
            weight,
            kind,
        })
    }

    pub fn mana_potion(
        name: impl Into<String>,
        usages: u32,
        price: u32,
        weight: u32,
        amount: u32,
    ) -> MagicResult<Self> {
        Self::new(name, usages, price, weight, ItemKind::ManaPotion { amount })
    }

    pub fn health_potion(
        name: impl Into<String>,
        usages: u32,
        price: u32,
        weight: u32,
        amount: u32,
    ) -> MagicResult<Self> {
        Self::new(name, usages, price, weight, ItemKind::HealthPotion { amount })
    }

    pub fn scroll(
        name: impl Into<String>,
        usages: u32,
        price: u32,
        weight: u32,
        spell: Spell,
    ) -> MagicResult<Self> {
        Self::new(name, usages, price, weight, ItemKind::Scroll { spell })
    }

    /// Create a concoction. At least one of `health`, `mana` and `spells`
    /// must do something.
    pub fn concoction(
        name: impl Into<String>,
        usages: u32,
        price: u32,
        weight: u32,
        health: i32,
        mana: i32,
        spells: Vec<Spell>,
    ) -> MagicResult<Self> {
        Self::new(
            name,
            usages,
            price,
            weight,
            ItemKind::Concoction {
                health,
                mana,
                spells,
            },
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn usages(&self) -> u32 {
        self.usages
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    /// Potions are the consumables: mana and health potions and concoctions.
    pub fn is_potion(&self) -> bool {
        !matches!(self.kind, ItemKind::Scroll { .. })
    }

    /// Spend one usage if any is left.
    pub fn try_usage(&mut self) -> bool {
        if self.usages == 0 {
            return false;
        }
        self.usages -= 1;
        true
    }

    fn apply(&mut self, target: &mut dyn MagicEffectRealization) {
        match &self.kind {
            ItemKind::ManaPotion { amount } => target.enforce_magic(*amount),
            ItemKind::HealthPotion { amount } => target.heal(*amount),
            ItemKind::Scroll { spell } => {
                spell.cast(&mut FreeMana, target);
            }
            ItemKind::Concoction {
                health,
                mana,
                spells,
            } => {
                if *health > 0 {
                    target.heal(health.unsigned_abs());
                } else if *health < 0 {
                    target.take_damage(health.unsigned_abs());
                }
                if *mana > 0 {
                    target.enforce_magic(mana.unsigned_abs());
                } else if *mana < 0 {
                    target.weaken_magic(mana.unsigned_abs());
                }
                for spell in spells {
                    spell.cast(&mut FreeMana, target);
                }
            }
        }
    }
}

/// The mana an item pays for the spells it casts.
struct FreeMana;

impl MagicSource for FreeMana {
    fn provide_mana(&mut self, _level_needed: MagicLevel, _amount: u32) -> bool {
        true
    }
}

impl Tradeable for MagicItem {
    fn id(&self) -> ItemId {
        self.id
    }

    fn price(&self) -> u32 {
        self.price
    }

    fn weight(&self) -> u32 {
        self.weight
    }

    fn use_on(&mut self, target: &mut dyn MagicEffectRealization) -> bool {
        if !self.try_usage() {
            return false;
        }
        tracing::debug!(item = %self.name, usages_left = self.usages, "item used");
        self.apply(target);
        true
    }
}

impl MagicSource for MagicItem {
    fn provide_mana(&mut self, level_needed: MagicLevel, amount: u32) -> bool {
        FreeMana.provide_mana(level_needed, amount)
    }
}

impl MagicEffectRealization for MagicItem {
    /// Degrade the item: lose that percentage of the remaining usages.
    fn take_damage_percent(&mut self, percentage: u32) {
        let lost = percent_of(self.usages, percentage);
        self.usages = self.usages.saturating_sub(lost);
    }
}

fn plural<'a>(count: u32, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 {
        one
    } else {
        many
    }
}

fn signed(value: i32) -> String {
    if value > 0 {
        format!("+{value}")
    } else {
        value.to_string()
    }
}

impl fmt::Display for MagicItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}; {} g; {} {}; {} {}",
            self.name,
            self.weight,
            self.price,
            plural(self.price, "Knut", "Knuts"),
            self.usages,
            plural(self.usages, "use", "uses")
        )?;
        match &self.kind {
            ItemKind::ManaPotion { amount } => write!(f, "; +{amount} MP")?,
            ItemKind::HealthPotion { amount } => write!(f, "; +{amount} HP")?,
            ItemKind::Scroll { spell } => write!(f, "; casts {spell}")?,
            ItemKind::Concoction {
                health,
                mana,
                spells,
            } => {
                if *health != 0 {
                    write!(f, "; {} HP", signed(*health))?;
                }
                if *mana != 0 {
                    write!(f, "; {} MP", signed(*mana))?;
                }
                if !spells.is_empty() {
                    let listed: Vec<String> = spells.iter().map(|s| s.to_string()).collect();
                    write!(f, "; cast [{}]", listed.join(", "))?;
                }
            }
        }
        write!(f, "]")
    }
}
