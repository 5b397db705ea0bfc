//! Wizards: the actors of the realm.
//!
//! A wizard pays mana for spells, receives magical effects and trades. Once
//! its HP reaches zero it is dead: it can no longer act, pay or earn, but it
//! can still be healed, stolen from and looted.

use crate::chooser::{choose_from, Chooser};
use crate::error::{MagicError, MagicResult};
use crate::items::{ItemId, MagicItem, Tradeable};
use crate::level::MagicLevel;
use crate::magic::{percent_of, MagicEffectRealization, MagicSource, Target};
use crate::spells::{Spell, SpellId};
use crate::trade::{self, Trader};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

/// Unique identifier for wizards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WizardId(pub Uuid);

impl WizardId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for WizardId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WizardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A wizard.
#[derive(Debug, Serialize, Deserialize)]
#[serde(try_from = "WizardRecord")]
pub struct Wizard {
    id: WizardId,
    name: String,
    level: MagicLevel,
    basic_hp: u32,
    hp: u32,
    basic_mp: u32,
    mp: u32,
    money: u32,
    known_spells: Vec<Spell>,
    protected_from: HashSet<SpellId>,
    carrying_capacity: u32,
    inventory: Vec<MagicItem>,
}

/// Serialized form of a [`Wizard`]; rebuilt through [`WizardBuilder`].
#[derive(Deserialize)]
struct WizardRecord {
    id: WizardId,
    name: String,
    level: MagicLevel,
    basic_hp: u32,
    hp: u32,
    basic_mp: u32,
    mp: u32,
    money: u32,
    known_spells: Vec<Spell>,
    protected_from: HashSet<SpellId>,
    carrying_capacity: u32,
    inventory: Vec<MagicItem>,
}

impl TryFrom<WizardRecord> for Wizard {
    type Error = MagicError;

    fn try_from(record: WizardRecord) -> MagicResult<Self> {
        let mut wizard = WizardBuilder::new(record.name, record.level)
            .basic_hp(record.basic_hp)
            .hp(record.hp)
            .basic_mp(record.basic_mp)
            .mp(record.mp)
            .money(record.money)
            .spells(record.known_spells)
            .carrying_capacity(record.carrying_capacity)
            .inventory(record.inventory)
            .build()?;
        wizard.id = record.id;
        wizard.protected_from = record.protected_from;
        Ok(wizard)
    }
}

/// Builder for [`Wizard`].
///
/// Unset stats default sensibly: `hp` to `basic_hp`, `basic_mp` to the
/// level's mana budget and `mp` to `basic_mp`.
#[derive(Debug)]
pub struct WizardBuilder {
    name: String,
    level: MagicLevel,
    basic_hp: u32,
    hp: Option<u32>,
    basic_mp: Option<u32>,
    mp: Option<u32>,
    money: u32,
    spells: Vec<Spell>,
    protected_from: Vec<Spell>,
    carrying_capacity: u32,
    inventory: Vec<MagicItem>,
}

impl WizardBuilder {
    pub fn new(name: impl Into<String>, level: MagicLevel) -> Self {
        Self {
            name: name.into(),
            level,
            basic_hp: 100,
            hp: None,
            basic_mp: None,
            mp: None,
            money: 0,
            spells: Vec::new(),
            protected_from: Vec::new(),
            carrying_capacity: 0,
            inventory: Vec::new(),
        }
    }

    pub fn basic_hp(mut self, basic_hp: u32) -> Self {
        self.basic_hp = basic_hp;
        self
    }

    pub fn hp(mut self, hp: u32) -> Self {
        self.hp = Some(hp);
        self
    }

    pub fn basic_mp(mut self, basic_mp: u32) -> Self {
        self.basic_mp = Some(basic_mp);
        self
    }

    pub fn mp(mut self, mp: u32) -> Self {
        self.mp = Some(mp);
        self
    }

    pub fn money(mut self, money: u32) -> Self {
        self.money = money;
        self
    }

    pub fn spells(mut self, spells: impl IntoIterator<Item = Spell>) -> Self {
        self.spells.extend(spells);
        self
    }

    /// Start out protected from these spells. Non-attacking spells are ignored.
    pub fn protected_from(mut self, spells: impl IntoIterator<Item = Spell>) -> Self {
        self.protected_from.extend(spells);
        self
    }

    pub fn carrying_capacity(mut self, capacity: u32) -> Self {
        self.carrying_capacity = capacity;
        self
    }

    pub fn inventory(mut self, items: impl IntoIterator<Item = MagicItem>) -> Self {
        self.inventory.extend(items);
        self
    }

    pub fn build(self) -> MagicResult<Wizard> {
        if self.name.is_empty() {
            return Err(MagicError::EmptyName { what: "Wizard" });
        }
        let required = self.level.to_mana();
        let basic_mp = self.basic_mp.unwrap_or(required);
        if basic_mp < required {
            return Err(MagicError::ManaBelowLevel { basic_mp, required });
        }
        let weight = self
            .inventory
            .iter()
            .try_fold(0u32, |total, item| total.checked_add(item.weight()));
        match weight {
            Some(weight) if weight <= self.carrying_capacity => {}
            weight => {
                return Err(MagicError::OverCapacity {
                    weight: weight.unwrap_or(u32::MAX),
                    capacity: self.carrying_capacity,
                })
            }
        }
        let mut seen = HashSet::with_capacity(self.inventory.len());
        if let Some(item) = self.inventory.iter().find(|i| !seen.insert(i.id())) {
            return Err(MagicError::DuplicateItem(item.id()));
        }

        let mut known_spells: Vec<Spell> = Vec::with_capacity(self.spells.len());
        for spell in self.spells {
            if !known_spells.contains(&spell) {
                known_spells.push(spell);
            }
        }

        let protected_from = self
            .protected_from
            .iter()
            .filter(|s| s.is_attacking())
            .map(|s| s.id())
            .collect();

        Ok(Wizard {
            id: WizardId::new(),
            name: self.name,
            level: self.level,
            basic_hp: self.basic_hp,
            hp: self.hp.unwrap_or(self.basic_hp),
            basic_mp,
            mp: self.mp.unwrap_or(basic_mp),
            money: self.money,
            known_spells,
            protected_from,
            carrying_capacity: self.carrying_capacity,
            inventory: self.inventory,
        })
    }
}

impl Wizard {
    pub fn builder(name: impl Into<String>, level: MagicLevel) -> WizardBuilder {
        WizardBuilder::new(name, level)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn id(&self) -> WizardId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> MagicLevel {
        self.level
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn basic_hp(&self) -> u32 {
        self.basic_hp
    }

    pub fn mp(&self) -> u32 {
        self.mp
    }

    pub fn basic_mp(&self) -> u32 {
        self.basic_mp
    }

    pub fn money(&self) -> u32 {
        self.money
    }

    pub fn carrying_capacity(&self) -> u32 {
        self.carrying_capacity
    }

    pub fn known_spells(&self) -> &[Spell] {
        &self.known_spells
    }

    pub fn knows(&self, spell: &Spell) -> bool {
        self.known_spells.contains(spell)
    }

    /// Look up a known spell by id.
    pub fn known_spell(&self, id: SpellId) -> Option<&Spell> {
        self.known_spells.iter().find(|s| s.id() == id)
    }

    pub fn is_protected_from(&self, spell: &Spell) -> bool {
        self.protected_from.contains(&spell.id())
    }

    pub fn inventory(&self) -> &[MagicItem] {
        &self.inventory
    }

    pub fn item(&self, id: ItemId) -> Option<&MagicItem> {
        self.inventory.iter().find(|i| i.id() == id)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut MagicItem> {
        self.inventory.iter_mut().find(|i| i.id() == id)
    }

    /// Total weight of everything carried.
    pub fn inventory_weight(&self) -> u32 {
        self.inventory.iter().map(|i| i.weight()).sum()
    }

    pub fn is_dead(&self) -> bool {
        self.hp == 0
    }

    // ========================================================================
    // Actions
    // ========================================================================

    /// Add a spell to the known spells. False if dead or already known.
    pub fn learn(&mut self, spell: Spell) -> bool {
        if self.is_dead() || self.knows(&spell) {
            return false;
        }
        tracing::debug!(wizard = %self.name, spell = %spell.name(), "spell learned");
        self.known_spells.push(spell);
        true
    }

    /// Remove a spell from the known spells. False if dead or not known.
    pub fn forget(&mut self, spell: &Spell) -> bool {
        if self.is_dead() {
            return false;
        }
        let Some(index) = self.known_spells.iter().position(|s| s == spell) else {
            return false;
        };
        self.known_spells.remove(index);
        true
    }

    /// Cast a known spell.
    ///
    /// Returns true once the cast is attempted, even if protection or a lack
    /// of mana then stops it. False if dead or the spell is unknown.
    pub fn cast_spell<'t>(&mut self, spell: &Spell, target: impl Into<Target<'t>>) -> bool {
        if self.is_dead() || !self.knows(spell) {
            return false;
        }
        let applied = match target.into() {
            Target::Myself => spell.cast_on_self(self),
            Target::Other(other) => spell.cast(self, other),
        };
        tracing::debug!(wizard = %self.name, spell = %spell.name(), applied, "spell cast");
        true
    }

    /// Cast a randomly chosen known spell. False if none is known.
    pub fn cast_random_spell<'t>(
        &mut self,
        target: impl Into<Target<'t>>,
        chooser: &mut dyn Chooser,
    ) -> bool {
        if self.is_dead() {
            return false;
        }
        let Some(spell) = choose_from(&self.known_spells, chooser).cloned() else {
            return false;
        };
        self.cast_spell(&spell, target)
    }

    /// Use an item from the inventory.
    ///
    /// Returns true once the item is used, even if it had no usages left.
    pub fn use_item<'t>(&mut self, id: ItemId, target: impl Into<Target<'t>>) -> bool {
        if self.is_dead() {
            return false;
        }
        let Some(index) = self.inventory.iter().position(|i| i.id() == id) else {
            return false;
        };
        let used = match target.into() {
            Target::Other(other) => self.inventory[index].use_on(other),
            Target::Myself => {
                let mut item = self.inventory.remove(index);
                let used = item.use_on(self);
                self.inventory.insert(index, item);
                used
            }
        };
        tracing::debug!(wizard = %self.name, item = %id, used, "item used");
        true
    }

    /// Use a randomly chosen item. False if the inventory is empty.
    pub fn use_random_item<'t>(
        &mut self,
        target: impl Into<Target<'t>>,
        chooser: &mut dyn Chooser,
    ) -> bool {
        if self.is_dead() {
            return false;
        }
        let Some(id) = choose_from(&self.inventory, chooser).map(|i| i.id()) else {
            return false;
        };
        self.use_item(id, target)
    }

    /// Sell an item to `buyer` at its price.
    pub fn sell_item(&mut self, id: ItemId, buyer: &mut dyn Trader) -> MagicResult<bool> {
        if self.is_dead() || !self.possesses(id) {
            return Ok(false);
        }
        trade::purchase(id, self, buyer)
    }

    /// Sell a randomly chosen item. False if the inventory is empty.
    pub fn sell_random_item(
        &mut self,
        buyer: &mut dyn Trader,
        chooser: &mut dyn Chooser,
    ) -> MagicResult<bool> {
        if self.is_dead() {
            return Ok(false);
        }
        let Some(id) = choose_from(&self.inventory, chooser).map(|i| i.id()) else {
            return Ok(false);
        };
        self.sell_item(id, buyer)
    }
}

impl MagicSource for Wizard {
    fn provide_mana(&mut self, level_needed: MagicLevel, amount: u32) -> bool {
        if self.is_dead() || self.level < level_needed || self.mp < amount {
            return false;
        }
        self.mp -= amount;
        true
    }
}

impl MagicEffectRealization for Wizard {
    fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
        if self.hp == 0 {
            tracing::debug!(wizard = %self.name, "wizard died");
        }
    }

    fn take_damage_percent(&mut self, percentage: u32) {
        self.take_damage(percent_of(self.basic_hp, percentage));
    }

    fn weaken_magic(&mut self, amount: u32) {
        self.mp = self.mp.saturating_sub(amount);
    }

    fn weaken_magic_percent(&mut self, percentage: u32) {
        self.weaken_magic(percent_of(self.basic_mp, percentage));
    }

    fn heal(&mut self, amount: u32) {
        self.hp = self.hp.saturating_add(amount);
    }

    fn heal_percent(&mut self, percentage: u32) {
        self.heal(percent_of(self.basic_hp, percentage));
    }

    fn enforce_magic(&mut self, amount: u32) {
        self.mp = self.mp.saturating_add(amount);
    }

    fn enforce_magic_percent(&mut self, percentage: u32) {
        self.enforce_magic(percent_of(self.basic_mp, percentage));
    }

    fn is_protected(&self, spell: &Spell) -> bool {
        spell.is_attacking() && self.protected_from.contains(&spell.id())
    }

    fn set_protection(&mut self, attacks: &[Spell]) {
        self.protected_from
            .extend(attacks.iter().filter(|s| s.is_attacking()).map(|s| s.id()));
    }

    fn remove_protection(&mut self, attacks: &[Spell]) {
        for spell in attacks.iter().filter(|s| s.is_attacking()) {
            self.protected_from.remove(&spell.id());
        }
    }
}

impl Trader for Wizard {
    fn trader_id(&self) -> WizardId {
        self.id
    }

    fn inventory_item(&self, id: ItemId) -> Option<&MagicItem> {
        self.item(id)
    }

    fn item_ids(&self) -> Vec<ItemId> {
        self.inventory.iter().map(|i| i.id()).collect()
    }

    fn can_afford(&self, amount: u32) -> bool {
        self.money >= amount
    }

    fn has_capacity(&self, weight: u32) -> bool {
        self.inventory_weight()
            .checked_add(weight)
            .is_some_and(|total| total <= self.carrying_capacity)
    }

    fn pay(&mut self, amount: u32) -> bool {
        if self.is_dead() || !self.can_afford(amount) {
            return false;
        }
        self.money -= amount;
        true
    }

    fn earn(&mut self, amount: u32) -> bool {
        if self.is_dead() {
            return false;
        }
        self.money = self.money.saturating_add(amount);
        true
    }

    fn add_to_inventory(&mut self, item: MagicItem) -> Result<(), MagicItem> {
        if self.possesses(item.id()) || !self.has_capacity(item.weight()) {
            return Err(item);
        }
        self.inventory.push(item);
        Ok(())
    }

    fn remove_from_inventory(&mut self, id: ItemId) -> Option<MagicItem> {
        let index = self.inventory.iter().position(|i| i.id() == id)?;
        Some(self.inventory.remove(index))
    }

    fn take_inventory(&mut self) -> Vec<MagicItem> {
        std::mem::take(&mut self.inventory)
    }

    fn can_steal(&self) -> bool {
        !self.is_dead()
    }

    fn is_lootable(&self) -> bool {
        self.is_dead()
    }

    fn can_loot(&self) -> bool {
        !self.is_dead()
    }
}

fn join<T: fmt::Display>(entries: &[T]) -> String {
    entries
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for Wizard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}({}): {}/{} {}/{}; {} {}; knows [{}]; carries [{}]]",
            self.name,
            self.level,
            self.hp,
            self.basic_hp,
            self.mp,
            self.basic_mp,
            self.money,
            if self.money == 1 { "Knut" } else { "Knuts" },
            join(&self.known_spells),
            join(&self.inventory)
        )
    }
}
