//! Testing utilities for the realm.
//!
//! This module provides tools for deterministic tests:
//! - `ScriptedChooser` replays fixed picks instead of rolling
//! - Sample wizards and items for building scenarios
//! - Assertion helpers for verifying wizard state

use crate::chooser::Chooser;
use crate::items::{ItemId, MagicItem, Tradeable};
use crate::level::MagicLevel;
use crate::magic::Stat;
use crate::spells::Spell;
use crate::trade::Trader;
use crate::wizard::Wizard;

/// A chooser that returns scripted picks.
///
/// Picks are returned in order and cycle once exhausted. Each pick is
/// reduced modulo the collection length so a script never goes out of range.
#[derive(Debug, Clone)]
pub struct ScriptedChooser {
    /// Scripted picks to return in order.
    picks: Vec<usize>,
    /// Index of next pick to return.
    pick_index: usize,
}

impl ScriptedChooser {
    pub fn new(picks: impl IntoIterator<Item = usize>) -> Self {
        Self {
            picks: picks.into_iter().collect(),
            pick_index: 0,
        }
    }

    /// Always pick the first element.
    pub fn first() -> Self {
        Self::new([0])
    }

    /// Append a pick to the end of the script.
    pub fn queue_pick(&mut self, pick: usize) {
        self.picks.push(pick);
    }

    /// Number of picks made so far.
    pub fn picks_made(&self) -> usize {
        self.pick_index
    }

    /// Start over from the first pick.
    pub fn reset(&mut self) {
        self.pick_index = 0;
    }
}

impl Chooser for ScriptedChooser {
    fn choose(&mut self, len: usize) -> usize {
        if self.picks.is_empty() || len == 0 {
            return 0;
        }
        let pick = self.picks[self.pick_index % self.picks.len()];
        self.pick_index += 1;
        pick % len
    }
}

// ============================================================================
// Sample fixtures
// ============================================================================

/// A healthy student with some money and room to carry things.
pub fn create_sample_wizard(name: &str) -> Wizard {
    let spells = [
        Spell::attacking("Diffindo", 3, MagicLevel::Adept, Stat::Hp, false, 20),
        Spell::healing("Episkey", 5, MagicLevel::Noob, Stat::Hp, true, 20),
    ];
    Wizard::builder(name, MagicLevel::Student)
        .basic_hp(100)
        .money(100)
        .carrying_capacity(20)
        .spells(spells.into_iter().flatten())
        .build()
        .unwrap_or_else(|e| panic!("sample wizard {name}: {e}"))
}

/// A wizard with no HP left, carrying the given items.
pub fn create_sample_corpse(name: &str, items: Vec<MagicItem>) -> Wizard {
    let capacity = items.iter().map(Tradeable::weight).sum();
    Wizard::builder(name, MagicLevel::Noob)
        .hp(0)
        .carrying_capacity(capacity)
        .inventory(items)
        .build()
        .unwrap_or_else(|e| panic!("sample corpse {name}: {e}"))
}

/// A light, cheap mana potion.
pub fn sample_potion() -> MagicItem {
    MagicItem::mana_potion("Wiggenweld Potion", 3, 10, 1, 15)
        .unwrap_or_else(|e| panic!("sample potion: {e}"))
}

// ============================================================================
// Assertion helpers
// ============================================================================

/// Assert that a wizard holds an item.
pub fn assert_carries(wizard: &Wizard, id: ItemId) {
    assert!(
        wizard.possesses(id),
        "Expected {} to carry item {id}",
        wizard.name()
    );
}

/// Assert that a wizard does not hold an item.
pub fn assert_not_carries(wizard: &Wizard, id: ItemId) {
    assert!(
        !wizard.possesses(id),
        "Expected {} not to carry item {id}",
        wizard.name()
    );
}

/// Assert a wizard's current HP and MP.
pub fn assert_vitals(wizard: &Wizard, hp: u32, mp: u32) {
    assert_eq!(
        (wizard.hp(), wizard.mp()),
        (hp, mp),
        "Unexpected vitals for {}",
        wizard.name()
    );
}
