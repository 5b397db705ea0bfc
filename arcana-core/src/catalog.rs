//! Standard spells and items.
//!
//! Standard spells are built once and shared, so every wizard that learns
//! "Diffindo" from the catalog knows the same spell and a protection against
//! it covers all of them. Standard items are handed out fresh on every call.

use crate::items::{ItemKind, MagicItem};
use crate::level::MagicLevel;
use crate::magic::Stat;
use crate::spells::Spell;

/// Get a standard spell by name.
pub fn get_spell(name: &str) -> Option<&'static Spell> {
    let name_lower = name.to_lowercase();
    SPELLS.iter().find(|s| s.name().to_lowercase() == name_lower)
}

/// Get a fresh copy of a standard item by name.
pub fn get_item(name: &str) -> Option<MagicItem> {
    let name_lower = name.to_lowercase();
    ITEMS
        .iter()
        .find(|t| t.name.to_lowercase() == name_lower)
        .and_then(ItemTemplate::instantiate)
}

/// Names of all standard spells.
pub fn spell_names() -> Vec<&'static str> {
    SPELLS.iter().map(|s| s.name()).collect()
}

/// Names of all standard items.
pub fn item_names() -> Vec<&'static str> {
    ITEMS.iter().map(|t| t.name).collect()
}

/// The recipe for a standard item.
#[derive(Debug, Clone)]
pub struct ItemTemplate {
    pub name: &'static str,
    pub usages: u32,
    pub price: u32,
    pub weight: u32,
    pub kind: ItemKind,
}

impl ItemTemplate {
    fn new(name: &'static str, usages: u32, price: u32, weight: u32, kind: ItemKind) -> Self {
        Self {
            name,
            usages,
            price,
            weight,
            kind,
        }
    }

    /// Build a new item with its own identity.
    pub fn instantiate(&self) -> Option<MagicItem> {
        MagicItem::new(
            self.name,
            self.usages,
            self.price,
            self.weight,
            self.kind.clone(),
        )
        .ok()
    }
}

fn attacking(name: &str, cost: u32, level: MagicLevel, stat: Stat, pct: bool, amount: u32) -> Option<Spell> {
    Spell::attacking(name, cost, level, stat, pct, amount).ok()
}

fn healing(name: &str, cost: u32, level: MagicLevel, stat: Stat, pct: bool, amount: u32) -> Option<Spell> {
    Spell::healing(name, cost, level, stat, pct, amount).ok()
}

fn spells_named(names: &[&str]) -> Vec<Spell> {
    names.iter().filter_map(|n| get_spell(n)).cloned().collect()
}

lazy_static::lazy_static! {
    /// Standard spells.
    pub static ref SPELLS: Vec<Spell> = [
        // Attacks
        attacking("Confringo", 10, MagicLevel::Noob, Stat::Hp, false, 20),
        attacking("Diffindo", 3, MagicLevel::Adept, Stat::Hp, false, 20),
        attacking("Expulso", 25, MagicLevel::Student, Stat::Hp, true, 30),
        attacking("Sectumsempra", 60, MagicLevel::Expert, Stat::Hp, true, 60),
        attacking("Obliviate", 15, MagicLevel::Adept, Stat::Mp, false, 40),
        attacking("Silencio", 40, MagicLevel::Student, Stat::Mp, true, 50),
        // Healing
        healing("Episkey", 5, MagicLevel::Noob, Stat::Hp, false, 20),
        healing("Vulnera Sanentur", 30, MagicLevel::Expert, Stat::Hp, true, 50),
        healing("Rennervate", 20, MagicLevel::Student, Stat::Mp, true, 25),
    ]
    .into_iter()
    .flatten()
    .collect();

    /// Standard items.
    pub static ref ITEMS: Vec<ItemTemplate> = vec![
        // Potions
        ItemTemplate::new("Wiggenweld Potion", 3, 10, 1, ItemKind::ManaPotion { amount: 15 }),
        ItemTemplate::new("Invigoration Draught", 1, 25, 1, ItemKind::ManaPotion { amount: 100 }),
        ItemTemplate::new("Essence of Dittany", 2, 12, 1, ItemKind::HealthPotion { amount: 25 }),
        // Concoctions
        ItemTemplate::new(
            "Draught of Living Death",
            1,
            40,
            2,
            ItemKind::Concoction { health: -50, mana: -50, spells: vec![] },
        ),
        ItemTemplate::new(
            "Felix Felicis",
            1,
            120,
            1,
            ItemKind::Concoction { health: 30, mana: 30, spells: spells_named(&["Episkey"]) },
        ),
        ItemTemplate::new(
            "Exploding Brew",
            1,
            35,
            3,
            ItemKind::Concoction { health: 0, mana: 0, spells: spells_named(&["Confringo", "Expulso"]) },
        ),
    ]
    .into_iter()
    .chain(
        ["Confringo", "Diffindo", "Episkey"]
            .iter()
            .filter_map(|name| get_spell(name))
            .map(|spell| {
                ItemTemplate::new(
                    scroll_name(spell.name()),
                    3,
                    30,
                    1,
                    ItemKind::Scroll { spell: spell.clone() },
                )
            }),
    )
    .collect();
}

fn scroll_name(spell: &str) -> &'static str {
    match spell {
        "Confringo" => "Scroll of Confringo",
        "Diffindo" => "Scroll of Diffindo",
        "Episkey" => "Scroll of Episkey",
        _ => "Scroll",
    }
}
