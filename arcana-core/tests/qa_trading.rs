//! QA tests for giving, selling, stealing and looting.
//!
//! Run with: `cargo test -p arcana-core --test qa_trading`

use arcana_core::testing::{
    assert_carries, assert_not_carries, create_sample_corpse, create_sample_wizard, sample_potion,
};
use arcana_core::{
    give, purchase, Action, ItemId, MagicError, MagicItem, MagicLevel, Realm, RealmConfig,
    ScriptedChooser, Tradeable, Trader, Wizard, WizardId,
};

fn trader(name: &str, money: u32, capacity: u32) -> Wizard {
    Wizard::builder(name, MagicLevel::Noob)
        .money(money)
        .carrying_capacity(capacity)
        .build()
        .expect("valid wizard")
}

/// A market stall that accepts payment but whose goods are nailed down:
/// it reports items it cannot actually hand over.
struct NailedDownStall {
    inner: Wizard,
}

impl Trader for NailedDownStall {
    fn trader_id(&self) -> WizardId {
        self.inner.trader_id()
    }
    fn inventory_item(&self, id: ItemId) -> Option<&MagicItem> {
        self.inner.inventory_item(id)
    }
    fn item_ids(&self) -> Vec<ItemId> {
        self.inner.item_ids()
    }
    fn can_afford(&self, amount: u32) -> bool {
        self.inner.can_afford(amount)
    }
    fn has_capacity(&self, weight: u32) -> bool {
        self.inner.has_capacity(weight)
    }
    fn pay(&mut self, amount: u32) -> bool {
        self.inner.pay(amount)
    }
    fn earn(&mut self, amount: u32) -> bool {
        self.inner.earn(amount)
    }
    fn add_to_inventory(&mut self, item: MagicItem) -> Result<(), MagicItem> {
        self.inner.add_to_inventory(item)
    }
    fn remove_from_inventory(&mut self, _id: ItemId) -> Option<MagicItem> {
        None
    }
    fn take_inventory(&mut self) -> Vec<MagicItem> {
        Vec::new()
    }
    fn can_steal(&self) -> bool {
        false
    }
    fn is_lootable(&self) -> bool {
        false
    }
    fn can_loot(&self) -> bool {
        false
    }
}

// =============================================================================
// Giving and selling
// =============================================================================

#[test]
fn test_capacity_gates_every_insertion() {
    let mut w = trader("Hagrid", 0, 3);
    for _ in 0..3 {
        assert!(w.add_to_inventory(sample_potion()).is_ok());
    }
    assert!(!w.has_capacity(1));
    let rejected = w.add_to_inventory(sample_potion());
    assert!(rejected.is_err());
    assert_eq!(w.inventory_weight(), 3);
}

#[test]
fn test_give_between_wizards() {
    let potion = sample_potion();
    let id = potion.id();
    let mut giver = trader("Fred", 0, 5);
    giver.add_to_inventory(potion).unwrap();
    let mut taker = trader("George", 0, 5);

    assert!(give(id, &mut giver, &mut taker).unwrap());
    assert_not_carries(&giver, id);
    assert_carries(&taker, id);
}

#[test]
fn test_purchase_moves_money_and_item() {
    let potion = sample_potion();
    let id = potion.id();
    let price = potion.price();
    let mut seller = trader("Ollivander", 0, 5);
    seller.add_to_inventory(potion).unwrap();
    let mut buyer = trader("Harry", 50, 5);

    assert!(purchase(id, &mut seller, &mut buyer).unwrap());
    assert_eq!(seller.money(), price);
    assert_eq!(buyer.money(), 50 - price);
    assert_carries(&buyer, id);
}

#[test]
fn test_failed_purchase_leaves_everything() {
    let potion = sample_potion();
    let id = potion.id();
    let mut seller = trader("Ollivander", 0, 5);
    seller.add_to_inventory(potion).unwrap();

    let mut poor = trader("Ron", 1, 5);
    assert!(!purchase(id, &mut seller, &mut poor).unwrap());
    let mut full = trader("Crabbe", 50, 0);
    assert!(!purchase(id, &mut seller, &mut full).unwrap());

    assert_eq!(seller.money(), 0);
    assert_eq!(poor.money(), 1);
    assert_eq!(full.money(), 50);
    assert_carries(&seller, id);
}

#[test]
fn test_purchase_pays_even_if_item_cannot_be_removed() {
    let potion = sample_potion();
    let id = potion.id();
    let price = potion.price();
    let mut shopkeeper = trader("Borgin", 0, 5);
    shopkeeper.add_to_inventory(potion).unwrap();
    let mut stall = NailedDownStall { inner: shopkeeper };
    let mut buyer = trader("Draco", 50, 5);

    assert!(!purchase(id, &mut stall, &mut buyer).unwrap());
    assert_eq!(stall.inner.money(), price);
    assert_eq!(buyer.money(), 50 - price);
    assert_carries(&stall.inner, id);
    assert_not_carries(&buyer, id);
}

#[test]
fn test_self_trade_through_realm() {
    let mut realm = Realm::new(RealmConfig::default().with_seed(1));
    let potion = sample_potion();
    let item = potion.id();
    let id = realm.add_wizard(create_sample_wizard("Harry"));
    realm.wizard_mut(id).unwrap().add_to_inventory(potion).unwrap();

    let result = realm.perform(Action::Give {
        giver: id,
        item,
        taker: id,
    });
    assert!(matches!(result, Err(MagicError::SelfTrade)));
    assert_carries(realm.wizard(id).unwrap(), item);
}

// =============================================================================
// Stealing and looting
// =============================================================================

#[test]
fn test_steal_into_no_capacity_destroys_item() {
    let heavy = MagicItem::mana_potion("Cauldron Brew", 1, 1, 5, 10).unwrap();
    let id = heavy.id();
    let mut victim = trader("Neville", 0, 5);
    victim.add_to_inventory(heavy).unwrap();
    let mut thief = trader("Mundungus", 0, 0);

    assert!(!victim.steal(&mut thief, &mut ScriptedChooser::first()));
    assert_not_carries(&victim, id);
    assert_not_carries(&thief, id);
}

#[test]
fn test_steal_from_living_wizard() {
    let first = sample_potion();
    let second = sample_potion();
    let (first_id, second_id) = (first.id(), second.id());
    let mut victim = trader("Neville", 0, 5);
    victim.add_to_inventory(first).unwrap();
    victim.add_to_inventory(second).unwrap();
    let mut thief = trader("Mundungus", 0, 5);

    assert!(victim.steal(&mut thief, &mut ScriptedChooser::new([1])));
    assert_carries(&victim, first_id);
    assert_carries(&thief, second_id);
}

#[test]
fn test_loot_corpse_partially() {
    let light = sample_potion();
    let heavy = MagicItem::mana_potion("Cauldron Brew", 1, 1, 5, 10).unwrap();
    let (light_id, heavy_id) = (light.id(), heavy.id());
    let mut corpse = create_sample_corpse("Cedric", vec![light, heavy]);
    let mut looter = trader("Peter", 0, 2);

    assert!(corpse.loot(&mut looter));
    assert!(corpse.inventory().is_empty());
    assert_carries(&looter, light_id);
    assert_not_carries(&looter, heavy_id);
}

#[test]
fn test_dead_cannot_loot_living_cannot_be_looted() {
    let mut corpse = create_sample_corpse("Cedric", vec![sample_potion()]);
    let mut other_corpse = create_sample_corpse("Quirrell", vec![sample_potion()]);
    assert!(!corpse.loot(&mut other_corpse));
    assert_eq!(corpse.inventory().len(), 1);

    let mut living = trader("Harry", 0, 5);
    living.add_to_inventory(sample_potion()).unwrap();
    let mut looter = trader("Peter", 0, 5);
    assert!(!living.loot(&mut looter));
    assert_eq!(living.inventory().len(), 1);
}

#[test]
fn test_realm_steal_uses_realm_chooser() {
    let mut realm = Realm::with_chooser(RealmConfig::new("Knockturn"), ScriptedChooser::new([1]));
    let first = sample_potion();
    let second = sample_potion();
    let second_id = second.id();
    let victim = realm.add_wizard(create_sample_wizard("Neville"));
    let thief = realm.add_wizard(create_sample_wizard("Mundungus"));
    {
        let v = realm.wizard_mut(victim).unwrap();
        v.add_to_inventory(first).unwrap();
        v.add_to_inventory(second).unwrap();
    }
    assert!(realm.perform(Action::Steal { thief, victim }).unwrap());
    assert_carries(realm.wizard(thief).unwrap(), second_id);
}
