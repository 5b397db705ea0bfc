//! QA tests for casting, item use and death through the public API.
//!
//! Run with: `cargo test -p arcana-core --test qa_scenarios`

use arcana_core::testing::{assert_vitals, create_sample_wizard};
use arcana_core::{
    catalog, percent_of, Action, MagicEffectRealization, MagicItem, MagicLevel, MagicSource,
    Realm, RealmConfig, RngChooser, Spell, Stat, Target, Tradeable, Trader, Wizard,
};

fn wizard(name: &str, level: MagicLevel, hp: u32, mp: u32) -> Wizard {
    Wizard::builder(name, level)
        .basic_hp(hp)
        .mp(mp)
        .carrying_capacity(10)
        .build()
        .expect("valid wizard")
}

// =============================================================================
// Casting
// =============================================================================

#[test]
fn test_attack_clamps_hp_and_charges_caster() {
    let spell = Spell::attacking("Diffindo", 3, MagicLevel::Adept, Stat::Hp, false, 20).unwrap();
    let mut a = wizard("A", MagicLevel::Student, 10, 50);
    let mut b = wizard("B", MagicLevel::Student, 10, 50);
    assert!(a.learn(spell.clone()));

    assert!(a.cast_spell(&spell, &mut b));
    assert_eq!(b.hp(), 0);
    assert_eq!(a.mp(), 47);
    assert!(b.is_dead());
}

#[test]
fn test_percentage_and_absolute_paths_agree() {
    for pct in [0u32, 1, 17, 29, 50, 99, 100] {
        let mut by_pct = wizard("P", MagicLevel::Noob, 150, 50);
        let mut by_abs = wizard("Q", MagicLevel::Noob, 150, 50);
        by_pct.take_damage_percent(pct);
        by_abs.take_damage(percent_of(150, pct));
        assert_eq!(by_pct.hp(), by_abs.hp(), "pct {pct}");

        by_pct.weaken_magic_percent(pct);
        by_abs.weaken_magic(percent_of(50, pct));
        assert_eq!(by_pct.mp(), by_abs.mp(), "pct {pct}");
    }
}

#[test]
fn test_damage_never_goes_negative() {
    let mut w = wizard("W", MagicLevel::Noob, 10, 5);
    w.take_damage(u32::MAX);
    w.weaken_magic(6);
    assert_vitals(&w, 0, 0);
    w.take_damage_percent(100);
    assert_vitals(&w, 0, 0);
}

#[test]
fn test_protection_blocks_before_mana_is_spent() {
    let spell = catalog::get_spell("Confringo").unwrap().clone();
    let mut a = create_sample_wizard("Harry");
    a.learn(spell.clone());
    let mut b = create_sample_wizard("Draco");
    b.set_protection(std::slice::from_ref(&spell));

    let mp = a.mp();
    assert!(a.cast_spell(&spell, &mut b));
    assert_eq!(a.mp(), mp);
    assert_eq!(b.hp(), b.basic_hp());
}

#[test]
fn test_clone_of_spell_is_same_spell() {
    let spell = Spell::attacking("Expulso", 1, MagicLevel::Noob, Stat::Hp, false, 1).unwrap();
    let copy = spell.clone();
    let twin = Spell::attacking("Expulso", 1, MagicLevel::Noob, Stat::Hp, false, 1).unwrap();

    let mut w = create_sample_wizard("Luna");
    w.learn(spell.clone());
    w.set_protection(&[spell]);
    assert!(w.knows(&copy));
    assert!(w.is_protected(&copy));
    assert!(!w.knows(&twin));
    assert!(!w.is_protected(&twin));
    assert!(w.learn(twin));
}

// =============================================================================
// Items
// =============================================================================

#[test]
fn test_concoction_mixed_signs() {
    let brew = MagicItem::concoction("My Brew", 1, 1, 1, -5, 10, vec![]).unwrap();
    let id = brew.id();
    let mut user = Wizard::builder("User", MagicLevel::Noob)
        .carrying_capacity(5)
        .inventory([brew])
        .build()
        .unwrap();
    let mut target = wizard("Target", MagicLevel::Noob, 10, 0);

    assert!(user.use_item(id, &mut target));
    assert_vitals(&target, 5, 10);
    assert_eq!(user.item(id).map(|i| i.usages()), Some(0));
}

#[test]
fn test_scroll_is_blocked_but_potion_is_not() {
    let spell = Spell::attacking("Sectumsempra", 1, MagicLevel::Noob, Stat::Hp, false, 4).unwrap();
    let scroll = MagicItem::scroll("Scroll", 1, 1, 1, spell.clone()).unwrap();
    let acid = MagicItem::concoction("Acid", 1, 1, 1, -4, 0, vec![]).unwrap();
    let (scroll_id, acid_id) = (scroll.id(), acid.id());
    let mut user = Wizard::builder("User", MagicLevel::Noob)
        .carrying_capacity(5)
        .inventory([scroll, acid])
        .build()
        .unwrap();
    let mut target = wizard("Target", MagicLevel::Noob, 10, 0);
    target.set_protection(&[spell]);

    assert!(user.use_item(scroll_id, &mut target));
    assert_eq!(target.hp(), 10);
    assert!(user.use_item(acid_id, &mut target));
    assert_eq!(target.hp(), 6);
}

#[test]
fn test_use_item_on_self() {
    let potion = catalog::get_item("Essence of Dittany").unwrap();
    let id = potion.id();
    let mut w = Wizard::builder("Harry", MagicLevel::Noob)
        .basic_hp(100)
        .hp(10)
        .carrying_capacity(5)
        .inventory([potion])
        .build()
        .unwrap();

    assert!(w.use_item(id, Target::Myself));
    assert!(w.use_item(id, Target::Myself));
    assert_eq!(w.hp(), 60);
    // No usages left: still reported, nothing changes
    assert!(w.use_item(id, Target::Myself));
    assert_eq!(w.hp(), 60);
}

// =============================================================================
// Death
// =============================================================================

#[test]
fn test_dead_wizard_is_inert_but_healable() {
    let heal = Spell::healing("Episkey", 1, MagicLevel::Noob, Stat::Hp, false, 5).unwrap();
    let mut dead = wizard("Cedric", MagicLevel::Noob, 10, 50);
    dead.take_damage(10);
    assert!(dead.is_dead());

    assert!(!dead.learn(heal.clone()));
    assert!(!dead.provide_mana(MagicLevel::Noob, 0));
    assert!(!dead.pay(0));
    assert!(!dead.earn(5));
    assert_eq!(dead.mp(), 50);
    assert_eq!(dead.money(), 0);

    let mut healer = create_sample_wizard("Poppy");
    healer.learn(heal.clone());
    assert!(healer.cast_spell(&heal, &mut dead));
    assert_eq!(dead.hp(), 5);
    assert!(!dead.is_dead());
    assert!(dead.learn(heal));
}

// =============================================================================
// Realm
// =============================================================================

fn duel(seed: u64) -> Vec<(u32, u32)> {
    let mut realm = Realm::new(RealmConfig::new("Duel").with_seed(seed));
    let a = realm.add_wizard(create_sample_wizard("Harry"));
    let b = realm.add_wizard(create_sample_wizard("Draco"));
    for turn in 0..20 {
        let (caster, target) = if turn % 2 == 0 { (a, b) } else { (b, a) };
        realm
            .perform(Action::CastRandomSpell { caster, target })
            .expect("both wizards exist");
    }
    [a, b]
        .iter()
        .map(|id| {
            let w = realm.wizard(*id).expect("still in realm");
            (w.hp(), w.mp())
        })
        .collect()
}

#[test]
fn test_same_seed_same_duel() {
    assert_eq!(duel(1234), duel(1234));
}

#[test]
fn test_cast_random_spell_with_seeded_chooser() {
    let mut a = create_sample_wizard("Harry");
    let mut b = create_sample_wizard("Draco");
    let mut chooser = RngChooser::seeded(5);
    assert!(a.cast_random_spell(&mut b, &mut chooser));
    assert!(a.mp() < a.basic_mp());
}
