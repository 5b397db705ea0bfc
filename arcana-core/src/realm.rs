//! The realm: a single-threaded simulation loop over a set of wizards.
//!
//! Wizards are owned by the realm and addressed by [`WizardId`]. Every
//! interaction is expressed as an [`Action`] and resolved by
//! [`Realm::perform`], which lends out the wizards involved and feeds random
//! picks from the realm's [`Chooser`].

use crate::chooser::Chooser;
use crate::config::RealmConfig;
use crate::error::{MagicError, MagicResult};
use crate::items::ItemId;
use crate::magic::Target;
use crate::spells::{Spell, SpellId};
use crate::trade::{self, Trader};
use crate::wizard::{Wizard, WizardId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Something a wizard does.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Action {
    Learn {
        wizard: WizardId,
        spell: Spell,
    },
    Forget {
        wizard: WizardId,
        spell: SpellId,
    },
    CastSpell {
        caster: WizardId,
        spell: SpellId,
        target: WizardId,
    },
    CastRandomSpell {
        caster: WizardId,
        target: WizardId,
    },
    UseItem {
        user: WizardId,
        item: ItemId,
        target: WizardId,
    },
    UseRandomItem {
        user: WizardId,
        target: WizardId,
    },
    SellItem {
        seller: WizardId,
        item: ItemId,
        buyer: WizardId,
    },
    SellRandomItem {
        seller: WizardId,
        buyer: WizardId,
    },
    Give {
        giver: WizardId,
        item: ItemId,
        taker: WizardId,
    },
    Steal {
        thief: WizardId,
        victim: WizardId,
    },
    Loot {
        looter: WizardId,
        victim: WizardId,
    },
}

impl Action {
    /// The wizard initiating the action.
    pub fn actor(&self) -> WizardId {
        match *self {
            Action::Learn { wizard, .. } | Action::Forget { wizard, .. } => wizard,
            Action::CastSpell { caster, .. } | Action::CastRandomSpell { caster, .. } => caster,
            Action::UseItem { user, .. } | Action::UseRandomItem { user, .. } => user,
            Action::SellItem { seller, .. } | Action::SellRandomItem { seller, .. } => seller,
            Action::Give { giver, .. } => giver,
            Action::Steal { thief, .. } => thief,
            Action::Loot { looter, .. } => looter,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::Learn { .. } => "learn",
            Action::Forget { .. } => "forget",
            Action::CastSpell { .. } => "cast spell",
            Action::CastRandomSpell { .. } => "cast random spell",
            Action::UseItem { .. } => "use item",
            Action::UseRandomItem { .. } => "use random item",
            Action::SellItem { .. } => "sell item",
            Action::SellRandomItem { .. } => "sell random item",
            Action::Give { .. } => "give",
            Action::Steal { .. } => "steal",
            Action::Loot { .. } => "loot",
        }
    }
}

/// A set of wizards and the source of their random choices.
pub struct Realm {
    config: RealmConfig,
    wizards: HashMap<WizardId, Wizard>,
    chooser: Box<dyn Chooser>,
}

impl Realm {
    pub fn new(config: RealmConfig) -> Self {
        let chooser = config.chooser();
        Self {
            config,
            wizards: HashMap::new(),
            chooser,
        }
    }

    /// A realm whose random picks come from `chooser` instead of the config.
    pub fn with_chooser(config: RealmConfig, chooser: impl Chooser + 'static) -> Self {
        Self {
            config,
            wizards: HashMap::new(),
            chooser: Box::new(chooser),
        }
    }

    pub fn config(&self) -> &RealmConfig {
        &self.config
    }

    pub fn add_wizard(&mut self, wizard: Wizard) -> WizardId {
        let id = wizard.id();
        tracing::debug!(realm = %self.config.name, wizard = %wizard.name(), "wizard joined");
        self.wizards.insert(id, wizard);
        id
    }

    pub fn remove_wizard(&mut self, id: WizardId) -> Option<Wizard> {
        self.wizards.remove(&id)
    }

    pub fn wizard(&self, id: WizardId) -> Option<&Wizard> {
        self.wizards.get(&id)
    }

    pub fn wizard_mut(&mut self, id: WizardId) -> Option<&mut Wizard> {
        self.wizards.get_mut(&id)
    }

    pub fn wizards(&self) -> impl Iterator<Item = &Wizard> {
        self.wizards.values()
    }

    /// Wizards that are still alive.
    pub fn living(&self) -> impl Iterator<Item = &Wizard> {
        self.wizards.values().filter(|w| !w.is_dead())
    }

    pub fn len(&self) -> usize {
        self.wizards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wizards.is_empty()
    }

    /// Resolve one action.
    ///
    /// `Ok(false)` means the action did not happen (dead actor, unknown spell,
    /// missing item, no money or room). Unknown wizards and trades of a
    /// wizard with itself are errors.
    pub fn perform(&mut self, action: Action) -> MagicResult<bool> {
        let name = action.name();
        let actor = action.actor();
        let result = self.resolve(action);
        match &result {
            Ok(happened) => {
                tracing::debug!(realm = %self.config.name, %actor, action = name, happened, "action resolved")
            }
            Err(e) => {
                tracing::debug!(realm = %self.config.name, %actor, action = name, error = %e, "action rejected")
            }
        }
        result
    }

    fn resolve(&mut self, action: Action) -> MagicResult<bool> {
        match action {
            Action::Learn { wizard, spell } => Ok(self.get_mut(wizard)?.learn(spell)),
            Action::Forget { wizard, spell } => {
                let wizard = self.get_mut(wizard)?;
                let Some(spell) = wizard.known_spell(spell).cloned() else {
                    return Ok(false);
                };
                Ok(wizard.forget(&spell))
            }
            Action::CastSpell {
                caster,
                spell,
                target,
            } => {
                if caster == target {
                    let wizard = self.get_mut(caster)?;
                    let Some(spell) = wizard.known_spell(spell).cloned() else {
                        return Ok(false);
                    };
                    return Ok(wizard.cast_spell(&spell, Target::Myself));
                }
                self.with_pair(caster, target, |caster, target, _| {
                    let Some(spell) = caster.known_spell(spell).cloned() else {
                        return Ok(false);
                    };
                    Ok(caster.cast_spell(&spell, target))
                })
            }
            Action::CastRandomSpell { caster, target } => {
                if caster == target {
                    let chooser = self.chooser.as_mut();
                    let wizard = self
                        .wizards
                        .get_mut(&caster)
                        .ok_or(MagicError::UnknownWizard(caster))?;
                    return Ok(wizard.cast_random_spell(Target::Myself, chooser));
                }
                self.with_pair(caster, target, |caster, target, chooser| {
                    Ok(caster.cast_random_spell(target, chooser))
                })
            }
            Action::UseItem { user, item, target } => {
                if user == target {
                    return Ok(self.get_mut(user)?.use_item(item, Target::Myself));
                }
                self.with_pair(user, target, |user, target, _| {
                    Ok(user.use_item(item, target))
                })
            }
            Action::UseRandomItem { user, target } => {
                if user == target {
                    let chooser = self.chooser.as_mut();
                    let wizard = self
                        .wizards
                        .get_mut(&user)
                        .ok_or(MagicError::UnknownWizard(user))?;
                    return Ok(wizard.use_random_item(Target::Myself, chooser));
                }
                self.with_pair(user, target, |user, target, chooser| {
                    Ok(user.use_random_item(target, chooser))
                })
            }
            Action::SellItem {
                seller,
                item,
                buyer,
            } => self.with_distinct_pair(seller, buyer, |seller, buyer, _| {
                seller.sell_item(item, buyer)
            }),
            Action::SellRandomItem { seller, buyer } => {
                self.with_distinct_pair(seller, buyer, |seller, buyer, chooser| {
                    seller.sell_random_item(buyer, chooser)
                })
            }
            Action::Give { giver, item, taker } => {
                self.with_distinct_pair(giver, taker, |giver, taker, _| {
                    trade::give(item, giver, taker)
                })
            }
            Action::Steal { thief, victim } => {
                self.with_distinct_pair(thief, victim, |thief, victim, chooser| {
                    Ok(victim.steal(thief, chooser))
                })
            }
            Action::Loot { looter, victim } => {
                self.with_distinct_pair(looter, victim, |looter, victim, _| {
                    Ok(victim.loot(looter))
                })
            }
        }
    }

    fn get_mut(&mut self, id: WizardId) -> MagicResult<&mut Wizard> {
        self.wizards
            .get_mut(&id)
            .ok_or(MagicError::UnknownWizard(id))
    }

    fn with_distinct_pair<F>(&mut self, first: WizardId, second: WizardId, f: F) -> MagicResult<bool>
    where
        F: FnOnce(&mut Wizard, &mut Wizard, &mut dyn Chooser) -> MagicResult<bool>,
    {
        for id in [first, second] {
            if !self.wizards.contains_key(&id) {
                return Err(MagicError::UnknownWizard(id));
            }
        }
        if first == second {
            return Err(MagicError::SelfTrade);
        }
        self.with_pair(first, second, f)
    }

    /// Lend out two different wizards at once.
    fn with_pair<F>(&mut self, first: WizardId, second: WizardId, f: F) -> MagicResult<bool>
    where
        F: FnOnce(&mut Wizard, &mut Wizard, &mut dyn Chooser) -> MagicResult<bool>,
    {
        if !self.wizards.contains_key(&second) {
            return Err(MagicError::UnknownWizard(second));
        }
        let mut lent = self
            .wizards
            .remove(&first)
            .ok_or(MagicError::UnknownWizard(first))?;
        let result = match self.wizards.get_mut(&second) {
            Some(other) => f(&mut lent, other, self.chooser.as_mut()),
            None => Err(MagicError::UnknownWizard(second)),
        };
        self.wizards.insert(first, lent);
        result
    }
}
