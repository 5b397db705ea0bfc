//! Trading between inventories.
//!
//! A [`Trader`] holds items and money. Moving an item is always two steps
//! (remove from one side, add to the other) and the steps are not rolled
//! back: when the receiving side has no room the item is simply gone. The
//! same holds for money in [`purchase`], which moves before the item does.

use crate::chooser::{choose_from, Chooser};
use crate::error::{MagicError, MagicResult};
use crate::items::{ItemId, MagicItem, Tradeable};
use crate::wizard::WizardId;

/// Something that owns an inventory and a purse.
pub trait Trader {
    fn trader_id(&self) -> WizardId;

    fn inventory_item(&self, id: ItemId) -> Option<&MagicItem>;

    /// Ids of all held items, in inventory order.
    fn item_ids(&self) -> Vec<ItemId>;

    fn possesses(&self, id: ItemId) -> bool {
        self.inventory_item(id).is_some()
    }

    fn can_afford(&self, amount: u32) -> bool;

    /// True if `weight` more would still fit.
    fn has_capacity(&self, weight: u32) -> bool;

    fn pay(&mut self, amount: u32) -> bool;

    fn earn(&mut self, amount: u32) -> bool;

    /// Store `item`, or hand it back if it would not fit.
    fn add_to_inventory(&mut self, item: MagicItem) -> Result<(), MagicItem>;

    fn remove_from_inventory(&mut self, id: ItemId) -> Option<MagicItem>;

    /// Empty the whole inventory.
    fn take_inventory(&mut self) -> Vec<MagicItem>;

    fn can_steal(&self) -> bool;

    fn is_lootable(&self) -> bool;

    fn can_loot(&self) -> bool;

    /// Let `thief` take one random item.
    ///
    /// If the thief cannot carry it the item vanishes and the result is false.
    fn steal(&mut self, thief: &mut dyn Trader, chooser: &mut dyn Chooser) -> bool {
        if !thief.can_steal() {
            return false;
        }
        let ids = self.item_ids();
        let Some(id) = choose_from(&ids, chooser).copied() else {
            return false;
        };
        let Some(item) = self.remove_from_inventory(id) else {
            return false;
        };
        match thief.add_to_inventory(item) {
            Ok(()) => {
                tracing::debug!(item = %id, "item stolen");
                true
            }
            Err(lost) => {
                tracing::warn!(item = %lost.name(), "stolen item vanished, thief lacks capacity");
                false
            }
        }
    }

    /// Let `looter` take everything.
    ///
    /// Items that do not fit vanish. The inventory ends up empty either way.
    /// True if at least one item changed hands.
    fn loot(&mut self, looter: &mut dyn Trader) -> bool {
        if !looter.can_loot() || !self.is_lootable() {
            return false;
        }
        let mut moved = false;
        for item in self.take_inventory() {
            match looter.add_to_inventory(item) {
                Ok(()) => moved = true,
                Err(lost) => {
                    tracing::warn!(item = %lost.name(), "looted item vanished, looter lacks capacity")
                }
            }
        }
        tracing::debug!(moved, "inventory looted");
        moved
    }
}

fn ensure_distinct(a: &dyn Trader, b: &dyn Trader) -> MagicResult<()> {
    if a.trader_id() == b.trader_id() {
        return Err(MagicError::SelfTrade);
    }
    Ok(())
}

fn transfer(id: ItemId, from: &mut dyn Trader, to: &mut dyn Trader) -> bool {
    let Some(item) = from.remove_from_inventory(id) else {
        return false;
    };
    match to.add_to_inventory(item) {
        Ok(()) => true,
        Err(lost) => {
            tracing::warn!(item = %lost.name(), "transferred item vanished, receiver lacks capacity");
            false
        }
    }
}

/// Hand item `id` from `giver` to `taker` for free.
///
/// `Ok(false)` if the giver does not hold it or the taker cannot carry it.
pub fn give(id: ItemId, giver: &mut dyn Trader, taker: &mut dyn Trader) -> MagicResult<bool> {
    ensure_distinct(giver, taker)?;
    let Some(weight) = giver.inventory_item(id).map(|item| item.weight()) else {
        return Ok(false);
    };
    if !taker.has_capacity(weight) {
        return Ok(false);
    }
    let given = transfer(id, giver, taker);
    if given {
        tracing::debug!(item = %id, "item given");
    }
    Ok(given)
}

/// Sell item `id` from `seller` to `buyer` at the item's price.
///
/// Money changes hands before the item does.
pub fn purchase(id: ItemId, seller: &mut dyn Trader, buyer: &mut dyn Trader) -> MagicResult<bool> {
    ensure_distinct(seller, buyer)?;
    let Some((price, weight)) = seller
        .inventory_item(id)
        .map(|item| (item.price(), item.weight()))
    else {
        return Ok(false);
    };
    if !buyer.has_capacity(weight) || !buyer.can_afford(price) {
        return Ok(false);
    }
    seller.earn(price);
    buyer.pay(price);
    let sold = transfer(id, seller, buyer);
    if sold {
        tracing::debug!(item = %id, price, "item sold");
    }
    Ok(sold)
}
