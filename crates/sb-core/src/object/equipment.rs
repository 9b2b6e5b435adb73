//! Equipment slots and stat modifiers
//!
//! Items carry signed stat deltas. Equipping reverses whatever already sits in
//! the slot before applying the new item. Each slot remembers the change its
//! item actually made, so a penalty that was clamped is undone exactly.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::BattleError;
use crate::stats::{Stat, Stats};

/// Where an item is worn
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Accessory,
}

/// A wearable item
///
/// The slot is kept as text because items come from data files; it is
/// validated when the item is equipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentItem {
    pub name: String,
    pub slot: String,
    pub modifiers: BTreeMap<Stat, i32>,
}

impl EquipmentItem {
    pub fn new(name: impl Into<String>, slot: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slot: slot.into(),
            modifiers: BTreeMap::new(),
        }
    }

    pub fn with_modifier(mut self, stat: Stat, delta: i32) -> Self {
        *self.modifiers.entry(stat).or_insert(0) += delta;
        self
    }

    /// Resolve the slot name
    pub fn slot(&self) -> Result<EquipmentSlot, BattleError> {
        self.slot
            .trim()
            .parse()
            .map_err(|_| BattleError::InvalidSlot {
                slot: self.slot.clone(),
            })
    }

    /// Apply the modifiers, returning the change made to each stat
    fn apply_to(&self, stats: &mut Stats) -> BTreeMap<Stat, i32> {
        self.modifiers
            .iter()
            .map(|(&stat, &delta)| (stat, stats.adjust(stat, delta)))
            .collect()
    }
}

/// An item in a slot and the stat changes it made when put on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Worn {
    item: EquipmentItem,
    applied: BTreeMap<Stat, i32>,
}

impl Worn {
    fn remove_from(self, stats: &mut Stats) -> EquipmentItem {
        for (stat, delta) in self.applied {
            stats.adjust(stat, delta.saturating_neg());
        }
        self.item
    }
}

/// Items currently worn, one per slot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    slots: BTreeMap<EquipmentSlot, Worn>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<&EquipmentItem> {
        self.slots.get(&slot).map(|worn| &worn.item)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EquipmentSlot, &EquipmentItem)> {
        self.slots.iter().map(|(slot, worn)| (*slot, &worn.item))
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Put on an item, returning whatever it displaced
///
/// Fails without touching anything if the slot name is not recognized.
/// Equipping the item already in the slot changes nothing.
pub fn equip(
    stats: &mut Stats,
    equipment: &mut Equipment,
    item: EquipmentItem,
) -> Result<Option<EquipmentItem>, BattleError> {
    let slot = item.slot()?;

    if equipment.get(slot) == Some(&item) {
        return Ok(None);
    }

    let previous = equipment
        .slots
        .remove(&slot)
        .map(|worn| worn.remove_from(stats));
    let applied = item.apply_to(stats);
    equipment.slots.insert(slot, Worn { item, applied });
    Ok(previous)
}

/// Take off the item in a slot and reverse its modifiers
pub fn unequip(
    stats: &mut Stats,
    equipment: &mut Equipment,
    slot: EquipmentSlot,
) -> Option<EquipmentItem> {
    let worn = equipment.slots.remove(&slot)?;
    Some(worn.remove_from(stats))
}
