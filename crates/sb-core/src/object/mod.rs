//! Object system
//!
//! Wearable equipment and the stat modifiers it carries.

mod equipment;

pub use equipment::{Equipment, EquipmentItem, EquipmentSlot, equip, unequip};
