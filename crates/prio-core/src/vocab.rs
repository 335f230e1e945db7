//! Canonical game vocabularies used by the submission form

/// Raids the guild runs
pub const RAIDS: &[&str] = &[
    "Molten Core",
    "Blackwing Lair",
    "AQ40",
    "Naxxramas",
    "Emerald Sanctum",
    "Karazhan 40",
];

/// Equipment slots
pub const SLOTS: &[&str] = &[
    "Head",
    "Neck",
    "Shoulders",
    "Back",
    "Chest",
    "Bracers",
    "Gloves",
    "Belt",
    "Legs",
    "Boots",
    "Ring",
    "Trinket",
    "Two-Handed Weapon",
    "Main Hand",
    "Off Hand",
    "Ranged",
];

/// Playable classes
pub const CLASSES: &[&str] = &[
    "Warrior", "Mage", "Priest", "Rogue", "Hunter", "Warlock", "Druid", "Paladin", "Shaman",
];

/// Whether the slot is one the form offers
#[must_use]
pub fn is_known_slot(slot: &str) -> bool {
    SLOTS.iter().any(|s| s.eq_ignore_ascii_case(slot.trim()))
}

/// Whether the class is playable
#[must_use]
pub fn is_known_class(class: &str) -> bool {
    CLASSES.iter().any(|c| c.eq_ignore_ascii_case(class.trim()))
}
