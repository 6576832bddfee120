//! Static palette metadata per object category: default size, color token,
//! glyph, and toolbox label.

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use crate::consts::FALLBACK_OBJECT_SIZE;
use crate::doc::ObjectKind;
use crate::geometry::Size;

/// Color token used for anything outside the known categories.
pub const FALLBACK_COLOR: &str = "bg-gray-500";

/// Glyph used for anything outside the known categories.
pub const FALLBACK_GLYPH: &str = "⬜";

/// Display metadata for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayMeta {
    /// Presentation color token.
    pub color: &'static str,
    /// Single glyph shown on the object and in the toolbox.
    pub glyph: &'static str,
}

/// A toolbox entry: everything the palette shows for one category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteEntry {
    pub kind: ObjectKind,
    pub label: &'static str,
    pub description: &'static str,
    pub size: Size,
    pub meta: DisplayMeta,
}

/// Default footprint of a newly placed object.
#[must_use]
pub fn default_size(kind: ObjectKind) -> Size {
    match kind {
        ObjectKind::SlotMachine => Size::new(40.0, 60.0),
        ObjectKind::PokerTable => Size::new(120.0, 80.0),
        ObjectKind::Roulette => Size::new(100.0, 100.0),
        ObjectKind::Blackjack => Size::new(80.0, 60.0),
        ObjectKind::Table => Size::new(60.0, 60.0),
    }
}

/// Color token and glyph for a category.
#[must_use]
pub fn display_meta(kind: ObjectKind) -> DisplayMeta {
    let (color, glyph) = match kind {
        ObjectKind::SlotMachine => ("bg-red-500", "🎰"),
        ObjectKind::PokerTable => ("bg-green-600", "♠️"),
        ObjectKind::Roulette => ("bg-purple-600", "🎲"),
        ObjectKind::Blackjack => ("bg-blue-600", "🃏"),
        ObjectKind::Table => ("bg-yellow-600", "🪑"),
    };
    DisplayMeta { color, glyph }
}

/// Default size for a category given by wire name. Unknown names get 50x50.
#[must_use]
pub fn default_size_by_name(name: &str) -> Size {
    ObjectKind::from_wire_name(name)
        .map_or(Size::new(FALLBACK_OBJECT_SIZE, FALLBACK_OBJECT_SIZE), default_size)
}

/// Display metadata for a category given by wire name. Unknown names get the neutral fallback.
#[must_use]
pub fn display_meta_by_name(name: &str) -> DisplayMeta {
    ObjectKind::from_wire_name(name)
        .map_or(DisplayMeta { color: FALLBACK_COLOR, glyph: FALLBACK_GLYPH }, display_meta)
}

/// The toolbox, in display order.
#[must_use]
pub fn palette() -> Vec<PaletteEntry> {
    ObjectKind::ALL
        .into_iter()
        .map(|kind| {
            let (label, description) = match kind {
                ObjectKind::SlotMachine => ("Slot Machine", "Classic slot machine"),
                ObjectKind::PokerTable => ("Poker Table", "Round poker table"),
                ObjectKind::Roulette => ("Roulette", "Roulette wheel table"),
                ObjectKind::Blackjack => ("Blackjack", "Blackjack table"),
                ObjectKind::Table => ("Generic Table", "Multi-purpose table"),
            };
            PaletteEntry { kind, label, description, size: default_size(kind), meta: display_meta(kind) }
        })
        .collect()
}
