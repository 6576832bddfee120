#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn default_sizes_match_palette() {
    assert_eq!(default_size(ObjectKind::SlotMachine), Size::new(40.0, 60.0));
    assert_eq!(default_size(ObjectKind::PokerTable), Size::new(120.0, 80.0));
    assert_eq!(default_size(ObjectKind::Roulette), Size::new(100.0, 100.0));
    assert_eq!(default_size(ObjectKind::Blackjack), Size::new(80.0, 60.0));
    assert_eq!(default_size(ObjectKind::Table), Size::new(60.0, 60.0));
}

#[test]
fn display_meta_known_kind() {
    let meta = display_meta(ObjectKind::Roulette);
    assert_eq!(meta.color, "bg-purple-600");
    assert_eq!(meta.glyph, "🎲");
}

#[test]
fn unknown_name_falls_back_to_neutral_default() {
    assert_eq!(default_size_by_name("craps"), Size::new(50.0, 50.0));
    let meta = display_meta_by_name("craps");
    assert_eq!(meta.color, FALLBACK_COLOR);
    assert_eq!(meta.glyph, FALLBACK_GLYPH);
}

#[test]
fn lookup_by_wire_name() {
    assert_eq!(default_size_by_name("poker-table"), Size::new(120.0, 80.0));
    assert_eq!(display_meta_by_name("table").glyph, "🪑");
}

#[test]
fn palette_lists_every_kind_once() {
    let entries = palette();
    assert_eq!(entries.len(), ObjectKind::ALL.len());
    for kind in ObjectKind::ALL {
        assert_eq!(entries.iter().filter(|e| e.kind == kind).count(), 1);
    }
    assert_eq!(entries[0].label, "Slot Machine");
    assert_eq!(entries[4].label, "Generic Table");
}
