use super::*;

// =============================================================
// InputState
// =============================================================

#[test]
fn input_state_default_is_idle() {
    assert_eq!(InputState::default(), InputState::Idle);
    assert!(!InputState::default().is_dragging());
}

#[test]
fn palette_drag_is_dragging() {
    let state = InputState::DraggingFromPalette { kind: ObjectKind::Roulette, pointer: None };
    assert!(state.is_dragging());
}

#[test]
fn object_drag_is_dragging() {
    let state = InputState::DraggingObject {
        floor_id: "f".into(),
        id: "o".into(),
        orig_x: 0.0,
        orig_y: 0.0,
        delta: DragDelta::default(),
    };
    assert!(state.is_dragging());
}

// =============================================================
// DragDelta / DropTarget / UiState
// =============================================================

#[test]
fn drag_delta_default_is_zero() {
    assert_eq!(DragDelta::default(), DragDelta::new(0.0, 0.0));
}

#[test]
fn drop_targets_distinct() {
    assert_ne!(DropTarget::Canvas, DropTarget::Elsewhere);
}

#[test]
fn ui_state_default_has_no_selection() {
    assert!(UiState::default().selected_id.is_none());
}

#[test]
fn drag_source_equality() {
    let a = DragSource::Object { floor_id: "f".into(), id: "o".into() };
    let b = DragSource::Object { floor_id: "f".into(), id: "o".into() };
    assert_eq!(a, b);
    assert_ne!(a, DragSource::Palette(ObjectKind::Table));
}
