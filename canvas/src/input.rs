//! Input model: drag sources, drop targets, and the gesture state machine.
//!
//! A drag is a sequence of discrete events: one start, any number of
//! intermediate updates, and one end. `InputState` is the active gesture
//! being tracked between start and end. Everything it holds is ephemeral
//! preview state; nothing is written to the floor store until the gesture
//! ends over the canvas.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::doc::{FloorId, ObjectId, ObjectKind};
use crate::geometry::Point;

/// What the user picked up.
#[derive(Debug, Clone, PartialEq)]
pub enum DragSource {
    /// A new object dragged out of the palette.
    Palette(ObjectKind),
    /// An object already placed on a floor.
    Object {
        /// Floor holding the object.
        floor_id: FloorId,
        /// The object being moved.
        id: ObjectId,
    },
}

/// Where the pointer was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// The floor canvas drop zone.
    Canvas,
    /// Anywhere else (palette, side panels, outside the window).
    Elsewhere,
}

/// Cumulative pointer translation since the drag started.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragDelta {
    /// Horizontal translation in floor units.
    pub dx: f64,
    /// Vertical translation in floor units (positive = down).
    pub dy: f64,
}

impl DragDelta {
    #[must_use]
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

/// The end-of-gesture event reported by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropEvent {
    /// The drop zone under the pointer on release.
    pub target: DropTarget,
    /// Pointer position relative to the canvas origin on release.
    pub pointer: Point,
    /// Cumulative translation since the drag started.
    pub delta: DragDelta,
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    /// The id of the currently selected object on the active floor, if any.
    pub selected_id: Option<ObjectId>,
}

/// Internal state for the gesture state machine.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A new object is being dragged from the palette.
    DraggingFromPalette {
        /// Category being placed.
        kind: ObjectKind,
        /// Latest canvas-relative pointer position, if the pointer is over the canvas.
        pointer: Option<Point>,
    },
    /// An existing object is being moved.
    DraggingObject {
        /// Floor holding the object.
        floor_id: FloorId,
        /// Id of the object being dragged.
        id: ObjectId,
        /// Object x at the start of the drag.
        orig_x: f64,
        /// Object y at the start of the drag.
        orig_y: f64,
        /// Translation so far.
        delta: DragDelta,
    },
}

impl InputState {
    /// Whether a gesture is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}
