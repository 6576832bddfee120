//! Drag-and-drop placement: turns gesture events into floor-store mutations.
//!
//! DESIGN
//! ======
//! The controller tracks one gesture at a time in an [`InputState`]. Starts
//! and updates only touch that state; the store is written exactly once, when
//! the gesture ends over the canvas. Any other ending (a drop elsewhere, an
//! explicit cancel, a stale object id) leaves the store untouched, so there is
//! never anything to roll back.
//!
//! Palette drops put the object's center under the cursor: the top-left
//! corner is the drop point minus half the default size, then clamped.

#[cfg(test)]
#[path = "placement_test.rs"]
mod placement_test;

use tracing::{debug, info};

use crate::doc::{FloorStore, ObjectId, ObjectKind, PartialObject, PlacedObject, new_id};
use crate::engine::{Action, Notice};
use crate::geometry::{self, Point, Size};
use crate::input::{DragDelta, DragSource, DropEvent, DropTarget, InputState};
use crate::registry;

/// Ephemeral position of the dragged item, for drawing a drag ghost.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    /// The object being moved, or `None` for a palette item not yet placed.
    pub object_id: Option<ObjectId>,
    /// Clamped top-left corner the item would land at.
    pub origin: Point,
    /// Footprint of the item.
    pub size: Size,
}

/// Gesture state machine for palette inserts and object moves.
#[derive(Debug, Clone, Default)]
pub struct PlacementController {
    state: InputState,
}

impl PlacementController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The gesture currently being tracked.
    #[must_use]
    pub fn state(&self) -> &InputState {
        &self.state
    }

    // --- Gesture lifecycle ---

    /// Start a drag. Starting while another drag is active abandons the old one.
    /// Dragging an object that no longer exists leaves the controller idle.
    pub fn begin(&mut self, store: &FloorStore, source: DragSource) {
        self.state = match source {
            DragSource::Palette(kind) => InputState::DraggingFromPalette { kind, pointer: None },
            DragSource::Object { floor_id, id } => match store.object(&floor_id, &id) {
                Some(obj) => InputState::DraggingObject {
                    floor_id,
                    id,
                    orig_x: obj.x,
                    orig_y: obj.y,
                    delta: DragDelta::default(),
                },
                None => {
                    debug!(floor_id = %floor_id, object_id = %id, "drag start on unknown object ignored");
                    InputState::Idle
                }
            },
        };
    }

    /// Record an intermediate pointer update. `pointer` is the canvas-relative
    /// position when the pointer is over the canvas.
    pub fn update(&mut self, delta: DragDelta, pointer: Option<Point>) -> Vec<Action> {
        match &mut self.state {
            InputState::Idle => Vec::new(),
            InputState::DraggingFromPalette { pointer: p, .. } => {
                *p = pointer;
                vec![Action::RenderNeeded]
            }
            InputState::DraggingObject { delta: d, .. } => {
                *d = delta;
                vec![Action::RenderNeeded]
            }
        }
    }

    /// Finish the gesture. Commits to the store only when released over the canvas.
    pub fn finish(&mut self, store: &mut FloorStore, event: DropEvent) -> Vec<Action> {
        let state = std::mem::take(&mut self.state);
        if event.target != DropTarget::Canvas {
            debug!(drop_target = ?event.target, "drop outside canvas ignored");
            return Vec::new();
        }
        match state {
            InputState::Idle => Vec::new(),
            InputState::DraggingFromPalette { kind, .. } => {
                let floor_id = store.active_id().to_string();
                insert_from_palette(store, &floor_id, kind, event.pointer)
            }
            InputState::DraggingObject { floor_id, id, .. } => move_existing(store, &floor_id, &id, event.delta),
        }
    }

    /// Abandon the gesture without touching the store.
    pub fn cancel(&mut self) {
        self.state = InputState::Idle;
    }

    /// Where the dragged item would land if dropped now.
    #[must_use]
    pub fn preview(&self, store: &FloorStore) -> Option<Preview> {
        match &self.state {
            InputState::Idle => None,
            InputState::DraggingFromPalette { kind, pointer } => {
                let pointer = (*pointer)?;
                let floor = store.active_floor()?;
                let size = registry::default_size(*kind);
                Some(Preview { object_id: None, origin: centered_origin(pointer, size, floor.size()), size })
            }
            InputState::DraggingObject { floor_id, id, orig_x, orig_y, delta } => {
                let floor = store.floor(floor_id)?;
                let obj = floor.object(id)?;
                let proposed = Point::new(*orig_x, *orig_y).offset(delta.dx, delta.dy);
                Some(Preview {
                    object_id: Some(id.clone()),
                    origin: geometry::clamp_point(proposed, obj.size(), floor.size()),
                    size: obj.size(),
                })
            }
        }
    }
}

/// Place a new `kind` object centered under `drop` (canvas-relative), clamped
/// to the floor, with an auto-generated `"{CATEGORY} {N}"` name.
pub fn insert_from_palette(store: &mut FloorStore, floor_id: &str, kind: ObjectKind, drop: Point) -> Vec<Action> {
    let Some(floor) = store.floor(floor_id) else {
        return Vec::new();
    };
    let size = registry::default_size(kind);
    let origin = centered_origin(drop, size, floor.size());
    let object = PlacedObject {
        id: new_id(),
        kind,
        x: origin.x,
        y: origin.y,
        width: size.width,
        height: size.height,
        rotation: 0.0,
        name: format!("{} {}", kind.name_prefix(), floor.objects.len() + 1),
    };
    if !store.add_object(floor_id, object.clone()) {
        return Vec::new();
    }
    info!(floor_id = %floor_id, object_id = %object.id, kind = kind.wire_name(), x = object.x, y = object.y, "object placed");
    let notice = Notice::success(format!("{} added to floor", object.name));
    vec![Action::ObjectCreated { floor_id: floor_id.to_string(), object }, Action::Notify(notice)]
}

/// Translate an existing object by `delta`, clamped to the floor bounds.
pub fn move_existing(store: &mut FloorStore, floor_id: &str, object_id: &str, delta: DragDelta) -> Vec<Action> {
    let Some(floor) = store.floor(floor_id) else {
        return Vec::new();
    };
    let Some(obj) = floor.object(object_id) else {
        return Vec::new();
    };
    let proposed = obj.origin().offset(delta.dx, delta.dy);
    let at = geometry::clamp_point(proposed, obj.size(), floor.size());
    let fields = PartialObject::position(at);
    if !store.update_object(floor_id, object_id, &fields) {
        return Vec::new();
    }
    debug!(floor_id = %floor_id, object_id = %object_id, x = at.x, y = at.y, "object moved");
    vec![Action::ObjectUpdated { floor_id: floor_id.to_string(), id: object_id.to_string(), fields }]
}

fn centered_origin(pointer: Point, size: Size, bounds: Size) -> Point {
    let (half_w, half_h) = size.half();
    geometry::clamp_point(pointer.offset(-half_w, -half_h), size, bounds)
}
