//! Top-level editing engine.
//!
//! `EngineCore` is the explicit state container a host owns: the floor store,
//! UI selection, the placement controller, the property editor, and the
//! bookkeeping for in-flight background uploads. Every operation returns the
//! [`Action`]s the host should react to (re-render, notify, persist a file).

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::background::{self, UploadTicket};
use crate::doc::{Floor, FloorId, FloorSpec, FloorStore, ObjectId, PartialFloor, PartialObject, PlacedObject};
use crate::editor::{EditClampPolicy, FieldEdits, PropertyEditor};
use crate::error::{BackgroundError, EditError, ExportError, FloorError};
use crate::export::{self, ExportFile};
use crate::geometry::Point;
use crate::input::{DragDelta, DragSource, DropEvent, UiState};
use crate::placement::{PlacementController, Preview};

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// A fire-and-forget message for the host's notification surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

/// Actions returned from engine operations for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Ephemeral drag state changed; redraw the preview.
    RenderNeeded,
    FloorCreated(Arc<Floor>),
    FloorUpdated { id: FloorId, fields: PartialFloor },
    FloorDeleted { id: FloorId },
    ActiveFloorChanged { id: FloorId },
    ObjectCreated { floor_id: FloorId, object: PlacedObject },
    ObjectUpdated { floor_id: FloorId, id: ObjectId, fields: PartialObject },
    ObjectDeleted { floor_id: FloorId, id: ObjectId },
    Notify(Notice),
}

/// Engine behavior knobs supplied by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Whether property edits and floor resizes keep objects inside the floor.
    pub edit_clamp: EditClampPolicy,
    /// Upper bound on background image size; `None` is unlimited.
    pub max_background_bytes: Option<u64>,
}

/// Core engine state. Owns everything; no globals.
#[derive(Debug, Clone)]
pub struct EngineCore {
    pub store: FloorStore,
    pub ui: UiState,
    placement: PlacementController,
    editor: PropertyEditor,
    config: EngineConfig,
    upload_generation: u64,
    pending_uploads: HashMap<FloorId, u64>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl EngineCore {
    /// A session seeded with the default floor.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self::with_store(FloorStore::default(), config)
    }

    /// A session over an existing store.
    #[must_use]
    pub fn with_store(store: FloorStore, config: EngineConfig) -> Self {
        Self {
            store,
            ui: UiState::default(),
            placement: PlacementController::new(),
            editor: PropertyEditor::new(config.edit_clamp),
            config,
            upload_generation: 0,
            pending_uploads: HashMap::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> EngineConfig {
        self.config
    }

    // --- Floors ---

    /// Validate and add a floor, then make it active.
    ///
    /// # Errors
    ///
    /// Returns a validation error; the store is left unchanged.
    pub fn create_floor(&mut self, mut spec: FloorSpec) -> Result<Vec<Action>, FloorError> {
        spec.validate()?;
        spec.name = spec.name.trim().to_string();
        let floor = self.store.add_floor(spec);
        let mut actions = vec![Action::FloorCreated(Arc::clone(&floor))];
        actions.extend(self.select_floor(&floor.id));
        actions.push(Action::Notify(Notice::success("Floor created successfully!")));
        Ok(actions)
    }

    /// Validate and apply a floor edit. Under [`EditClampPolicy::Clamp`] a
    /// resize pulls objects back inside the new bounds.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown floor or a validation error for the
    /// merged result; the store is left unchanged.
    pub fn edit_floor(&mut self, id: &str, mut fields: PartialFloor) -> Result<Vec<Action>, FloorError> {
        let floor = self.store.floor(id).ok_or_else(|| FloorError::NotFound(id.to_string()))?;
        let name = fields.name.as_deref().map_or(floor.name.as_str(), str::trim);
        crate::doc::validate_floor(name, fields.width.unwrap_or(floor.width), fields.height.unwrap_or(floor.height))?;
        if let Some(name) = fields.name.as_mut() {
            *name = name.trim().to_string();
        }

        self.store.update_floor(id, &fields);
        let mut actions = vec![Action::FloorUpdated { id: id.to_string(), fields }];
        if self.config.edit_clamp == EditClampPolicy::Clamp {
            for (object_id, at) in self.store.reclamp_objects(id) {
                actions.push(Action::ObjectUpdated {
                    floor_id: id.to_string(),
                    id: object_id,
                    fields: PartialObject::position(at),
                });
            }
        }
        actions.push(Action::Notify(Notice::success("Floor updated successfully!")));
        Ok(actions)
    }

    /// Delete a floor. Deleting the last floor, or an unknown one, is a silent
    /// no-op. Deleting the active floor drops any gesture and selection on it.
    pub fn delete_floor(&mut self, id: &str) -> Vec<Action> {
        let was_active = self.store.active_id() == id;
        if self.store.remove_floor(id).is_none() {
            return Vec::new();
        }
        self.pending_uploads.remove(id);
        let mut actions = vec![Action::FloorDeleted { id: id.to_string() }];
        if was_active {
            self.placement.cancel();
            self.ui.selected_id = None;
            actions.push(Action::ActiveFloorChanged { id: self.store.active_id().to_string() });
        }
        actions.push(Action::Notify(Notice::success("Floor deleted successfully")));
        actions
    }

    /// Switch the active floor. Unknown ids are ignored.
    pub fn select_floor(&mut self, id: &str) -> Vec<Action> {
        if self.store.active_id() == id {
            return Vec::new();
        }
        if !self.store.set_active(id) {
            return Vec::new();
        }
        self.placement.cancel();
        self.ui.selected_id = None;
        vec![Action::ActiveFloorChanged { id: id.to_string() }]
    }

    // --- Gestures ---

    pub fn drag_start(&mut self, source: DragSource) {
        self.placement.begin(&self.store, source);
    }

    pub fn drag_update(&mut self, delta: DragDelta, pointer: Option<Point>) -> Vec<Action> {
        self.placement.update(delta, pointer)
    }

    pub fn drag_end(&mut self, event: DropEvent) -> Vec<Action> {
        self.placement.finish(&mut self.store, event)
    }

    pub fn drag_cancel(&mut self) {
        self.placement.cancel();
    }

    // --- Selection ---

    /// Select an object on the active floor, or clear the selection.
    /// Selecting an id that isn't on the active floor clears the selection.
    pub fn select_object(&mut self, id: Option<&str>) {
        let active = self.store.active_id().to_string();
        self.ui.selected_id = id.filter(|id| self.store.object(&active, id).is_some()).map(str::to_string);
    }

    // --- Property edits ---

    /// Apply form edits to an object.
    ///
    /// # Errors
    ///
    /// See [`PropertyEditor::apply_edits`].
    pub fn edit_object(&mut self, floor_id: &str, object_id: &str, edits: &FieldEdits) -> Result<Vec<Action>, EditError> {
        self.editor.apply_edits(&mut self.store, floor_id, object_id, edits)
    }

    /// Rotate an object a quarter turn.
    ///
    /// # Errors
    ///
    /// See [`PropertyEditor::rotate`].
    pub fn rotate_object(&mut self, floor_id: &str, object_id: &str) -> Result<Vec<Action>, EditError> {
        self.editor.rotate(&mut self.store, floor_id, object_id)
    }

    /// Remove an object, clearing the selection if it pointed at it.
    ///
    /// # Errors
    ///
    /// See [`PropertyEditor::remove`].
    pub fn remove_object(&mut self, floor_id: &str, object_id: &str) -> Result<Vec<Action>, EditError> {
        let actions = self.editor.remove(&mut self.store, floor_id, object_id)?;
        if self.ui.selected_id.as_deref() == Some(object_id) {
            self.ui.selected_id = None;
        }
        Ok(actions)
    }

    // --- Background ---

    /// Start a background upload for a floor. A later upload for the same
    /// floor supersedes this one.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown floor.
    pub fn begin_background_upload(&mut self, floor_id: &str) -> Result<UploadTicket, FloorError> {
        if self.store.floor(floor_id).is_none() {
            return Err(FloorError::NotFound(floor_id.to_string()));
        }
        self.upload_generation += 1;
        self.pending_uploads.insert(floor_id.to_string(), self.upload_generation);
        Ok(UploadTicket { floor_id: floor_id.to_string(), generation: self.upload_generation })
    }

    /// Store a finished upload. Discarded when the floor was deleted or a
    /// newer upload was started meanwhile.
    pub fn complete_background_upload(&mut self, ticket: &UploadTicket, data_uri: String) -> Vec<Action> {
        if self.pending_uploads.get(&ticket.floor_id) != Some(&ticket.generation) {
            warn!(floor_id = %ticket.floor_id, generation = ticket.generation, "stale background upload discarded");
            return Vec::new();
        }
        self.pending_uploads.remove(&ticket.floor_id);
        let fields = PartialFloor { background_image: Some(Some(data_uri)), ..Default::default() };
        if !self.store.update_floor(&ticket.floor_id, &fields) {
            return Vec::new();
        }
        info!(floor_id = %ticket.floor_id, "background updated");
        vec![
            Action::FloorUpdated { id: ticket.floor_id.clone(), fields },
            Action::Notify(Notice::success("Background updated successfully!")),
        ]
    }

    /// Record a failed upload. Stale failures are dropped silently.
    pub fn fail_background_upload(&mut self, ticket: &UploadTicket, err: &BackgroundError) -> Vec<Action> {
        if self.pending_uploads.get(&ticket.floor_id) != Some(&ticket.generation) {
            return Vec::new();
        }
        self.pending_uploads.remove(&ticket.floor_id);
        warn!(floor_id = %ticket.floor_id, error = %err, "background upload failed");
        vec![Action::Notify(Notice::error(format!("Background upload failed: {err}")))]
    }

    /// Read `path` and install it as the floor's background.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown floor. Read failures are reported as
    /// an error notice in the returned actions.
    pub async fn load_background(&mut self, floor_id: &str, path: &Path) -> Result<Vec<Action>, FloorError> {
        let ticket = self.begin_background_upload(floor_id)?;
        match background::load_data_uri(path, self.config.max_background_bytes).await {
            Ok(uri) => Ok(self.complete_background_upload(&ticket, uri)),
            Err(err) => Ok(self.fail_background_upload(&ticket, &err)),
        }
    }

    // --- Export / import ---

    /// Export a floor to a named JSON file.
    ///
    /// # Errors
    ///
    /// Returns `FloorNotFound` for an unknown floor or a serialization error.
    pub fn export_floor(&self, floor_id: &str) -> Result<(ExportFile, Vec<Action>), ExportError> {
        let floor = self.store.floor(floor_id).ok_or_else(|| ExportError::FloorNotFound(floor_id.to_string()))?;
        let file = export::export(&floor)?.to_file()?;
        debug!(floor_id = %floor_id, file = %file.file_name, bytes = file.contents.len(), "floor exported");
        Ok((file, vec![Action::Notify(Notice::success("Floor plan exported successfully!"))]))
    }

    /// Import an export document as a new floor and make it active. Under
    /// [`EditClampPolicy::Clamp`] objects outside the floor are pulled back in,
    /// each move reported as an `ObjectUpdated` after the `FloorCreated`.
    ///
    /// # Errors
    ///
    /// Returns a parse or validation error; the store is left unchanged.
    pub fn import_floor(&mut self, json: &str) -> Result<Vec<Action>, ExportError> {
        let mut floor = export::import(json)?.floor;
        floor.name = floor.name.trim().to_string();
        let floor = self.store.insert_floor(floor);
        let mut actions = vec![Action::FloorCreated(Arc::clone(&floor))];
        if self.config.edit_clamp == EditClampPolicy::Clamp {
            for (object_id, at) in self.store.reclamp_objects(&floor.id) {
                actions.push(Action::ObjectUpdated {
                    floor_id: floor.id.clone(),
                    id: object_id,
                    fields: PartialObject::position(at),
                });
            }
        }
        actions.extend(self.select_floor(&floor.id));
        actions.push(Action::Notify(Notice::success(format!("Imported {}", floor.name))));
        Ok(actions)
    }

    // --- Queries ---

    /// Snapshot of the active floor.
    #[must_use]
    pub fn active_floor(&self) -> Option<Arc<Floor>> {
        self.store.active_floor()
    }

    /// The currently selected object, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.ui.selected_id.as_deref()
    }

    /// Where the dragged item would land if dropped now.
    #[must_use]
    pub fn preview(&self) -> Option<Preview> {
        self.placement.preview(&self.store)
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.placement.state().is_dragging()
    }
}
