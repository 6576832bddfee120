//! Session scripts: JSON-lines replay of editor interactions.
//!
//! DESIGN
//! ======
//! Each non-blank line is one [`ScriptStep`] tagged by `op`. Lines starting
//! with `#` are comments. Floors are referenced by display name and objects
//! by display name within their floor; omitting `floor` means the active
//! floor.
//!
//! Rejected input (blank names, floor sizes out of range) becomes an error
//! notice and replay continues, the same way the editor would show a toast.
//! Malformed lines, unknown references, and I/O failures stop the replay.

#[cfg(test)]
#[path = "script_test.rs"]
mod tests;

use std::path::{Component, Path, PathBuf};

use canvas::doc::{FloorId, FloorSpec, ObjectId, ObjectKind, PartialFloor};
use canvas::editor::FieldEdits;
use canvas::engine::{Action, EngineCore, Notice};
use canvas::error::{ErrorCode, ExportError};
use canvas::geometry::Point;
use canvas::input::{DragDelta, DragSource, DropEvent, DropTarget};
use serde::Deserialize;
use tracing::{debug, error, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("line {line}: {source}")]
    Parse { line: usize, source: serde_json::Error },
    #[error("no floor named '{0}'")]
    UnknownFloor(String),
    #[error("no object named '{object}' on floor '{floor}'")]
    UnknownObject { floor: String, object: String },
    #[error("export file name is not a plain file name: {0}")]
    UnsafeExportName(String),
    #[error("export failed: {0}")]
    Export(#[from] ExportError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl ErrorCode for ScriptError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Parse { .. } => "E_SCRIPT_PARSE",
            Self::UnknownFloor(_) => "E_SCRIPT_UNKNOWN_FLOOR",
            Self::UnknownObject { .. } => "E_SCRIPT_UNKNOWN_OBJECT",
            Self::UnsafeExportName(_) => "E_SCRIPT_EXPORT_NAME",
            Self::Export(err) => err.error_code(),
            Self::Io(_) => "E_SCRIPT_IO",
        }
    }
}

// =============================================================================
// STEPS
// =============================================================================

/// One scripted interaction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptStep {
    CreateFloor {
        name: String,
        width: f64,
        height: f64,
    },
    UpdateFloor {
        floor: Option<String>,
        name: Option<String>,
        width: Option<f64>,
        height: Option<f64>,
        #[serde(default)]
        clear_background: bool,
    },
    SelectFloor {
        floor: String,
    },
    DeleteFloor {
        floor: String,
    },
    /// Pick up a new object from the palette.
    DragPalette {
        kind: ObjectKind,
    },
    /// Pick up an object already on a floor.
    DragObject {
        floor: Option<String>,
        object: String,
    },
    /// Intermediate pointer event; `x`/`y` is the pointer over the canvas, if any.
    DragMove {
        #[serde(default)]
        dx: f64,
        #[serde(default)]
        dy: f64,
        x: Option<f64>,
        y: Option<f64>,
    },
    DragEnd {
        x: f64,
        y: f64,
        #[serde(default)]
        dx: f64,
        #[serde(default)]
        dy: f64,
        /// Released outside the canvas drop zone.
        #[serde(default)]
        outside: bool,
    },
    DragCancel,
    /// Palette drag and drop at `(x, y)` in one step.
    Place {
        kind: ObjectKind,
        x: f64,
        y: f64,
    },
    Select {
        object: Option<String>,
    },
    /// Property-form edit; values are raw field text.
    Edit {
        floor: Option<String>,
        object: String,
        name: Option<String>,
        x: Option<String>,
        y: Option<String>,
        width: Option<String>,
        height: Option<String>,
    },
    Rotate {
        floor: Option<String>,
        object: String,
    },
    Remove {
        floor: Option<String>,
        object: String,
    },
    /// Load an image file as the floor background. Relative paths resolve
    /// against the script's directory.
    Background {
        floor: Option<String>,
        path: PathBuf,
    },
    Export {
        floor: Option<String>,
    },
}

/// Parse a script into `(line number, step)` pairs. Line numbers are 1-based.
pub fn parse_script(text: &str) -> Result<Vec<(usize, ScriptStep)>, ScriptError> {
    let mut steps = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let step = serde_json::from_str(line).map_err(|source| ScriptError::Parse { line: idx + 1, source })?;
        steps.push((idx + 1, step));
    }
    Ok(steps)
}

// =============================================================================
// SESSION
// =============================================================================

/// An engine plus the bookkeeping a replay needs.
pub struct Session {
    core: EngineCore,
    out_dir: PathBuf,
    base_dir: PathBuf,
    notices: Vec<Notice>,
    exports: Vec<PathBuf>,
}

impl Session {
    pub fn new(core: EngineCore, out_dir: PathBuf, base_dir: PathBuf) -> Self {
        Self { core, out_dir, base_dir, notices: Vec::new(), exports: Vec::new() }
    }

    pub fn core(&self) -> &EngineCore {
        &self.core
    }

    /// Every notice raised so far, in order.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Paths of files written by `export` steps.
    pub fn exports(&self) -> &[PathBuf] {
        &self.exports
    }

    /// Apply one step.
    pub async fn apply(&mut self, step: ScriptStep) -> Result<(), ScriptError> {
        match step {
            ScriptStep::CreateFloor { name, width, height } => {
                let result = self.core.create_floor(FloorSpec { name, width, height, background_image: None });
                self.settle(result);
            }
            ScriptStep::UpdateFloor { floor, name, width, height, clear_background } => {
                let id = self.floor_id(floor.as_deref())?;
                let fields = PartialFloor { name, width, height, background_image: clear_background.then_some(None) };
                let result = self.core.edit_floor(&id, fields);
                self.settle(result);
            }
            ScriptStep::SelectFloor { floor } => {
                let id = self.floor_id(Some(&floor))?;
                let actions = self.core.select_floor(&id);
                self.absorb(actions);
            }
            ScriptStep::DeleteFloor { floor } => {
                let id = self.floor_id(Some(&floor))?;
                let actions = self.core.delete_floor(&id);
                if actions.is_empty() {
                    warn!(floor = %floor, "last floor cannot be deleted");
                }
                self.absorb(actions);
            }
            ScriptStep::DragPalette { kind } => self.core.drag_start(DragSource::Palette(kind)),
            ScriptStep::DragObject { floor, object } => {
                let (floor_id, id) = self.object_ref(floor.as_deref(), &object)?;
                self.core.drag_start(DragSource::Object { floor_id, id });
            }
            ScriptStep::DragMove { dx, dy, x, y } => {
                let pointer = x.zip(y).map(|(x, y)| Point::new(x, y));
                let actions = self.core.drag_update(DragDelta::new(dx, dy), pointer);
                self.absorb(actions);
            }
            ScriptStep::DragEnd { x, y, dx, dy, outside } => {
                let target = if outside { DropTarget::Elsewhere } else { DropTarget::Canvas };
                let event = DropEvent { target, pointer: Point::new(x, y), delta: DragDelta::new(dx, dy) };
                let actions = self.core.drag_end(event);
                self.absorb(actions);
            }
            ScriptStep::DragCancel => self.core.drag_cancel(),
            ScriptStep::Place { kind, x, y } => {
                self.core.drag_start(DragSource::Palette(kind));
                let event = DropEvent { target: DropTarget::Canvas, pointer: Point::new(x, y), delta: DragDelta::default() };
                let actions = self.core.drag_end(event);
                self.absorb(actions);
            }
            ScriptStep::Select { object } => match object {
                Some(name) => {
                    let (_, id) = self.object_ref(None, &name)?;
                    self.core.select_object(Some(&id));
                }
                None => self.core.select_object(None),
            },
            ScriptStep::Edit { floor, object, name, x, y, width, height } => {
                let (floor_id, id) = self.object_ref(floor.as_deref(), &object)?;
                let edits = FieldEdits { name, x, y, width, height };
                let result = self.core.edit_object(&floor_id, &id, &edits);
                self.settle(result);
            }
            ScriptStep::Rotate { floor, object } => {
                let (floor_id, id) = self.object_ref(floor.as_deref(), &object)?;
                let result = self.core.rotate_object(&floor_id, &id);
                self.settle(result);
            }
            ScriptStep::Remove { floor, object } => {
                let (floor_id, id) = self.object_ref(floor.as_deref(), &object)?;
                let result = self.core.remove_object(&floor_id, &id);
                self.settle(result);
            }
            ScriptStep::Background { floor, path } => {
                let id = self.floor_id(floor.as_deref())?;
                let path = self.base_dir.join(path);
                let result = self.core.load_background(&id, &path).await;
                self.settle(result);
            }
            ScriptStep::Export { floor } => {
                let id = self.floor_id(floor.as_deref())?;
                let (file, actions) = self.core.export_floor(&id)?;
                let path = self.export_path(&file.file_name)?;
                tokio::fs::create_dir_all(&self.out_dir).await?;
                tokio::fs::write(&path, &file.contents).await?;
                info!(path = %path.display(), bytes = file.contents.len(), "export written");
                self.exports.push(path);
                self.absorb(actions);
            }
        }
        Ok(())
    }

    // --- Reference resolution ---

    fn floor_id(&self, name: Option<&str>) -> Result<FloorId, ScriptError> {
        let Some(name) = name else {
            return Ok(self.core.store.active_id().to_string());
        };
        self.core
            .store
            .floors()
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.id.clone())
            .ok_or_else(|| ScriptError::UnknownFloor(name.to_string()))
    }

    fn object_ref(&self, floor: Option<&str>, object: &str) -> Result<(FloorId, ObjectId), ScriptError> {
        let floor_id = self.floor_id(floor)?;
        let found = self
            .core
            .store
            .floor(&floor_id)
            .and_then(|f| f.objects.iter().find(|o| o.name == object).map(|o| o.id.clone()));
        match found {
            Some(id) => Ok((floor_id, id)),
            None => Err(ScriptError::UnknownObject {
                floor: floor.map_or_else(|| floor_id.clone(), str::to_string),
                object: object.to_string(),
            }),
        }
    }

    /// Where an export lands. Only a single plain component is accepted, so
    /// nothing is written outside `out_dir`.
    fn export_path(&self, file_name: &str) -> Result<PathBuf, ScriptError> {
        let mut parts = Path::new(file_name).components();
        match (parts.next(), parts.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.out_dir.join(file_name)),
            _ => Err(ScriptError::UnsafeExportName(file_name.to_string())),
        }
    }

    // --- Outcomes ---

    fn absorb(&mut self, actions: Vec<Action>) {
        for action in actions {
            match action {
                Action::Notify(notice) => {
                    info!(level = ?notice.level, message = %notice.message, "notice");
                    self.notices.push(notice);
                }
                other => debug!(action = ?other, "action"),
            }
        }
    }

    /// Absorb a successful result, or record a rejection as an error notice.
    fn settle<E: ErrorCode>(&mut self, result: Result<Vec<Action>, E>) {
        match result {
            Ok(actions) => self.absorb(actions),
            Err(err) => {
                warn!(code = err.error_code(), error = %err, "step rejected");
                self.notices.push(Notice::error(err.to_string()));
            }
        }
    }
}

/// Parse and apply a whole script. Returns the number of steps applied.
pub async fn replay(session: &mut Session, text: &str) -> Result<usize, ScriptError> {
    let steps = parse_script(text)?;
    let count = steps.len();
    for (line, step) in steps {
        if let Err(err) = session.apply(step).await {
            error!(line, code = err.error_code(), error = %err, "script step failed");
            return Err(err);
        }
    }
    Ok(count)
}

/// Directory relative background paths resolve against.
pub fn script_dir(script: &Path) -> PathBuf {
    script.parent().map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}
