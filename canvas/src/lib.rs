//! Floor-plan editing engine.
//!
//! This crate owns the model behind a floor-plan designer: floors, the objects
//! placed on them, drag-and-drop placement with bounds clamping, property
//! edits, background images, and JSON export/import. A presentation layer
//! translates pointer and form events into [`engine::EngineCore`] calls and
//! reacts to the returned [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine state and the actions it emits |
//! | [`doc`] | Floor and object types, and the copy-on-write floor store |
//! | [`geometry`] | Points, sizes, and the bounds clamp |
//! | [`registry`] | Per-category default sizes, colors, and glyphs |
//! | [`input`] | Drag sources, drop targets, and the gesture state |
//! | [`placement`] | Palette inserts and object moves from drag gestures |
//! | [`editor`] | Field edits, rotation, and removal of placed objects |
//! | [`export`] | Export documents and validated import |
//! | [`background`] | Async background image loading |
//! | [`error`] | Error types and stable error codes |
//! | [`consts`] | Shared numeric constants (floor limits, fallback size, etc.) |

pub mod background;
pub mod consts;
pub mod doc;
pub mod editor;
pub mod engine;
pub mod error;
pub mod export;
pub mod geometry;
pub mod input;
pub mod placement;
pub mod registry;
