//! StratBoard Core Library
//!
//! Platform-agnostic engine for the StratBoard tactics board: the element
//! model, undo history, drawing gestures, the ten sequence slots and the
//! animated transitions between them. Rendering and windowing live in the
//! host; it feeds pointer and key events into a [`Session`] and calls
//! [`Session::tick`] once per frame.

pub mod animation;
pub mod camera;
pub mod commands;
pub mod config;
pub mod document;
pub mod drawing;
pub mod elements;
pub mod geometry;
pub mod history;
pub mod playback;
pub mod render;
pub mod sequence;
pub mod session;
pub mod shortcuts;
pub mod storage;
pub mod tools;

pub use animation::{AnimationStatus, Easing, Instant, RunToken, SequenceAnimator};
pub use camera::{Camera, MapSide};
pub use commands::{Command, SequenceTarget};
pub use config::{ConfigError, Settings};
pub use document::Document;
pub use drawing::{DrawingController, Modifiers};
pub use elements::{Element, ElementKind, ElementPatch, IconInfo};
pub use history::{History, MAX_UNDO_HISTORY};
pub use playback::{PlaybackEvent, PlaybackScheduler};
pub use render::{JsonSurface, RenderError, RenderSurface};
pub use sequence::{SEQUENCE_COUNT, Sequence, SequenceManager};
pub use session::{Session, TickReport};
pub use shortcuts::{Key, command_for_key};
pub use storage::{ImportError, PayloadCodec, PlainCodec, SequenceFile, StorageError};
pub use tools::{BrushType, ToolKind, ToolSettings};
