//! The editor session: one map, its slots and everything driving them.

use crate::animation::{AnimationStatus, Instant, SequenceAnimator};
use crate::camera::{Camera, MapSide};
use crate::commands::{Command, SequenceTarget};
use crate::config::Settings;
use crate::document::Document;
use crate::drawing::{DrawingController, Modifiers};
use crate::elements::anchors::move_anchor;
use crate::elements::{ElementPatch, IconInfo};
use crate::playback::{PlaybackEvent, PlaybackScheduler};
use crate::render::RenderSurface;
use crate::sequence::{SEQUENCE_COUNT, SequenceManager};
use crate::shortcuts::{Key, command_for_key};
use crate::storage::{ImportError, SequenceFile};
use crate::tools::{ToolKind, ToolSettings};
use kurbo::{Point, Size, Vec2};
use log::{debug, info, warn};

/// What one [`Session::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// Status of the transition that was in flight, if any.
    pub animation: Option<AnimationStatus>,
    pub playback: PlaybackEvent,
}

/// Owns the live document and every piece of state around it.
///
/// All input arrives here. Pointer positions are raw stage coordinates and
/// are mapped to canonical canvas coordinates before they reach the
/// document. While a transition runs, edits are dropped.
pub struct Session {
    document: Document,
    drawing: DrawingController,
    sequences: SequenceManager,
    animator: SequenceAnimator,
    playback: PlaybackScheduler,
    settings: Settings,
    camera: Camera,
    side: MapSide,
    image_size: Size,
    surface: Option<Box<dyn RenderSurface>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self {
            document: Document::new(),
            drawing: DrawingController::new(),
            sequences: SequenceManager::new(),
            animator: SequenceAnimator::new(),
            playback: PlaybackScheduler::new(),
            settings,
            camera: Camera::new(),
            side: MapSide::default(),
            image_size: Size::ZERO,
            surface: None,
        }
    }

    /// Attach the surface used for sequence thumbnails.
    pub fn with_surface(mut self, surface: Box<dyn RenderSurface>) -> Self {
        self.surface = Some(surface);
        self
    }

    pub fn set_surface(&mut self, surface: Option<Box<dyn RenderSurface>>) {
        self.surface = surface;
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn sequences(&self) -> &SequenceManager {
        &self.sequences
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings. Durations are clamped; a running transition
    /// keeps the values it started with.
    pub fn set_settings(&mut self, mut settings: Settings) {
        settings.validate_and_clamp();
        self.settings = settings;
    }

    pub fn set_tool_settings(&mut self, settings: ToolSettings) {
        self.document.set_tool_settings(settings);
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn side(&self) -> MapSide {
        self.side
    }

    /// Flip between attack and defense view. Stored coordinates do not
    /// change.
    pub fn toggle_side(&mut self) {
        self.side = self.side.toggled();
        debug!("Viewing map from {:?}", self.side);
    }

    pub fn image_size(&self) -> Size {
        self.image_size
    }

    /// Size of the loaded map image, the pivot for the side flip.
    pub fn set_image_size(&mut self, size: Size) {
        self.image_size = size;
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    /// Map a raw stage pointer position to canonical canvas coordinates.
    pub fn pointer_to_canonical(&self, raw: Point) -> Point {
        let canvas = self.camera.screen_to_canvas(raw);
        self.side.to_canonical(canvas, self.image_size)
    }

    pub fn pointer_down(&mut self, raw: Point) {
        if self.is_animating() {
            return;
        }
        let pos = self.pointer_to_canonical(raw);
        self.drawing.pointer_down(&mut self.document, pos);
    }

    pub fn pointer_move(&mut self, raw: Point, modifiers: Modifiers) {
        if self.is_animating() {
            return;
        }
        let pos = self.pointer_to_canonical(raw);
        self.drawing.pointer_move(&mut self.document, pos, modifiers);
    }

    pub fn pointer_up(&mut self) {
        if self.is_animating() {
            return;
        }
        self.drawing.pointer_up(&mut self.document);
    }

    /// Drop an icon centered under the raw pointer position.
    pub fn place_icon(&mut self, icon: &IconInfo, raw: Point, background: &str) {
        if self.is_animating() {
            return;
        }
        let pos = self.pointer_to_canonical(raw);
        self.drawing.place_icon(&mut self.document, icon, pos, background);
    }

    /// Finish dragging a draggable element by `delta` as one undo step.
    /// Lines and arrows move every vertex.
    pub fn move_element(&mut self, id: &str, delta: Vec2) -> bool {
        if self.is_animating() {
            return false;
        }
        let patch = match self.document.element(id) {
            Some(element) if element.draggable() => match (element.position(), element.points()) {
                (Some(p), _) => ElementPatch::position(p.x + delta.x, p.y + delta.y),
                (None, Some(points)) => ElementPatch::points(
                    points
                        .chunks_exact(2)
                        .flat_map(|xy| [xy[0] + delta.x, xy[1] + delta.y])
                        .collect(),
                ),
                (None, None) => return false,
            },
            _ => return false,
        };
        self.document.start_batch();
        let moved = self.document.update_element(id, &patch);
        self.document.end_batch();
        moved
    }

    /// Drag the anchor at vertex `index` of a line to canonical `pos`.
    ///
    /// The first call opens a batch; [`Session::end_anchor_drag`] closes
    /// it, so the whole drag undoes at once.
    pub fn drag_anchor(&mut self, id: &str, index: usize, pos: Point) -> bool {
        if self.is_animating() || self.document.is_drawing() {
            return false;
        }
        let Some(mut points) = self
            .document
            .element(id)
            .and_then(|e| e.points())
            .map(<[f64]>::to_vec)
        else {
            return false;
        };
        let pen = &self.document.tool_settings().pen;
        if !move_anchor(&mut points, index, pos, pen.max_anchors, pen.min_anchor_step) {
            return false;
        }
        if !self.document.history().in_batch() {
            self.document.start_batch();
        }
        self.document.update_element(id, &ElementPatch::points(points))
    }

    pub fn end_anchor_drag(&mut self) {
        if self.document.history().in_batch() && !self.document.is_drawing() {
            self.document.end_batch();
        }
    }

    /// Start an animated switch to slot `target`. A stroke in progress is
    /// finished first, unless the switch is rejected.
    pub fn switch_sequence(&mut self, target: usize, now: Instant) -> bool {
        if target == self.sequences.active_index() || target >= SEQUENCE_COUNT {
            return false;
        }
        if self.document.is_drawing() && !self.is_animating() {
            self.drawing.cancel(&mut self.document);
        }
        let surface = self
            .surface
            .as_mut()
            .map(|s| s.as_mut() as &mut dyn RenderSurface);
        self.animator
            .start(
                &mut self.document,
                &mut self.sequences,
                target,
                now,
                &self.settings,
                surface,
            )
            .is_some()
    }

    /// Advance the running transition and playback to `now`. Call once
    /// per frame.
    pub fn tick(&mut self, now: Instant) -> TickReport {
        let animation = self
            .animator
            .current_run()
            .map(|run| self.animator.tick(run, &mut self.document, &mut self.sequences, now));
        let surface = self
            .surface
            .as_mut()
            .map(|s| s.as_mut() as &mut dyn RenderSurface);
        let playback = self.playback.tick(
            now,
            &mut self.document,
            &mut self.sequences,
            &mut self.animator,
            &self.settings,
            surface,
        );
        TickReport {
            animation,
            playback,
        }
    }

    /// Apply a keyboard shortcut. Ignored mid-stroke.
    pub fn handle_key(&mut self, key: Key, modifiers: Modifiers, now: Instant) -> bool {
        if self.document.is_drawing() {
            return false;
        }
        match command_for_key(key, modifiers) {
            Some(command) => self.dispatch(command, now),
            None => false,
        }
    }

    /// Apply `command`. Returns whether anything changed.
    pub fn dispatch(&mut self, command: Command, now: Instant) -> bool {
        if command.is_edit() && self.is_animating() {
            debug!("Ignoring {command:?} during a transition");
            return false;
        }
        match command {
            Command::Undo => self.document.undo(),
            Command::Redo => self.document.redo(),
            Command::DeleteSelected => self.document.delete_selected().is_some(),
            Command::ToggleTool(tool) => {
                self.document.toggle_tool(tool);
                true
            }
            Command::SwitchSequence(target) => {
                match target.resolve(self.sequences.active_index(), SEQUENCE_COUNT) {
                    Some(index) => self.switch_sequence(index, now),
                    None => false,
                }
            }
            Command::Play => self.playback.play(),
            Command::Stop => {
                let playing = self.is_playing();
                self.playback.stop();
                playing
            }
            Command::TogglePlayback => {
                if self.is_playing() {
                    self.playback.stop();
                    true
                } else {
                    self.playback.play()
                }
            }
            Command::Escape => {
                self.drawing.cancel(&mut self.document);
                self.document.set_selected_element_id(None);
                self.document.set_active_tool(ToolKind::None);
                true
            }
            Command::ClearSequence(index) => self.clear_sequence(index),
            Command::ClearAll => {
                self.playback.stop();
                self.sequences.clear_all();
                self.document.replace_elements(Vec::new());
                self.document.set_selected_element_id(None);
                self.document.clear_history();
                info!("Cleared all sequences");
                true
            }
        }
    }

    /// Empty slot `index`. Clearing the active slot also clears the live
    /// elements, as an undoable step.
    fn clear_sequence(&mut self, index: usize) -> bool {
        if index >= SEQUENCE_COUNT {
            return false;
        }
        self.sequences.clear_sequence(index);
        if index == self.sequences.active_index() {
            self.document.set_selected_element_id(None);
            self.document.clear_elements();
        }
        true
    }

    /// Snapshot of every slot, with the live elements saved into the active
    /// one first.
    pub fn export_snapshot(&mut self) -> SequenceFile {
        self.sequences.save_current_to_sequence(self.document.elements());
        self.sequences.export_snapshot()
    }

    /// Parse and adopt an exported map, then show the active slot.
    pub fn import_snapshot(&mut self, json: &str) -> Result<(), ImportError> {
        if self.is_animating() {
            warn!("Rejected import during a transition");
            return Err(ImportError::Busy);
        }
        let file = SequenceFile::from_json(json).inspect_err(|e| warn!("Rejected import: {e}"))?;
        self.import_file(file)
    }

    /// Adopt an already-parsed map, then show the active slot.
    pub fn import_file(&mut self, file: SequenceFile) -> Result<(), ImportError> {
        if self.is_animating() {
            return Err(ImportError::Busy);
        }
        self.playback.stop();
        self.drawing.cancel(&mut self.document);
        self.sequences.import_file(file);
        let elements = self
            .sequences
            .get(self.sequences.active_index())
            .map(|slot| slot.elements.clone())
            .unwrap_or_default();
        self.document.replace_elements(elements);
        self.document.set_selected_element_id(None);
        self.document.clear_history();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Element, ElementKind};
    use serde_json::json;
    use std::time::Duration;

    fn session() -> Session {
        let mut session = Session::new(Settings {
            transition_duration_ms: 100,
            hold_time_ms: 100,
            ..Settings::default()
        });
        session.set_image_size(Size::new(1000.0, 800.0));
        session
    }

    fn draw_line(session: &mut Session, from: Point, to: Point) {
        session.dispatch(Command::ToggleTool(ToolKind::Line), Instant::now());
        session.pointer_down(from);
        session.pointer_move(to, Modifiers::NONE);
        session.pointer_up();
        session.dispatch(Command::ToggleTool(ToolKind::Line), Instant::now());
    }

    fn finish(session: &mut Session, now: Instant) -> Instant {
        let mut now = now;
        while session.is_animating() {
            now += Duration::from_millis(50);
            session.tick(now);
        }
        now
    }

    #[test]
    fn test_pointer_mapping_on_defense() {
        let mut s = session();
        s.camera_mut().pan(Vec2::new(10.0, 20.0));
        assert_eq!(s.pointer_to_canonical(Point::new(110.0, 120.0)), Point::new(100.0, 100.0));

        s.toggle_side();
        assert_eq!(s.pointer_to_canonical(Point::new(110.0, 120.0)), Point::new(900.0, 700.0));
    }

    #[test]
    fn test_draw_on_defense_stores_canonical_points() {
        let mut s = session();
        s.toggle_side();
        draw_line(&mut s, Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert_eq!(
            s.document().elements()[0].points().unwrap(),
            &[1000.0, 800.0, 900.0, 800.0]
        );
    }

    #[test]
    fn test_switch_and_return() {
        let mut s = session();
        let t0 = Instant::now();
        draw_line(&mut s, Point::new(0.0, 0.0), Point::new(50.0, 50.0));

        assert!(s.dispatch(Command::SwitchSequence(SequenceTarget::Relative(1)), t0));
        assert!(!s.document().can_undo());
        let now = finish(&mut s, t0);
        assert_eq!(s.sequences().active_index(), 1);
        // empty target slot starts as a copy
        assert_eq!(s.document().elements().len(), 1);

        s.dispatch(Command::ClearSequence(1), now);
        assert!(s.document().elements().is_empty());
        assert!(s.document().can_undo());

        s.dispatch(Command::SwitchSequence(SequenceTarget::Absolute(0)), now);
        finish(&mut s, now);
        assert_eq!(s.sequences().active_index(), 0);
        assert_eq!(s.document().elements().len(), 1);
    }

    #[test]
    fn test_edits_ignored_while_animating() {
        let mut s = session();
        let t0 = Instant::now();
        draw_line(&mut s, Point::new(0.0, 0.0), Point::new(50.0, 50.0));
        s.dispatch(Command::SwitchSequence(SequenceTarget::Absolute(3)), t0);
        assert!(s.is_animating());

        assert!(!s.dispatch(Command::ToggleTool(ToolKind::Pen), t0));
        assert_eq!(s.document().active_tool(), ToolKind::None);
        s.pointer_down(Point::new(5.0, 5.0));
        assert!(!s.document().is_drawing());
        assert!(!s.dispatch(Command::SwitchSequence(SequenceTarget::Absolute(4)), t0));
        assert!(matches!(
            s.import_snapshot(r#"{"version": "2.0", "sequences": []}"#),
            Err(ImportError::Busy)
        ));
    }

    #[test]
    fn test_escape_clears_selection_and_tool() {
        let mut s = session();
        draw_line(&mut s, Point::new(0.0, 0.0), Point::new(50.0, 50.0));
        s.pointer_down(Point::new(25.0, 25.0));
        assert!(s.document().selected_element_id().is_some());
        s.dispatch(Command::ToggleTool(ToolKind::Circle), Instant::now());

        s.handle_key(Key::Escape, Modifiers::NONE, Instant::now());
        assert_eq!(s.document().selected_element_id(), None);
        assert_eq!(s.document().active_tool(), ToolKind::None);
    }

    #[test]
    fn test_delete_key_and_undo_shortcut() {
        let mut s = session();
        let now = Instant::now();
        draw_line(&mut s, Point::new(0.0, 0.0), Point::new(50.0, 50.0));
        s.pointer_down(Point::new(25.0, 25.0));
        assert!(s.handle_key(Key::Delete, Modifiers::NONE, now));
        assert!(s.document().elements().is_empty());

        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        };
        assert!(s.handle_key(Key::Character('z'), ctrl, now));
        assert_eq!(s.document().elements().len(), 1);
    }

    #[test]
    fn test_shortcuts_ignored_mid_stroke() {
        let mut s = session();
        s.dispatch(Command::ToggleTool(ToolKind::Pen), Instant::now());
        s.pointer_down(Point::new(0.0, 0.0));
        assert!(!s.handle_key(Key::Character('e'), Modifiers::NONE, Instant::now()));
        assert_eq!(s.document().active_tool(), ToolKind::Pen);
    }

    #[test]
    fn test_space_plays_and_stops() {
        let mut s = session();
        let t0 = Instant::now();
        assert!(s.handle_key(Key::Space, Modifiers::NONE, t0));
        assert!(s.is_playing());
        let report = s.tick(t0);
        assert_eq!(report.playback, PlaybackEvent::TransitionStarted(1));
        assert!(s.handle_key(Key::Space, Modifiers::NONE, t0));
        assert!(!s.is_playing());
    }

    #[test]
    fn test_move_element_is_one_step() {
        let mut s = session();
        draw_line(&mut s, Point::new(0.0, 0.0), Point::new(50.0, 50.0));
        let id = s.document().elements()[0].id().to_string();
        let before = s.document().history().undo_len();

        assert!(s.move_element(&id, Vec2::new(10.0, 5.0)));
        assert_eq!(
            s.document().elements()[0].points().unwrap(),
            &[10.0, 5.0, 60.0, 55.0]
        );
        assert_eq!(s.document().history().undo_len(), before + 1);
        assert!(!s.move_element("missing", Vec2::ZERO));
    }

    #[test]
    fn test_anchor_drag_undoes_at_once() {
        let mut s = session();
        draw_line(&mut s, Point::new(0.0, 0.0), Point::new(50.0, 50.0));
        let id = s.document().elements()[0].id().to_string();

        assert!(s.drag_anchor(&id, 1, Point::new(60.0, 50.0)));
        assert!(s.drag_anchor(&id, 1, Point::new(70.0, 50.0)));
        s.end_anchor_drag();
        assert_eq!(
            s.document().elements()[0].points().unwrap(),
            &[0.0, 0.0, 70.0, 50.0]
        );

        s.dispatch(Command::Undo, Instant::now());
        assert_eq!(
            s.document().elements()[0].points().unwrap(),
            &[0.0, 0.0, 50.0, 50.0]
        );
    }

    #[test]
    fn test_anchor_drag_cut_by_transition_is_not_undoable() {
        let mut s = session();
        let t0 = Instant::now();
        draw_line(&mut s, Point::new(0.0, 0.0), Point::new(50.0, 50.0));
        let id = s.document().elements()[0].id().to_string();

        assert!(s.drag_anchor(&id, 1, Point::new(70.0, 50.0)));
        assert!(s.switch_sequence(1, t0));
        finish(&mut s, t0);
        s.end_anchor_drag();

        assert!(!s.document().can_undo());
        assert!(!s.dispatch(Command::Undo, t0));
        assert_eq!(s.sequences().active_index(), 1);
    }

    #[test]
    fn test_rejected_switch_keeps_stroke() {
        let mut s = session();
        let t0 = Instant::now();
        s.dispatch(Command::ToggleTool(ToolKind::Pen), t0);
        s.pointer_down(Point::new(0.0, 0.0));

        assert!(!s.switch_sequence(0, t0));
        assert!(!s.switch_sequence(SEQUENCE_COUNT, t0));
        assert!(s.document().is_drawing());
        assert!(s.document().history().in_batch());
    }

    #[test]
    fn test_import_shows_active_slot() {
        let mut s = session();
        let t0 = Instant::now();
        s.dispatch(Command::SwitchSequence(SequenceTarget::Absolute(2)), t0);
        finish(&mut s, t0);

        let mut sequences = vec![json!({"elements": [], "thumbnail": null}); 10];
        sequences[2] = json!({
            "elements": [{"id": "r", "type": "rectangle", "x": 1, "y": 1, "width": 5, "height": 5}],
            "thumbnail": null
        });
        let file = json!({
            "version": "2.0",
            "timestamp": "2024-01-01T00:00:00Z",
            "sequences": sequences
        });
        s.import_snapshot(&file.to_string()).unwrap();

        assert_eq!(s.sequences().active_index(), 2);
        assert_eq!(s.document().elements().len(), 1);
        assert_eq!(s.document().elements()[0].kind(), ElementKind::Rectangle);
        assert!(!s.document().can_undo());
    }

    #[test]
    fn test_export_includes_live_edits() {
        let mut s = session();
        draw_line(&mut s, Point::new(0.0, 0.0), Point::new(50.0, 50.0));
        let file = s.export_snapshot();
        assert_eq!(file.sequences[0].elements.len(), 1);
        assert!(matches!(file.sequences[0].elements[0], Element::Line(_)));
    }

    #[test]
    fn test_clear_all() {
        let mut s = session();
        draw_line(&mut s, Point::new(0.0, 0.0), Point::new(50.0, 50.0));
        s.export_snapshot();
        assert!(s.dispatch(Command::ClearAll, Instant::now()));
        assert!(s.document().elements().is_empty());
        assert!(s.sequences().slots().iter().all(|slot| slot.is_empty()));
        assert!(!s.document().can_undo());
    }
}
