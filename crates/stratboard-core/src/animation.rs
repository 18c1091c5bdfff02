//! Animated transitions between sequence slots.
//!
//! [`SequenceAnimator`] is a small state machine (Idle, then Animating, then
//! Idle again) advanced by explicit [`SequenceAnimator::tick`] calls from the
//! host's frame callback. The published frame is a pure function of elapsed
//! time, so skipped frames need no catching up.

use crate::config::Settings;
use crate::document::Document;
use crate::elements::Element;
use crate::geometry::lerp;
use crate::render::RenderSurface;
use crate::sequence::{SEQUENCE_COUNT, SequenceManager};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::f64::consts::PI;
use std::str::FromStr;
use std::time::Duration;

// Use web-time on WASM, std::time otherwise
#[cfg(target_arch = "wasm32")]
pub use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
pub use std::time::Instant;

/// Removed elements are dropped once their fade reaches this opacity.
pub const FADE_OUT_THRESHOLD: f64 = 0.5;

/// Progress curve of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
    /// Damped overshoot.
    Spring,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::Spring => 1.0 - (t * PI * 4.0).cos() * (-t * 5.0).exp(),
        }
    }
}

impl FromStr for Easing {
    type Err = String;

    /// Parse the kebab-case name used in settings files.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Easing::Linear),
            "ease-in" => Ok(Easing::EaseIn),
            "ease-out" => Ok(Easing::EaseOut),
            "ease-in-out" => Ok(Easing::EaseInOut),
            "spring" => Ok(Easing::Spring),
            other => Err(format!(
                "unknown easing `{other}` (expected linear, ease-in, ease-out, ease-in-out or spring)"
            )),
        }
    }
}

/// Pairwise interpolation of flat point lists. The shorter list borrows the
/// other list's value past its end.
fn lerp_points(a: &[f64], b: &[f64], t: f64) -> Vec<f64> {
    let len = a.len().max(b.len());
    (0..len)
        .map(|i| {
            let from = a.get(i).or(b.get(i)).copied().unwrap_or(0.0);
            let to = b.get(i).or(a.get(i)).copied().unwrap_or(0.0);
            lerp(from, to, t)
        })
        .collect()
}

/// Blend one element present on both sides.
fn lerp_element(from: &Element, to: &Element, t: f64) -> Element {
    let mut out = to.clone();
    match (from, &mut out) {
        (Element::Line(a), Element::Line(b)) => {
            b.points = lerp_points(&a.points, &b.points, t);
            b.stroke_width = lerp(a.stroke_width, b.stroke_width, t);
        }
        (Element::Arrow(a), Element::Arrow(b)) => {
            b.points = lerp_points(&a.points, &b.points, t);
            b.stroke_width = lerp(a.stroke_width, b.stroke_width, t);
        }
        (Element::Rectangle(a), Element::Rectangle(b)) => {
            b.x = lerp(a.x, b.x, t);
            b.y = lerp(a.y, b.y, t);
            b.width = lerp(a.width, b.width, t);
            b.height = lerp(a.height, b.height, t);
            b.stroke_width = lerp(a.stroke_width, b.stroke_width, t);
        }
        (Element::Circle(a), Element::Circle(b)) => {
            b.x = lerp(a.x, b.x, t);
            b.y = lerp(a.y, b.y, t);
            b.radius_x = lerp(a.radius_x, b.radius_x, t);
            b.radius_y = lerp(a.radius_y, b.radius_y, t);
            b.stroke_width = lerp(a.stroke_width, b.stroke_width, t);
        }
        (Element::Text(a), Element::Text(b)) => {
            b.x = lerp(a.x, b.x, t);
            b.y = lerp(a.y, b.y, t);
            b.width = lerp(a.width, b.width, t);
            b.height = lerp(a.height, b.height, t);
        }
        (Element::Image(a), Element::Image(b)) => {
            b.x = lerp(a.x, b.x, t);
            b.y = lerp(a.y, b.y, t);
            b.width = lerp(a.width, b.width, t);
            b.height = lerp(a.height, b.height, t);
        }
        // kind changed under the same id: only shared fields move
        (from, out) => {
            if let (Some(p), Some(q)) = (from.position(), out.position()) {
                out.set_position(p.lerp(q, t));
            }
        }
    }
    out.set_opacity(lerp(from.opacity(), to.opacity(), t));
    out
}

/// The frame at progress `t` of a transition from `from` to `to`.
///
/// Matched ids are blended, new ids fade in from 0 and removed ids fade out
/// until they reach [`FADE_OUT_THRESHOLD`]. Destination order comes first,
/// fading elements are drawn after it.
pub fn interpolate_elements(from: &[Element], to: &[Element], t: f64) -> Vec<Element> {
    let to_ids: HashSet<&str> = to.iter().map(Element::id).collect();
    let mut result = Vec::with_capacity(to.len() + from.len());

    for target in to {
        match from.iter().find(|e| e.id() == target.id()) {
            Some(source) => result.push(lerp_element(source, target, t)),
            None => {
                let mut entering = target.clone();
                entering.set_opacity(lerp(0.0, target.opacity(), t));
                result.push(entering);
            }
        }
    }

    for source in from.iter().filter(|e| !to_ids.contains(e.id())) {
        let opacity = lerp(source.opacity(), 0.0, t);
        if opacity > FADE_OUT_THRESHOLD {
            let mut exiting = source.clone();
            exiting.set_opacity(opacity);
            result.push(exiting);
        }
    }

    result
}

/// Identifies one animation run. Ticks from a superseded run are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunToken(u64);

/// Outcome of a [`SequenceAnimator::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationStatus {
    /// No transition for this token.
    Stale,
    /// Frame published at raw progress `progress` in `[0, 1)`.
    Running { progress: f64 },
    /// Destination adopted; `index` is now active.
    Finished { index: usize },
}

#[derive(Debug, Clone)]
struct Transition {
    run: RunToken,
    target: usize,
    from: Vec<Element>,
    to: Vec<Element>,
    started: Instant,
    duration: Duration,
    easing: Easing,
}

#[derive(Debug, Clone, Default)]
enum AnimatorState {
    #[default]
    Idle,
    Animating(Transition),
}

/// Drives one transition at a time between sequence slots.
#[derive(Debug, Clone, Default)]
pub struct SequenceAnimator {
    state: AnimatorState,
    next_run: u64,
}

impl SequenceAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, AnimatorState::Animating(_))
    }

    /// Token of the transition in flight.
    pub fn current_run(&self) -> Option<RunToken> {
        match &self.state {
            AnimatorState::Animating(transition) => Some(transition.run),
            AnimatorState::Idle => None,
        }
    }

    /// Slot the running transition is heading to.
    pub fn target(&self) -> Option<usize> {
        match &self.state {
            AnimatorState::Animating(transition) => Some(transition.target),
            AnimatorState::Idle => None,
        }
    }

    /// Begin a transition from the active slot to `target`.
    ///
    /// Returns `None` while another transition runs, or when `target` is
    /// already active or out of range. Otherwise the current slot gets a
    /// fresh thumbnail and the live elements, and undo history is cleared.
    pub fn start(
        &mut self,
        doc: &mut Document,
        sequences: &mut SequenceManager,
        target: usize,
        now: Instant,
        settings: &Settings,
        surface: Option<&mut dyn RenderSurface>,
    ) -> Option<RunToken> {
        if self.is_animating() {
            debug!("Ignoring switch to sequence {target}: a transition is running");
            return None;
        }
        let current = sequences.active_index();
        if target == current || target >= SEQUENCE_COUNT {
            debug!("Ignoring switch to sequence {target} from {current}");
            return None;
        }

        if let Some(surface) = surface {
            match surface.capture_thumbnail(doc.elements()) {
                Ok(url) => sequences.update_thumbnail(current, Some(url)),
                Err(e) => warn!("Thumbnail capture for sequence {current} failed: {e}"),
            }
        }
        sequences.save_current_to_sequence(doc.elements());

        let from = doc.elements().to_vec();
        let to = match sequences.get(target) {
            Some(slot) if !slot.is_empty() => slot.elements.clone(),
            _ => from.clone(),
        };

        doc.set_selected_element_id(None);
        doc.clear_history();

        let run = RunToken(self.next_run);
        self.next_run += 1;
        self.state = AnimatorState::Animating(Transition {
            run,
            target,
            from,
            to,
            started: now,
            duration: settings.transition_duration(),
            easing: settings.easing,
        });
        debug!("Transition {current} -> {target} started");
        Some(run)
    }

    /// Publish the frame for `now`. Finishing adopts the destination
    /// exactly, activates the target slot and saves into it.
    pub fn tick(
        &mut self,
        run: RunToken,
        doc: &mut Document,
        sequences: &mut SequenceManager,
        now: Instant,
    ) -> AnimationStatus {
        let AnimatorState::Animating(transition) = &self.state else {
            return AnimationStatus::Stale;
        };
        if transition.run != run {
            return AnimationStatus::Stale;
        }

        let progress = if transition.duration.is_zero() {
            1.0
        } else {
            let elapsed = now.saturating_duration_since(transition.started);
            (elapsed.as_secs_f64() / transition.duration.as_secs_f64()).clamp(0.0, 1.0)
        };

        if progress < 1.0 {
            let eased = transition.easing.apply(progress);
            doc.replace_elements(interpolate_elements(&transition.from, &transition.to, eased));
            return AnimationStatus::Running { progress };
        }

        let AnimatorState::Animating(transition) = std::mem::take(&mut self.state) else {
            return AnimationStatus::Stale;
        };
        doc.replace_elements(transition.to);
        sequences.set_active_index(transition.target);
        sequences.save_current_to_sequence(doc.elements());
        debug!("Transition to sequence {} finished", transition.target);
        AnimationStatus::Finished {
            index: transition.target,
        }
    }
}
