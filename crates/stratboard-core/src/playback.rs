//! Automatic playback through the remaining sequence slots.

use crate::animation::{Instant, RunToken, SequenceAnimator};
use crate::config::Settings;
use crate::document::Document;
use crate::render::RenderSurface;
use crate::sequence::{SEQUENCE_COUNT, SequenceManager};
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    /// Start the next transition once the animator is free.
    Ready,
    /// Waiting for our transition to finish.
    Transitioning(RunToken),
    /// Showing the reached slot until `until`.
    Holding { until: Instant },
}

/// What a [`PlaybackScheduler::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    Idle,
    /// A transition toward this slot began.
    TransitionStarted(usize),
    /// Playback reached the last slot or was stopped.
    Ended,
}

/// Advances one slot at a time: transition, hold, repeat, until the last
/// slot. Stopping lets the transition in flight finish but starts no more.
#[derive(Debug, Clone, Default)]
pub struct PlaybackScheduler {
    phase: Option<Phase>,
}

impl PlaybackScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.phase.is_some()
    }

    /// Begin playing from the slot after the active one. No-op if already
    /// playing.
    pub fn play(&mut self) -> bool {
        if self.is_playing() {
            return false;
        }
        debug!("Playback started");
        self.phase = Some(Phase::Ready);
        true
    }

    /// Cancel playback. Any transition already running still completes.
    pub fn stop(&mut self) {
        if self.phase.take().is_some() {
            debug!("Playback stopped");
        }
    }

    /// Advance playback for `now`. The animator itself is ticked by the
    /// caller.
    pub fn tick(
        &mut self,
        now: Instant,
        doc: &mut Document,
        sequences: &mut SequenceManager,
        animator: &mut SequenceAnimator,
        settings: &Settings,
        surface: Option<&mut dyn RenderSurface>,
    ) -> PlaybackEvent {
        let Some(phase) = self.phase else {
            return PlaybackEvent::Idle;
        };

        match phase {
            Phase::Transitioning(run) => {
                if animator.current_run() != Some(run) {
                    self.phase = Some(Phase::Holding {
                        until: now + settings.hold_time(),
                    });
                }
                PlaybackEvent::Idle
            }
            Phase::Holding { until } => {
                if now < until {
                    return PlaybackEvent::Idle;
                }
                self.phase = Some(Phase::Ready);
                self.start_next(now, doc, sequences, animator, settings, surface)
            }
            Phase::Ready => self.start_next(now, doc, sequences, animator, settings, surface),
        }
    }

    fn start_next(
        &mut self,
        now: Instant,
        doc: &mut Document,
        sequences: &mut SequenceManager,
        animator: &mut SequenceAnimator,
        settings: &Settings,
        surface: Option<&mut dyn RenderSurface>,
    ) -> PlaybackEvent {
        if animator.is_animating() {
            return PlaybackEvent::Idle;
        }
        let target = sequences.active_index() + 1;
        if target >= SEQUENCE_COUNT {
            self.phase = None;
            debug!("Playback reached the last sequence");
            return PlaybackEvent::Ended;
        }
        match animator.start(doc, sequences, target, now, settings, surface) {
            Some(run) => {
                self.phase = Some(Phase::Transitioning(run));
                PlaybackEvent::TransitionStarted(target)
            }
            None => {
                self.phase = None;
                PlaybackEvent::Ended
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimationStatus;
    use std::time::Duration;

    struct Rig {
        doc: Document,
        seqs: SequenceManager,
        animator: SequenceAnimator,
        playback: PlaybackScheduler,
        settings: Settings,
    }

    impl Rig {
        fn new(start: usize) -> Self {
            let mut seqs = SequenceManager::new();
            seqs.set_active_index(start);
            Self {
                doc: Document::new(),
                seqs,
                animator: SequenceAnimator::new(),
                playback: PlaybackScheduler::new(),
                settings: Settings {
                    transition_duration_ms: 100,
                    hold_time_ms: 200,
                    ..Settings::default()
                },
            }
        }

        /// Tick the animator, then playback, the way a session frame does.
        fn frame(&mut self, now: Instant) -> PlaybackEvent {
            if let Some(run) = self.animator.current_run() {
                let status = self.animator.tick(run, &mut self.doc, &mut self.seqs, now);
                assert_ne!(status, AnimationStatus::Stale);
            }
            self.playback.tick(
                now,
                &mut self.doc,
                &mut self.seqs,
                &mut self.animator,
                &self.settings,
                None,
            )
        }
    }

    #[test]
    fn test_plays_to_the_end() {
        let mut rig = Rig::new(7);
        let t0 = Instant::now();
        assert!(rig.playback.play());

        let mut started = Vec::new();
        for step in 0..40 {
            match rig.frame(t0 + Duration::from_millis(step * 50)) {
                PlaybackEvent::TransitionStarted(i) => started.push(i),
                PlaybackEvent::Ended => break,
                PlaybackEvent::Idle => {}
            }
        }
        assert_eq!(started, vec![8, 9]);
        assert_eq!(rig.seqs.active_index(), 9);
        assert!(!rig.playback.is_playing());
    }

    #[test]
    fn test_stop_during_hold() {
        let mut rig = Rig::new(2);
        let t0 = Instant::now();
        rig.playback.play();

        let mut now = t0;
        while rig.seqs.active_index() < 4 {
            rig.frame(now);
            now += Duration::from_millis(50);
        }
        // 4 reached and holding
        assert!(!rig.animator.is_animating());
        rig.playback.stop();
        assert!(!rig.playback.is_playing());

        for _ in 0..20 {
            assert_eq!(rig.frame(now), PlaybackEvent::Idle);
            now += Duration::from_millis(50);
        }
        assert_eq!(rig.seqs.active_index(), 4);
        assert!(!rig.playback.is_playing());
    }

    #[test]
    fn test_stop_mid_transition_lets_it_finish() {
        let mut rig = Rig::new(0);
        let t0 = Instant::now();
        rig.playback.play();
        assert_eq!(rig.frame(t0), PlaybackEvent::TransitionStarted(1));

        rig.playback.stop();
        rig.frame(t0 + Duration::from_millis(50));
        rig.frame(t0 + Duration::from_millis(150));
        assert_eq!(rig.seqs.active_index(), 1);
        rig.frame(t0 + Duration::from_millis(1000));
        assert_eq!(rig.seqs.active_index(), 1);
    }

    #[test]
    fn test_play_from_last_slot_ends_at_once() {
        let mut rig = Rig::new(SEQUENCE_COUNT - 1);
        rig.playback.play();
        assert_eq!(rig.frame(Instant::now()), PlaybackEvent::Ended);
        assert!(!rig.playback.is_playing());
    }

    #[test]
    fn test_play_twice_is_noop() {
        let mut playback = PlaybackScheduler::new();
        assert!(playback.play());
        assert!(!playback.play());
    }

    #[test]
    fn test_holds_between_transitions() {
        let mut rig = Rig::new(0);
        let t0 = Instant::now();
        rig.playback.play();
        rig.frame(t0);
        // transition done at 100ms, hold until 300ms
        rig.frame(t0 + Duration::from_millis(100));
        assert_eq!(rig.seqs.active_index(), 1);
        assert_eq!(rig.frame(t0 + Duration::from_millis(250)), PlaybackEvent::Idle);
        assert!(!rig.animator.is_animating());
        assert_eq!(
            rig.frame(t0 + Duration::from_millis(300)),
            PlaybackEvent::TransitionStarted(2)
        );
    }
}
