//! The carousel engine: a padded [`Track`], the index into it and the
//! single transition function every input channel goes through.
//!
//! The track keeps `slides_per_view` clones on each side of the real
//! slides. Moves may land on a clone; once the move has settled the index
//! is snapped back onto the real slide with the same content, which looks
//! identical, so the loop never visibly ends.

use crate::a11y::{self, IndicatorA11y, SlideA11y};
use crate::autoplay::{Autoplay, PauseSource};
use crate::config::CarouselConfig;
use crate::drag::{DragGesture, DragOutcome};
use crate::error::CarouselError;
use crate::geometry::Geometry;
use crate::track::Track;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselState {
    pub slides_per_view: usize,
    pub slide_width: f64,
    pub current_index: usize,
    pub is_paused: bool,
    pub is_dragging: bool,
}

/// Horizontal translation of the track and whether it should transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Presentation {
    pub offset_px: f64,
    pub animated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    /// Autoplay timer fired.
    Tick,
    Next,
    Prev,
    /// Indicator click, carrying the real slide ordinal.
    GoTo(usize),
    DragStart { pointer_id: i32, x: f64 },
    DragTo { pointer_id: i32, x: f64 },
    DragRelease { pointer_id: i32 },
    /// The track finished its transition.
    Settle,
    /// Debounced viewport width.
    Resize(f64),
    HoverStart,
    HoverEnd,
    FocusIn,
    FocusOut,
}

impl Intent {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowRight" => Some(Self::Next),
            "ArrowLeft" => Some(Self::Prev),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Carousel {
    track: Track,
    state: CarouselState,
    drag: Option<DragGesture>,
    autoplay: Autoplay,
    reduced_motion: bool,
    presentation: Presentation,
}

impl Carousel {
    pub fn new(
        original_count: usize,
        viewport_width: f64,
        config: &CarouselConfig,
    ) -> Result<Self, CarouselError> {
        if original_count == 0 {
            return Err(CarouselError::NoSlides);
        }

        let geometry = Geometry::resolve_clamped(viewport_width, original_count);
        let track = Track::new(original_count, geometry.slides_per_view)?;
        let current_index = geometry.slides_per_view;

        let mut carousel = Self {
            track,
            state: CarouselState {
                slides_per_view: geometry.slides_per_view,
                slide_width: geometry.slide_width,
                current_index,
                is_paused: false,
                is_dragging: false,
            },
            drag: None,
            autoplay: Autoplay::new(config.autoplay_interval_ms),
            reduced_motion: config.reduced_motion,
            presentation: Presentation {
                offset_px: 0.0,
                animated: false,
            },
        };
        carousel.go_to(current_index, false);
        Ok(carousel)
    }

    pub fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::Tick => {
                if self.autoplay.is_running() {
                    self.next();
                }
            }
            Intent::Next => {
                self.autoplay.pause(PauseSource::Interaction);
                self.next();
            }
            Intent::Prev => {
                self.autoplay.pause(PauseSource::Interaction);
                self.prev();
            }
            Intent::GoTo(ordinal) => {
                self.autoplay.pause(PauseSource::Interaction);
                if ordinal >= self.track.original_count() {
                    log::debug!("ignoring indicator {} out of range", ordinal);
                } else if self.can_move() {
                    self.go_to(ordinal + self.state.slides_per_view, true);
                }
            }
            Intent::DragStart { pointer_id, x } => self.start_drag(pointer_id, x),
            Intent::DragTo { pointer_id, x } => self.drag_to(pointer_id, x),
            Intent::DragRelease { pointer_id } => self.release_drag(pointer_id),
            Intent::Settle => {
                if self.drag.is_none() {
                    self.normalize();
                }
            }
            Intent::Resize(width) => self.resize(width),
            Intent::HoverStart => self.autoplay.pause(PauseSource::Hover),
            Intent::HoverEnd => {
                self.autoplay.resume(PauseSource::Hover);
            }
            Intent::FocusIn => self.autoplay.pause(PauseSource::Focus),
            Intent::FocusOut => {
                self.autoplay.resume(PauseSource::Focus);
            }
        }
        self.state.is_paused = self.autoplay.is_paused();
        self.state.is_dragging = self.drag.is_some();
    }

    /// Moves to track position `index`. Without a transition there is no
    /// settle event to wait for, so the index is normalized right away.
    pub fn go_to(&mut self, index: usize, animate: bool) {
        self.state.current_index = index;
        self.presentation = Presentation {
            offset_px: self.offset_for(index),
            animated: animate && !self.reduced_motion,
        };
        if !self.presentation.animated {
            self.normalize();
        }
    }

    pub fn next(&mut self) {
        if !self.can_move() {
            return;
        }
        // Already on the last clone: the snap back has to wait for the settle.
        if self.state.current_index + 1 > self.track.len() - self.state.slides_per_view {
            log::debug!("next waits for settle at {}", self.state.current_index);
            return;
        }
        self.go_to(self.state.current_index + 1, true);
    }

    pub fn prev(&mut self) {
        if !self.can_move() {
            return;
        }
        if self.state.current_index == 0 {
            log::debug!("prev waits for settle at the first clone");
            return;
        }
        self.go_to(self.state.current_index - 1, true);
    }

    /// Snaps an index resting on a clone onto the real slide it copies.
    /// Returns whether the index changed.
    pub fn normalize(&mut self) -> bool {
        let count = self.track.original_count();
        let real = self.track.real_range();
        let index = self.state.current_index;

        let normalized = if index >= real.end {
            index - count
        } else if index < real.start {
            index + count
        } else {
            return false;
        };

        self.state.current_index = normalized;
        self.presentation = Presentation {
            offset_px: self.offset_for(normalized),
            animated: false,
        };
        true
    }

    /// Ordinal of the first real slide in view, in `0..original_count`.
    pub fn real_index(&self) -> usize {
        let count = self.track.original_count() as isize;
        let relative = self.state.current_index as isize - self.state.slides_per_view as isize;
        relative.rem_euclid(count) as usize
    }

    /// Rebuilds the track for a new viewport width, keeping the leading
    /// real slide in front.
    pub fn resize(&mut self, viewport_width: f64) {
        let real = self.real_index();

        if self.drag.take().is_some() {
            log::debug!("resize abandoned an active drag");
            self.autoplay.resume(PauseSource::Drag);
        }

        let geometry = Geometry::resolve_clamped(viewport_width, self.track.original_count());
        if let Err(err) = self.track.rebuild(geometry.slides_per_view) {
            log::warn!("keeping previous track: {}", err);
            return;
        }
        if geometry.slides_per_view != self.state.slides_per_view {
            log::debug!(
                "slides per view {} -> {} at {}px",
                self.state.slides_per_view,
                geometry.slides_per_view,
                viewport_width
            );
        }

        self.state.slides_per_view = geometry.slides_per_view;
        self.state.slide_width = geometry.slide_width;
        self.go_to(real + geometry.slides_per_view, false);
    }

    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn presentation(&self) -> Presentation {
        self.presentation
    }

    pub fn autoplay(&self) -> &Autoplay {
        &self.autoplay
    }

    pub fn is_settled(&self) -> bool {
        self.drag.is_none() && self.track.real_range().contains(&self.state.current_index)
    }

    pub fn slide_a11y(&self) -> Vec<SlideA11y> {
        a11y::slide_states(
            self.track.len(),
            self.state.current_index,
            self.state.slides_per_view,
        )
    }

    pub fn indicator_a11y(&self) -> Vec<IndicatorA11y> {
        a11y::indicator_states(self.track.original_count(), self.real_index())
    }

    /// Moves wait for a measured viewport and for any drag to be released.
    fn can_move(&self) -> bool {
        self.state.slide_width > 0.0 && self.drag.is_none()
    }

    fn offset_for(&self, index: usize) -> f64 {
        -(index as f64) * self.state.slide_width
    }

    fn start_drag(&mut self, pointer_id: i32, x: f64) {
        if self.drag.is_some() {
            return;
        }
        self.normalize();
        self.autoplay.pause(PauseSource::Drag);
        self.drag = Some(DragGesture::new(pointer_id, x));
        self.presentation.animated = false;
    }

    fn drag_to(&mut self, pointer_id: i32, x: f64) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        if drag.pointer_id != pointer_id {
            return;
        }
        drag.current_x = x;
        let delta = drag.delta();
        // Live preview only; the index is committed on release.
        self.presentation = Presentation {
            offset_px: self.offset_for(self.state.current_index) + delta,
            animated: false,
        };
    }

    fn release_drag(&mut self, pointer_id: i32) {
        let Some(drag) = self.drag else {
            return;
        };
        if drag.pointer_id != pointer_id {
            return;
        }
        self.drag = None;

        match drag.outcome(self.state.slide_width) {
            DragOutcome::Next if self.can_move() => self.next(),
            DragOutcome::Prev if self.can_move() => self.prev(),
            _ => self.go_to(self.state.current_index, true),
        }
        self.autoplay.resume(PauseSource::Drag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn config() -> CarouselConfig {
        CarouselConfig::default()
    }

    fn carousel(count: usize, width: f64) -> Carousel {
        Carousel::new(count, width, &config()).unwrap()
    }

    fn settled(carousel: &mut Carousel, intent: Intent) {
        carousel.apply(intent);
        carousel.apply(Intent::Settle);
    }

    fn drag(carousel: &mut Carousel, dx: f64) {
        carousel.apply(Intent::DragStart { pointer_id: 7, x: 300.0 });
        carousel.apply(Intent::DragTo { pointer_id: 7, x: 300.0 + dx });
        carousel.apply(Intent::DragRelease { pointer_id: 7 });
    }

    fn assert_invariants(carousel: &Carousel) {
        let state = carousel.state();
        let track = carousel.track();
        assert_eq!(track.len(), track.original_count() + 2 * state.slides_per_view);
        assert!(state.current_index <= track.len());
        if carousel.drag.is_none() && !carousel.presentation().animated {
            assert!(track.real_range().contains(&state.current_index));
        }
        if carousel.drag.is_some() {
            assert!(track.real_range().contains(&state.current_index));
        }
    }

    #[test]
    fn initial_state_shows_first_real_slide() {
        let carousel = carousel(5, 1200.0);
        assert_eq!(carousel.track().len(), 11);
        assert_eq!(carousel.state().current_index, 3);
        assert_eq!(carousel.real_index(), 0);
        assert_eq!(
            carousel.presentation(),
            Presentation {
                offset_px: -1200.0,
                animated: false
            }
        );
    }

    #[test]
    fn no_slides_is_rejected() {
        assert_eq!(
            Carousel::new(0, 1200.0, &config()),
            Err(CarouselError::NoSlides)
        );
    }

    #[test]
    fn too_few_slides_clamps_slides_per_view() {
        let carousel = carousel(2, 1200.0);
        assert_eq!(carousel.state().slides_per_view, 2);
        assert_eq!(carousel.track().len(), 6);
    }

    #[test]
    fn next_animates_then_settles_from_clone() {
        let mut carousel = carousel(5, 1200.0);
        for _ in 0..4 {
            settled(&mut carousel, Intent::Tick);
        }
        assert_eq!(carousel.state().current_index, 7);

        carousel.apply(Intent::Tick);
        assert_eq!(carousel.state().current_index, 8);
        assert!(carousel.presentation().animated);
        assert_eq!(carousel.real_index(), 0);

        carousel.apply(Intent::Settle);
        assert_eq!(carousel.state().current_index, 3);
        assert_eq!(
            carousel.presentation(),
            Presentation {
                offset_px: -1200.0,
                animated: false
            }
        );
    }

    #[test]
    fn prev_from_first_wraps_to_last() {
        let mut carousel = carousel(5, 1200.0);
        settled(&mut carousel, Intent::Prev);
        assert_eq!(carousel.state().current_index, 7);
        assert_eq!(carousel.real_index(), 4);
    }

    #[test]
    fn next_original_count_times_loops_back() {
        for width in [320.0, 800.0, 1200.0] {
            let mut carousel = carousel(5, width);
            let start = carousel.state().current_index;
            for _ in 0..5 {
                settled(&mut carousel, Intent::Next);
            }
            assert_eq!(carousel.state().current_index, start, "width {width}");
        }
    }

    #[test]
    fn reduced_motion_normalizes_without_settle() {
        let config = config().with_reduced_motion(true);
        let mut carousel = Carousel::new(4, 700.0, &config).unwrap();
        assert_eq!(carousel.state().current_index, 2);
        for _ in 0..4 {
            carousel.apply(Intent::Next);
            assert!(!carousel.presentation().animated);
            assert_invariants(&carousel);
        }
        assert_eq!(carousel.state().current_index, 2);

        carousel.apply(Intent::Prev);
        assert_eq!(carousel.state().current_index, 5);
        assert_eq!(carousel.presentation().offset_px, -5.0 * 350.0);
    }

    #[test]
    fn indicator_round_trips_to_real_index() {
        let mut carousel = carousel(5, 1200.0);
        for ordinal in 0..5 {
            settled(&mut carousel, Intent::GoTo(ordinal));
            assert_eq!(carousel.real_index(), ordinal);
        }
    }

    #[test]
    fn indicator_jumps_to_group() {
        let mut carousel = carousel(5, 1200.0);
        carousel.apply(Intent::GoTo(2));
        assert_eq!(carousel.state().current_index, 5);
        assert_eq!(carousel.real_index(), 2);
        assert!(carousel.state().is_paused);
        assert!(carousel.indicator_a11y()[2].active);
    }

    #[test]
    fn out_of_range_indicator_is_ignored() {
        let mut carousel = carousel(5, 1200.0);
        carousel.apply(Intent::GoTo(9));
        assert_eq!(carousel.state().current_index, 3);
    }

    #[test]
    fn long_drag_left_commits_next() {
        let mut carousel = carousel(5, 300.0);
        assert_eq!(carousel.state().slide_width, 300.0);
        let mut narrow = Carousel::new(5, 100.0, &config()).unwrap();
        drag(&mut narrow, -40.0);
        assert_eq!(narrow.state().current_index, 2);
        assert_eq!(narrow.real_index(), 1);

        drag(&mut carousel, 80.0);
        assert_eq!(carousel.state().current_index, 0);
        carousel.apply(Intent::Settle);
        assert_eq!(carousel.real_index(), 4);
    }

    #[test]
    fn short_drag_snaps_back() {
        let mut carousel = carousel(5, 100.0);
        carousel.apply(Intent::DragStart { pointer_id: 1, x: 50.0 });
        carousel.apply(Intent::DragTo { pointer_id: 1, x: 40.0 });
        assert_eq!(
            carousel.presentation(),
            Presentation {
                offset_px: -110.0,
                animated: false
            }
        );
        assert!(carousel.state().is_dragging);

        carousel.apply(Intent::DragRelease { pointer_id: 1 });
        assert_eq!(carousel.state().current_index, 1);
        assert_eq!(
            carousel.presentation(),
            Presentation {
                offset_px: -100.0,
                animated: true
            }
        );
        assert!(!carousel.state().is_dragging);
    }

    #[test]
    fn release_without_movement_is_a_snap_back() {
        let mut carousel = carousel(3, 100.0);
        carousel.apply(Intent::DragStart { pointer_id: 1, x: 50.0 });
        carousel.apply(Intent::DragRelease { pointer_id: 1 });
        assert_eq!(carousel.state().current_index, 1);
        assert!(carousel.autoplay().is_running());
    }

    #[test]
    fn foreign_pointer_is_ignored() {
        let mut carousel = carousel(5, 100.0);
        carousel.apply(Intent::DragStart { pointer_id: 1, x: 50.0 });
        carousel.apply(Intent::DragTo { pointer_id: 2, x: 0.0 });
        carousel.apply(Intent::DragRelease { pointer_id: 2 });
        assert!(carousel.state().is_dragging);
        carousel.apply(Intent::DragRelease { pointer_id: 1 });
        assert_eq!(carousel.state().current_index, 1);
    }

    #[test]
    fn drag_resumes_unless_hovered() {
        let mut carousel = carousel(5, 1200.0);
        carousel.apply(Intent::HoverStart);
        drag(&mut carousel, -200.0);
        assert!(carousel.state().is_paused);
        carousel.apply(Intent::HoverEnd);
        assert!(!carousel.state().is_paused);

        drag(&mut carousel, -200.0);
        assert!(!carousel.state().is_paused);
    }

    #[test]
    fn tick_is_ignored_while_paused_or_dragging() {
        let mut carousel = carousel(5, 1200.0);
        carousel.apply(Intent::FocusIn);
        carousel.apply(Intent::Tick);
        assert_eq!(carousel.state().current_index, 3);
        carousel.apply(Intent::FocusOut);
        carousel.apply(Intent::Tick);
        assert_eq!(carousel.state().current_index, 4);
    }

    #[test]
    fn buttons_wait_for_drag_release() {
        let mut carousel = carousel(5, 1200.0);
        carousel.apply(Intent::DragStart { pointer_id: 3, x: 600.0 });
        carousel.apply(Intent::Next);
        carousel.apply(Intent::GoTo(4));
        assert_eq!(carousel.state().current_index, 3);
        carousel.apply(Intent::DragRelease { pointer_id: 3 });
        carousel.apply(Intent::Next);
        assert_eq!(carousel.state().current_index, 4);
    }

    #[test]
    fn zero_width_defers_moves() {
        let mut carousel = carousel(5, 0.0);
        carousel.apply(Intent::Next);
        carousel.apply(Intent::GoTo(3));
        drag(&mut carousel, -100.0);
        assert_eq!(carousel.state().current_index, 1);
        assert_eq!(carousel.presentation().offset_px, 0.0);

        carousel.apply(Intent::Resize(1200.0));
        assert_eq!(carousel.state().current_index, 3);
        assert_eq!(carousel.presentation().offset_px, -1200.0);
        carousel.apply(Intent::Next);
        assert_eq!(carousel.state().current_index, 4);
    }

    #[test]
    fn resize_keeps_leading_real_slide() {
        let mut carousel = carousel(5, 1200.0);
        settled(&mut carousel, Intent::GoTo(2));
        assert_eq!(carousel.real_index(), 2);

        carousel.apply(Intent::Resize(500.0));
        assert_eq!(carousel.state().slides_per_view, 1);
        assert_eq!(carousel.state().current_index, 3);
        assert_eq!(carousel.track().len(), 7);
        let leading = carousel.track().slides()[carousel.state().current_index];
        assert_eq!(leading.real_index, 2);
        assert!(!leading.is_clone);
        assert!(!carousel.presentation().animated);
        assert!(carousel.indicator_a11y()[2].active);
    }

    #[test]
    fn resize_mid_transition_preserves_real_slide() {
        let mut carousel = carousel(5, 1200.0);
        carousel.apply(Intent::Prev);
        assert_eq!(carousel.state().current_index, 2);
        carousel.apply(Intent::Resize(800.0));
        assert_eq!(carousel.real_index(), 4);
        assert_eq!(carousel.state().current_index, 6);
    }

    #[test]
    fn resize_cancels_drag() {
        let mut carousel = carousel(5, 1200.0);
        carousel.apply(Intent::DragStart { pointer_id: 1, x: 10.0 });
        carousel.apply(Intent::Resize(700.0));
        assert!(!carousel.state().is_dragging);
        assert!(!carousel.state().is_paused);
    }

    #[test]
    fn unsettled_moves_never_sweep_backwards() {
        let mut carousel = carousel(5, 1200.0);
        let mut last_offset = carousel.presentation().offset_px;
        for _ in 0..8 {
            carousel.apply(Intent::Next);
            let presentation = carousel.presentation();
            assert!(presentation.animated);
            assert!(presentation.offset_px <= last_offset);
            last_offset = presentation.offset_px;
        }
        assert_eq!(carousel.state().current_index, 8);
        assert_eq!(last_offset, -3200.0);

        carousel.apply(Intent::Settle);
        assert_eq!(carousel.state().current_index, 3);
        carousel.apply(Intent::Next);
        assert_eq!(carousel.state().current_index, 4);
    }

    #[test]
    fn unsettled_prev_waits_at_first_clone() {
        let mut carousel = carousel(5, 1200.0);
        let mut last_offset = carousel.presentation().offset_px;
        for _ in 0..6 {
            carousel.apply(Intent::Prev);
            let presentation = carousel.presentation();
            assert!(presentation.animated);
            assert!(presentation.offset_px >= last_offset);
            last_offset = presentation.offset_px;
        }
        assert_eq!(carousel.state().current_index, 0);

        carousel.apply(Intent::Settle);
        assert_eq!(carousel.state().current_index, 5);
        assert_eq!(carousel.real_index(), 2);
    }

    #[test]
    fn rapid_moves_never_leave_the_track() {
        let mut carousel = carousel(3, 1200.0);
        for _ in 0..10 {
            carousel.apply(Intent::Next);
            assert!(carousel.state().current_index + 3 <= carousel.track().len());
        }
        for _ in 0..10 {
            carousel.apply(Intent::Prev);
            assert!(carousel.state().current_index + 3 <= carousel.track().len());
        }
        carousel.apply(Intent::Settle);
        assert!(carousel.is_settled());
    }

    #[test]
    fn accessibility_follows_index() {
        let mut carousel = carousel(5, 800.0);
        settled(&mut carousel, Intent::Next);
        let shown: Vec<usize> = carousel
            .slide_a11y()
            .iter()
            .enumerate()
            .filter(|(_, state)| state.focusable)
            .map(|(position, _)| position)
            .collect();
        assert_eq!(shown, vec![3, 4]);
        assert!(carousel.indicator_a11y()[1].active);
    }

    #[test]
    fn keys_map_to_intents() {
        assert_eq!(Intent::from_key("ArrowRight"), Some(Intent::Next));
        assert_eq!(Intent::from_key("ArrowLeft"), Some(Intent::Prev));
        assert_eq!(Intent::from_key("Enter"), None);
    }

    #[test]
    fn random_intents_keep_invariants() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let widths = [0.0, 320.0, 640.0, 900.0, 1024.0, 1600.0];

        for count in 1..=7 {
            let mut carousel = carousel(count, 1200.0);
            for _ in 0..400 {
                let intent = match rng.gen_range(0..13) {
                    0 => Intent::Tick,
                    1 => Intent::Next,
                    2 => Intent::Prev,
                    3 => Intent::GoTo(rng.gen_range(0..count + 1)),
                    4 => Intent::DragStart { pointer_id: 1, x: 500.0 },
                    5 => Intent::DragTo {
                        pointer_id: 1,
                        x: rng.gen_range(0.0..1000.0),
                    },
                    6 => Intent::DragRelease { pointer_id: 1 },
                    7 => Intent::Resize(widths[rng.gen_range(0..widths.len())]),
                    8 => Intent::HoverStart,
                    9 => Intent::HoverEnd,
                    10 => Intent::FocusIn,
                    11 => Intent::FocusOut,
                    _ => Intent::Settle,
                };
                carousel.apply(intent);
                assert_invariants(&carousel);
                assert!(carousel.real_index() < count);
            }

            carousel.apply(Intent::DragRelease { pointer_id: 1 });
            carousel.apply(Intent::Settle);
            assert!(carousel.is_settled());
        }
    }
}
