const MIN_THRESHOLD_PX: f64 = 30.0;
const THRESHOLD_RATIO: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragGesture {
    pub pointer_id: i32,
    pub start_x: f64,
    pub current_x: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    Next,
    Prev,
    SnapBack,
}

impl DragGesture {
    pub fn new(pointer_id: i32, x: f64) -> Self {
        Self {
            pointer_id,
            start_x: x,
            current_x: x,
        }
    }

    pub fn delta(&self) -> f64 {
        self.current_x - self.start_x
    }

    /// Dragging left past the threshold advances, dragging right retreats.
    pub fn outcome(&self, slide_width: f64) -> DragOutcome {
        let delta = self.delta();
        if delta.abs() > threshold(slide_width) {
            if delta < 0.0 {
                DragOutcome::Next
            } else {
                DragOutcome::Prev
            }
        } else {
            DragOutcome::SnapBack
        }
    }
}

pub fn threshold(slide_width: f64) -> f64 {
    MIN_THRESHOLD_PX.max(slide_width * THRESHOLD_RATIO)
}
