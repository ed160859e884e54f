const DESKTOP_MIN_WIDTH: f64 = 1024.0;
const TABLET_MIN_WIDTH: f64 = 640.0;

/// How many cards fit side by side in a viewport of `width` pixels.
pub fn slides_per_view(width: f64) -> usize {
    if width >= DESKTOP_MIN_WIDTH {
        3
    } else if width >= TABLET_MIN_WIDTH {
        2
    } else {
        1
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub slides_per_view: usize,
    pub slide_width: f64,
}

impl Geometry {
    /// Slide layout for `viewport_width`, never showing more cards than exist.
    pub fn resolve_clamped(viewport_width: f64, original_count: usize) -> Self {
        let wanted = slides_per_view(viewport_width);
        let clamped = wanted.min(original_count).max(1);
        if clamped != wanted {
            log::debug!(
                "clamping slides per view from {} to {} ({} slides)",
                wanted,
                clamped,
                original_count
            );
        }
        Self::with_slides_per_view(viewport_width, clamped)
    }

    fn with_slides_per_view(viewport_width: f64, slides_per_view: usize) -> Self {
        let width = if viewport_width.is_finite() {
            viewport_width.max(0.0)
        } else {
            0.0
        };
        Self {
            slides_per_view,
            slide_width: width / slides_per_view as f64,
        }
    }
}
