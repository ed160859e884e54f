//! Accessibility attributes derived from the carousel position alone.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideA11y {
    pub hidden: bool,
    pub focusable: bool,
}

impl SlideA11y {
    pub fn aria_hidden(&self) -> &'static str {
        if self.hidden { "true" } else { "false" }
    }

    pub fn tab_index(&self) -> &'static str {
        if self.focusable { "0" } else { "-1" }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorA11y {
    pub active: bool,
}

impl IndicatorA11y {
    pub fn aria_selected(&self) -> &'static str {
        if self.active { "true" } else { "false" }
    }

    pub fn tab_index(&self) -> &'static str {
        if self.active { "0" } else { "-1" }
    }
}

/// A slot is exposed iff it lies in `[current_index, current_index + slides_per_view)`.
pub fn slide_states(
    track_len: usize,
    current_index: usize,
    slides_per_view: usize,
) -> Vec<SlideA11y> {
    let visible = current_index..current_index.saturating_add(slides_per_view);
    (0..track_len)
        .map(|position| {
            let shown = visible.contains(&position);
            SlideA11y {
                hidden: !shown,
                focusable: shown,
            }
        })
        .collect()
}

pub fn indicator_states(original_count: usize, real_index: usize) -> Vec<IndicatorA11y> {
    (0..original_count)
        .map(|ordinal| IndicatorA11y {
            active: ordinal == real_index,
        })
        .collect()
}
