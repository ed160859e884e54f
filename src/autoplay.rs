/// What asked the autoplay to stop. Hover, focus and drag hold the pause
/// until their paired release; a click or key press does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseSource {
    Hover,
    Focus,
    Drag,
    Interaction,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Holds {
    hover: bool,
    focus: bool,
    drag: bool,
}

impl Holds {
    fn set(&mut self, source: PauseSource, value: bool) {
        match source {
            PauseSource::Hover => self.hover = value,
            PauseSource::Focus => self.focus = value,
            PauseSource::Drag => self.drag = value,
            PauseSource::Interaction => {}
        }
    }

    fn any(&self) -> bool {
        self.hover || self.focus || self.drag
    }
}

/// Interval scheduler state. The host arms a timer while
/// [`Autoplay::is_running`] is true and drops it otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Autoplay {
    interval_ms: u32,
    paused: bool,
    holds: Holds,
}

impl Autoplay {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            paused: false,
            holds: Holds::default(),
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_running(&self) -> bool {
        !self.paused
    }

    pub fn pause(&mut self, source: PauseSource) {
        self.holds.set(source, true);
        self.paused = true;
    }

    /// Releases `source` and returns true when the timer should restart.
    pub fn resume(&mut self, source: PauseSource) -> bool {
        self.holds.set(source, false);
        if !self.paused || self.holds.any() {
            return false;
        }
        self.paused = false;
        true
    }
}
