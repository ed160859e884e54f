use crate::error::CarouselError;

/// A slot on the track. Clones point at the real slide whose content they
/// duplicate but carry no identity of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slide {
    pub real_index: usize,
    pub is_clone: bool,
}

impl Slide {
    fn real(real_index: usize) -> Self {
        Self {
            real_index,
            is_clone: false,
        }
    }

    fn clone_of(real_index: usize) -> Self {
        Self {
            real_index,
            is_clone: true,
        }
    }
}

/// Real slides padded with `slides_per_view` clones of the tail in front and
/// `slides_per_view` clones of the head behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    slides: Vec<Slide>,
    original_count: usize,
    slides_per_view: usize,
}

impl Track {
    pub fn new(original_count: usize, slides_per_view: usize) -> Result<Self, CarouselError> {
        let mut track = Self {
            slides: (0..original_count).map(Slide::real).collect(),
            original_count,
            slides_per_view: 0,
        };
        track.rebuild(slides_per_view)?;
        Ok(track)
    }

    /// Drops the current clones and pads the real slides for a new
    /// `slides_per_view`. On error the track is left untouched.
    pub fn rebuild(&mut self, slides_per_view: usize) -> Result<(), CarouselError> {
        if self.original_count == 0 {
            return Err(CarouselError::NoSlides);
        }
        if slides_per_view == 0 || slides_per_view > self.original_count {
            return Err(CarouselError::NotEnoughSlides {
                slides_per_view,
                original_count: self.original_count,
            });
        }

        self.slides.retain(|slide| !slide.is_clone);

        let n = self.original_count;
        let mut padded = Vec::with_capacity(n + 2 * slides_per_view);
        padded.extend((n - slides_per_view..n).map(Slide::clone_of));
        padded.append(&mut self.slides);
        padded.extend((0..slides_per_view).map(Slide::clone_of));

        self.slides = padded;
        self.slides_per_view = slides_per_view;
        Ok(())
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub(crate) fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn original_count(&self) -> usize {
        self.original_count
    }

    /// Track positions of the real slides, `slides_per_view..slides_per_view + original_count`.
    pub fn real_range(&self) -> std::ops::Range<usize> {
        self.slides_per_view..self.slides_per_view + self.original_count
    }

    /// Track position of real slide `real_index`; clones are never returned.
    pub fn position_of(&self, real_index: usize) -> Option<usize> {
        self.slides
            .iter()
            .position(|slide| !slide.is_clone && slide.real_index == real_index)
    }
}
