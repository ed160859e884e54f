use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("testimonials not found at '{0}'")]
    NotFound(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid testimonials: {0}")]
    Parse(String),
}

impl DataError {
    pub(crate) fn network<E: std::fmt::Display>(err: E) -> Self {
        Self::Network(err.to_string())
    }

    pub(crate) fn parse<E: std::fmt::Display>(err: E) -> Self {
        Self::Parse(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CarouselError {
    #[error("carousel needs at least one slide")]
    NoSlides,
    #[error("{slides_per_view} slides per view but only {original_count} slides")]
    NotEnoughSlides {
        slides_per_view: usize,
        original_count: usize,
    },
}
