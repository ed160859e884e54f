use crate::data::DEFAULT_TEXT_LIMIT;
use web_sys::Element;

pub const DEFAULT_AUTOPLAY_INTERVAL_MS: u32 = 5000;
pub const DEFAULT_SOURCE: &str = "assets/testimonials.json";
pub const RESIZE_DEBOUNCE_MS: u32 = 100;

const INTERVAL_ATTR: &str = "data-autoplay-interval";
const SOURCE_ATTR: &str = "data-source";
const TEXT_LIMIT_ATTR: &str = "data-text-limit";

/// Settings read from the host element when the carousel is mounted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselConfig {
    pub autoplay_interval_ms: u32,
    pub source: String,
    pub text_limit: usize,
    pub reduced_motion: bool,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay_interval_ms: DEFAULT_AUTOPLAY_INTERVAL_MS,
            source: DEFAULT_SOURCE.to_string(),
            text_limit: DEFAULT_TEXT_LIMIT,
            reduced_motion: false,
        }
    }
}

impl CarouselConfig {
    pub fn from_attributes(
        interval: Option<&str>,
        source: Option<&str>,
        text_limit: Option<&str>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            autoplay_interval_ms: parse_positive(interval)
                .and_then(|value| u32::try_from(value).ok())
                .unwrap_or(defaults.autoplay_interval_ms),
            source: source
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
                .unwrap_or(defaults.source),
            text_limit: parse_positive(text_limit)
                .and_then(|value| usize::try_from(value).ok())
                .unwrap_or(defaults.text_limit),
            reduced_motion: false,
        }
    }

    pub fn from_host(host: &Element) -> Self {
        Self::from_attributes(
            host.get_attribute(INTERVAL_ATTR).as_deref(),
            host.get_attribute(SOURCE_ATTR).as_deref(),
            host.get_attribute(TEXT_LIMIT_ATTR).as_deref(),
        )
    }

    pub fn with_reduced_motion(mut self, reduced_motion: bool) -> Self {
        self.reduced_motion = reduced_motion;
        self
    }
}

pub fn prefers_reduced_motion() -> bool {
    web_sys::window()
        .and_then(|window| window.match_media("(prefers-reduced-motion: reduce)").ok())
        .flatten()
        .map(|query| query.matches())
        .unwrap_or(false)
}

/// Reads the leading integer of an attribute value ("4000ms" is 4000).
/// Zero and negative values count as missing.
fn parse_positive(value: Option<&str>) -> Option<u64> {
    let value = value?.trim_start();
    let (negative, rest) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    let parsed: u64 = digits.parse().ok()?;
    if negative || parsed == 0 {
        None
    } else {
        Some(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_attributes_use_defaults() {
        assert_eq!(
            CarouselConfig::from_attributes(None, None, None),
            CarouselConfig::default()
        );
    }

    #[test]
    fn interval_takes_leading_integer() {
        let config = CarouselConfig::from_attributes(Some(" 4000ms"), None, None);
        assert_eq!(config.autoplay_interval_ms, 4000);
    }

    #[test]
    fn invalid_interval_falls_back() {
        for raw in ["", "abc", "0", "-300", "99999999999"] {
            let config = CarouselConfig::from_attributes(Some(raw), None, None);
            assert_eq!(config.autoplay_interval_ms, DEFAULT_AUTOPLAY_INTERVAL_MS, "{raw}");
        }
    }

    #[test]
    fn source_and_text_limit_are_read() {
        let config = CarouselConfig::from_attributes(None, Some("feed.json"), Some("80"));
        assert_eq!(config.source, "feed.json");
        assert_eq!(config.text_limit, 80);

        let blank = CarouselConfig::from_attributes(None, Some("  "), None);
        assert_eq!(blank.source, DEFAULT_SOURCE);
    }
}
