use crate::error::DataError;
use gloo_net::http::Request;
use serde::Deserialize;

pub const DEFAULT_TEXT_LIMIT: usize = 150;
const ELLIPSIS: char = '…';

/// One testimonial as shown on a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Testimonial {
    pub author: String,
    pub text: String,
}

#[derive(Debug, Deserialize)]
struct RawTestimonial {
    #[serde(default)]
    author: String,
    #[serde(default)]
    text: String,
}

pub async fn fetch_testimonials(
    url: &str,
    text_limit: usize,
) -> Result<Vec<Testimonial>, DataError> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(DataError::network)?;

    if response.status() == 404 {
        return Err(DataError::NotFound(url.to_owned()));
    }

    if !response.ok() {
        return Err(DataError::Network(format!(
            "HTTP {} while fetching {}",
            response.status(),
            url
        )));
    }

    let text = response.text().await.map_err(DataError::network)?;
    parse_testimonials(&text, text_limit)
}

/// Parses the JSON feed into display-ready testimonials.
///
/// An empty feed is valid and yields no slides; an entry missing its author
/// or its text is rejected with its position.
pub fn parse_testimonials(json: &str, text_limit: usize) -> Result<Vec<Testimonial>, DataError> {
    let raw: Vec<RawTestimonial> = serde_json::from_str(json).map_err(DataError::parse)?;

    let mut testimonials = Vec::with_capacity(raw.len());
    for (index, entry) in raw.into_iter().enumerate() {
        let author = entry.author.trim().to_string();
        if author.is_empty() {
            return Err(DataError::Parse(format!(
                "testimonial {} has no author",
                index
            )));
        }

        let text = entry.text.trim();
        if text.is_empty() {
            return Err(DataError::Parse(format!(
                "testimonial {} by '{}' is empty",
                index, author
            )));
        }

        testimonials.push(Testimonial {
            author,
            text: truncate_quote(text, text_limit),
        });
    }

    Ok(testimonials)
}

pub fn truncate_quote(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }

    let mut truncated: String = text.trim().chars().take(limit).collect();
    truncated.push(ELLIPSIS);
    truncated
}
