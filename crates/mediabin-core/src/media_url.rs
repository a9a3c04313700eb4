//! Public media URL construction and parsing.
//!
//! A public URL has the shape `http://host:port/media?m=<22-char id>` with
//! exactly one query parameter named `m`.

use crate::error::AppError;
use crate::media_id;
use percent_encoding::percent_decode_str;

/// Query parameter carrying the public media identifier.
pub const MEDIA_ID_QUERY_PARAMETER: &str = "m";

/// Path of the viewer dispatch endpoint.
pub const MEDIA_PATH: &str = "/media";

/// Builds and parses public media URLs.
#[derive(Clone, Debug)]
pub struct MediaUrls {
    base_url: String,
}

impl MediaUrls {
    pub fn new(public_base_url: &str) -> Self {
        MediaUrls {
            base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a public URL for a freshly generated media identifier.
    pub fn create_url(&self) -> String {
        self.url_for(&media_id::generate())
    }

    /// Public URL for an existing media identifier.
    pub fn url_for(&self, media_id: &str) -> String {
        format!(
            "{}{}?{}={}",
            self.base_url, MEDIA_PATH, MEDIA_ID_QUERY_PARAMETER, media_id
        )
    }

    /// Extract the media identifier from a public URL.
    ///
    /// Returns `InvalidInput` when the URL carries no query, no `m` parameter,
    /// or a blank value.
    pub fn media_id_from_url(&self, url: &str) -> Result<String, AppError> {
        let query = url
            .split_once('?')
            .map(|(_, q)| q)
            .ok_or_else(|| AppError::InvalidInput(format!("Missing query in URL: {}", url)))?;

        query
            .split('&')
            .filter_map(split_query_parameter)
            .find(|(key, value)| key == MEDIA_ID_QUERY_PARAMETER && !value.trim().is_empty())
            .map(|(_, value)| value)
            .ok_or_else(|| {
                AppError::InvalidInput(format!("Missing media id parameter in URL: {}", url))
            })
    }
}

fn split_query_parameter(pair: &str) -> Option<(String, String)> {
    let (key, value) = match pair.split_once('=') {
        Some((key, value)) => (key, value),
        None => (pair, ""),
    };
    let key = percent_decode_str(key).decode_utf8().ok()?;
    let value = percent_decode_str(value).decode_utf8().ok()?;
    Some((key.into_owned(), value.into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls() -> MediaUrls {
        MediaUrls::new("http://localhost:8080")
    }

    #[test]
    fn created_url_contains_fixed_length_id() {
        let url = urls().create_url();
        assert!(url.starts_with("http://localhost:8080/media?m="));
        let id = urls().media_id_from_url(&url).unwrap();
        assert_eq!(id.len(), media_id::MEDIA_ID_LENGTH);
    }

    #[test]
    fn trailing_slash_in_base_url_is_trimmed() {
        let urls = MediaUrls::new("http://localhost:8080/");
        assert_eq!(
            urls.url_for("abc"),
            "http://localhost:8080/media?m=abc"
        );
    }

    #[test]
    fn media_id_round_trips() {
        let urls = urls();
        let url = urls.url_for("YZmdnnBYTH2lZbAbHvaqnA");
        assert_eq!(
            urls.media_id_from_url(&url).unwrap(),
            "YZmdnnBYTH2lZbAbHvaqnA"
        );
    }

    #[test]
    fn missing_query_is_rejected() {
        let err = urls()
            .media_id_from_url("http://localhost:8080/media")
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn blank_media_id_is_rejected() {
        let err = urls()
            .media_id_from_url("http://localhost:8080/media?m=")
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn other_parameters_are_ignored() {
        let id = urls()
            .media_id_from_url("http://localhost:8080/media?x=1&m=abc&y=2")
            .unwrap();
        assert_eq!(id, "abc");
    }

    #[test]
    fn percent_encoded_query_is_decoded() {
        let id = urls()
            .media_id_from_url("http://localhost:8080/media?%6d=abc")
            .unwrap();
        assert_eq!(id, "abc");
    }
}
