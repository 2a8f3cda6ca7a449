use thiserror::Error;
use url::Url;

/// Errors from URL validation.
#[derive(Error, Debug)]
pub enum UrlValidationError {
    /// The URL string could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    /// The URL has no host component.
    #[error("URL has no host")]
    MissingHost,
}

fn parse_http(url_str: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(url_str.trim())?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(url)
}

/// Validate the meme endpoint from config or the command line.
///
/// Only the scheme and host are checked. Loopback hosts are allowed so a
/// locally served collection can be used.
pub fn validate_endpoint(url_str: &str) -> Result<Url, UrlValidationError> {
    parse_http(url_str)
}

/// Validate an image URL before handing it to the system browser.
///
/// `open::that` passes its argument to a platform launcher, so anything other
/// than a plain http(s) URL is refused.
pub fn validate_url_for_open(url_str: &str) -> Result<Url, UrlValidationError> {
    parse_http(url_str)
}
