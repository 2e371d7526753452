//! HTTP image-search fetcher.
//!
//! Queries a Google-Images-style search endpoint restricted to a date range,
//! pulls candidate image URLs out of the result page and downloads them one
//! at a time. The whole thing is best effort: a failed search request is a
//! fetch error, but individual images that fail to download are skipped.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::Duration;

use super::{FetchRequest, ImageFetcher};
use crate::dataset::AssetFilter;
use crate::error::DatecrawlError;

/// Browser-like user agent; the search endpoint serves an empty result page
/// to unknown clients.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120 Safari/537.36";

pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://www.google.com/search";

/// Settings for [`HttpImageFetcher`].
#[derive(Clone, Debug)]
pub struct HttpFetcherConfig {
    /// Sent as `User-Agent` on every request made by this fetcher.
    pub user_agent: String,
    /// Per-request timeout.
    pub timeout: Duration,
    pub search_endpoint: String,
    /// Results requested per search page.
    pub page_size: usize,
    /// Images larger than this are skipped.
    pub max_image_bytes: u64,
    /// Image types outside this filter are not downloaded, so they never
    /// count against a window's cap.
    pub filter: AssetFilter,
}

impl Default for HttpFetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            search_endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            page_size: 100,
            max_image_bytes: 20 * 1024 * 1024,
            filter: AssetFilter::default(),
        }
    }
}

/// Fetcher backed by a blocking `ureq` agent.
pub struct HttpImageFetcher {
    config: HttpFetcherConfig,
    agent: ureq::Agent,
}

impl HttpImageFetcher {
    pub fn new(config: HttpFetcherConfig) -> Self {
        let agent_config = ureq::Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .build();
        let agent: ureq::Agent = agent_config.into();
        Self { config, agent }
    }

    pub fn config(&self) -> &HttpFetcherConfig {
        &self.config
    }

    fn get_text(&self, url: &str) -> Result<String, String> {
        let mut response = self
            .agent
            .get(url)
            .header("User-Agent", self.config.user_agent.as_str())
            .call()
            .map_err(|source| source.to_string())?;
        response
            .body_mut()
            .read_to_string()
            .map_err(|source| source.to_string())
    }

    fn download(&self, url: &str) -> Result<(Vec<u8>, &'static str), String> {
        let mut response = self
            .agent
            .get(url)
            .header("User-Agent", self.config.user_agent.as_str())
            .call()
            .map_err(|source| source.to_string())?;

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|value| value.to_str().ok())
            .map(str::to_ascii_lowercase);

        let extension = match content_type.as_deref() {
            Some(ct) if !ct.starts_with("image/") => {
                return Err(format!("not an image (content-type '{ct}')"));
            }
            Some(ct) => extension_for_content_type(ct).or_else(|| extension_from_url(url)),
            None => extension_from_url(url),
        }
        .ok_or_else(|| "unrecognized image type".to_string())?;
        let extension = accepted_extension(&self.config.filter, extension)
            .ok_or_else(|| format!("'{extension}' images are not collected"))?;

        let bytes = response
            .body_mut()
            .with_config()
            .limit(self.config.max_image_bytes)
            .read_to_vec()
            .map_err(|source| source.to_string())?;

        if bytes.is_empty() {
            return Err("empty response body".to_string());
        }
        Ok((bytes, extension))
    }
}

impl ImageFetcher for HttpImageFetcher {
    fn fetch(&self, request: &FetchRequest, destination: &Path) -> Result<usize, DatecrawlError> {
        let page_size = self.config.page_size.max(1);
        // One spare page to make up for images that fail to download.
        let page_limit = request.max_count.div_ceil(page_size) + 1;

        let mut seen = HashSet::new();
        let mut saved = 0usize;

        for page in 0..page_limit {
            if saved >= request.max_count {
                break;
            }

            let url = search_url(&self.config.search_endpoint, request, page, page_size)
                .map_err(|message| request.error(message))?;
            let html = self
                .get_text(url.as_str())
                .map_err(|message| request.error(format!("search request failed: {message}")))?;

            let candidates: Vec<String> = extract_image_urls(&html)
                .into_iter()
                .filter(|candidate| seen.insert(candidate.clone()))
                .collect();
            if candidates.is_empty() {
                tracing::debug!(page, "no new results; stopping");
                break;
            }

            for candidate in candidates {
                if saved >= request.max_count {
                    break;
                }
                match self.download(&candidate) {
                    Ok((bytes, extension)) => {
                        let file_name = format!("{:06}.{}", saved + 1, extension);
                        fs::write(destination.join(&file_name), bytes)?;
                        saved += 1;
                        tracing::debug!(url = %candidate, file = %file_name, "saved image");
                    }
                    Err(message) => {
                        tracing::warn!(url = %candidate, error = %message, "skipping image");
                    }
                }
            }
        }

        Ok(saved)
    }
}

/// Builds the search URL for one result page.
pub fn search_url(
    endpoint: &str,
    request: &FetchRequest,
    page: usize,
    page_size: usize,
) -> Result<url::Url, String> {
    let mut url = url::Url::parse(endpoint).map_err(|source| source.to_string())?;

    let (sy, sm, sd) = request.start;
    let (ey, em, ed) = request.end;
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("q", &request.keyword);
        query.append_pair("tbm", "isch");
        query.append_pair(
            "tbs",
            &format!("cdr:1,cd_min:{sm}/{sd}/{sy},cd_max:{em}/{ed}/{ey}"),
        );
        query.append_pair("ijn", &page.to_string());
        query.append_pair("start", &(page * page_size).to_string());
    }

    Ok(url)
}

/// Pulls original-image URLs out of a result page.
///
/// Result pages embed each hit as `["<url>",<height>,<width>]`; thumbnail
/// entries served from `gstatic.com` are ignored. Order of first appearance
/// is kept and duplicates are dropped.
pub fn extract_image_urls(html: &str) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();
    let mut rest = html;

    while let Some(start) = rest.find("[\"http") {
        let candidate = &rest[start + 2..];
        let Some(end) = candidate.find('"') else {
            break;
        };
        let tail = &candidate[end + 1..];

        if has_dimension_suffix(tail) {
            let url = unescape_url(&candidate[..end]);
            if !url.contains("gstatic.com") && !urls.contains(&url) {
                urls.push(url);
            }
        }
        rest = tail;
    }

    urls
}

fn has_dimension_suffix(tail: &str) -> bool {
    let Some(tail) = tail.strip_prefix(',') else {
        return false;
    };
    let (height, tail) = split_digits(tail);
    let Some(tail) = tail.strip_prefix(',') else {
        return false;
    };
    let (width, tail) = split_digits(tail);
    !height.is_empty() && !width.is_empty() && tail.starts_with(']')
}

fn split_digits(s: &str) -> (&str, &str) {
    let n = s.bytes().take_while(u8::is_ascii_digit).count();
    s.split_at(n)
}

fn unescape_url(raw: &str) -> String {
    raw.replace("\\u003d", "=")
        .replace("\\u0026", "&")
        .replace("\\/", "/")
}

fn extension_for_content_type(content_type: &str) -> Option<&'static str> {
    let mime = content_type.split(';').next().unwrap_or_default().trim();
    match mime {
        "image/jpeg" | "image/jpg" | "image/pjpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/gif" => Some("gif"),
        "image/bmp" => Some("bmp"),
        _ => None,
    }
}

// JPEG content is saved under whichever of `jpg`/`jpeg` the filter accepts.
fn accepted_extension(filter: &AssetFilter, extension: &'static str) -> Option<&'static str> {
    let candidates: &[&'static str] = if extension == "jpg" {
        &["jpg", "jpeg"]
    } else {
        std::slice::from_ref(&extension)
    };
    candidates
        .iter()
        .copied()
        .find(|candidate| filter.accepts_extension(candidate))
}

fn extension_from_url(raw: &str) -> Option<&'static str> {
    let url = url::Url::parse(raw).ok()?;
    let last = url.path_segments()?.next_back()?;
    let ext = Path::new(last).extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("jpg"),
        "png" => Some("png"),
        "webp" => Some("webp"),
        "gif" => Some("gif"),
        "bmp" => Some("bmp"),
        _ => None,
    }
}
