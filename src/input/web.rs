use log::{debug, info};
use reqwest::blocking::Client;
use reqwest::Url;

use super::sanitize::sanitize_text;
use super::{DocumentSource, LoadError, LoadedDocument};
use crate::engine::config::WebConfig;

/// Fetches web pages and pulls out their readable text.
///
/// The HTTP client is built on the first fetch and kept for later ones.
pub struct WebFetcher {
    config: WebConfig,
    client: Option<Client>,
}

impl WebFetcher {
    pub fn new(config: WebConfig) -> Self {
        Self {
            config,
            client: None,
        }
    }

    /// True once the HTTP client has been built.
    pub fn is_ready(&self) -> bool {
        self.client.is_some()
    }

    pub fn fetch(&mut self, address: &str) -> Result<LoadedDocument, LoadError> {
        let url = parse_url(address)?;
        let host = url.host_str().unwrap_or_default().to_string();
        let fetch_error = |e: reqwest::Error| LoadError::Fetch {
            url: address.to_string(),
            message: e.to_string(),
        };

        let client = self.client()?;
        info!("Fetching {}", url);
        let html = client
            .get(url)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(fetch_error)?;
        debug!("Fetched {} bytes from {}", html.len(), host);

        let text = extract_article_text(&html);
        if text.is_empty() {
            return Err(LoadError::Fetch {
                url: address.to_string(),
                message: "page has no readable text".to_string(),
            });
        }

        Ok(LoadedDocument {
            text,
            source: DocumentSource::Web(host),
        })
    }

    fn client(&mut self) -> Result<&Client, LoadError> {
        let client = match self.client.take() {
            Some(client) => client,
            None => {
                let client = Client::builder()
                    .timeout(self.config.timeout)
                    .user_agent(self.config.user_agent.clone())
                    .build()
                    .map_err(|e| LoadError::Fetch {
                        url: String::new(),
                        message: e.to_string(),
                    })?;
                debug!("HTTP client ready");
                client
            }
        };
        Ok(self.client.insert(client))
    }
}

/// True for `http://` and `https://` addresses.
pub fn is_web_address(input: &str) -> bool {
    let lower = input.trim().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn parse_url(address: &str) -> Result<Url, LoadError> {
    let url = Url::parse(address.trim()).map_err(|_| LoadError::InvalidUrl(address.to_string()))?;
    if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() {
        Ok(url)
    } else {
        Err(LoadError::InvalidUrl(address.to_string()))
    }
}

/// Readable text of an HTML page: the first `<article>`, else `<main>`,
/// else `<body>`, else the whole document. Script and style contents are
/// dropped and common entities decoded.
pub fn extract_article_text(html: &str) -> String {
    let cleaned = remove_element(&remove_element(html, "script"), "style");
    let region = ["article", "main", "body"]
        .iter()
        .find_map(|tag| element_contents(&cleaned, tag))
        .unwrap_or(cleaned.as_str());
    let decoded = decode_entities(&sanitize_text(region));
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Byte offset of the first `<tag` at or after `from` that is a whole tag name.
fn find_open_tag(lower: &str, tag: &str, from: usize) -> Option<usize> {
    let needle = format!("<{tag}");
    let mut search = from;
    while let Some(offset) = lower[search..].find(&needle) {
        let start = search + offset;
        let after = start + needle.len();
        match lower[after..].chars().next() {
            Some(c) if c == '>' || c == '/' || c.is_whitespace() => return Some(start),
            None => return None,
            _ => search = after,
        }
    }
    None
}

/// Inner HTML of the first `<tag>` element.
fn element_contents<'a>(html: &'a str, tag: &str) -> Option<&'a str> {
    // ASCII lowercasing keeps byte offsets aligned with `html`
    let lower = html.to_ascii_lowercase();
    let open = find_open_tag(&lower, tag, 0)?;
    let content_start = open + lower[open..].find('>')? + 1;
    let close = format!("</{tag}");
    let content_end = lower[content_start..]
        .find(&close)
        .map(|offset| content_start + offset)
        .unwrap_or(html.len());
    Some(&html[content_start..content_end])
}

/// Removes every `<tag ...>...</tag>` block.
fn remove_element(html: &str, tag: &str) -> String {
    let lower = html.to_ascii_lowercase();
    let close = format!("</{tag}>");
    let mut result = String::with_capacity(html.len());
    let mut cursor = 0;

    while let Some(open) = find_open_tag(&lower, tag, cursor) {
        result.push_str(&html[cursor..open]);
        cursor = match lower[open..].find(&close) {
            Some(offset) => open + offset + close.len(),
            None => html.len(),
        };
    }
    result.push_str(&html[cursor..]);
    result
}

fn decode_entities(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        result.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest
            .find(';')
            .filter(|end| *end <= 10)
            .and_then(|end| decode_entity(&rest[1..end]).map(|c| (c, end)));
        match decoded {
            Some((c, end)) => {
                result.push(c);
                rest = &rest[end + 1..];
            }
            None => {
                result.push('&');
                rest = &rest[1..];
            }
        }
    }
    result.push_str(rest);
    result
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" | "#39" => Some('\''),
        "nbsp" => Some(' '),
        "mdash" => Some('\u{2014}'),
        "ndash" => Some('\u{2013}'),
        "hellip" => Some('\u{2026}'),
        _ => {
            let number = name.strip_prefix('#')?;
            let hex = number.strip_prefix('x').or_else(|| number.strip_prefix('X'));
            let code = match hex {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}
