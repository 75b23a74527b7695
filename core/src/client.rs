//! Stateless HTTP request builder and response parser for the styles API.
//!
//! # Design
//! `StyleClient` holds only a parsed `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. Executing the round trip in between is left to a
//! `Transport` or to the caller.
//!
//! Paths are appended as URL segments, so the style name is percent-escaped
//! and every operation joins onto the base URL the same way whether or not
//! it ends in `/`.

use log::{debug, warn};
use url::Url;

use crate::error::StyleError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, JSON_TYPE, SLD_TYPE};
use crate::types::{Style, StyleBody, StyleList, StyleRef};

const STATUS_OK: u16 = 200;
const STATUS_CREATED: u16 = 201;

/// Synchronous, stateless client for the styles resource.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network.
#[derive(Debug, Clone)]
pub struct StyleClient {
    base_url: Url,
}

impl StyleClient {
    /// Parse `base_url` (e.g. `http://localhost:8080/geoserver/`). Any query
    /// or fragment on it is dropped.
    pub fn new(base_url: &str) -> Result<Self, StyleError> {
        let mut base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(StyleError::CannotBeABase(base_url.into()));
        }
        base_url.set_query(None);
        base_url.set_fragment(None);
        Ok(Self { base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn build_list_styles(&self) -> HttpRequest {
        request(HttpMethod::Get, self.collection_url(), vec![accept_json()], None)
    }

    /// Create request for a style named `name` with filename `<name>.sld`.
    pub fn build_create_style(&self, name: &str) -> Result<HttpRequest, StyleError> {
        self.build_create_style_from(&Style::new(name))
    }

    /// Create request posting `style` exactly as given. The style must be
    /// named.
    pub fn build_create_style_from(&self, style: &Style) -> Result<HttpRequest, StyleError> {
        check_name(style.name.as_deref().unwrap_or_default())?;
        let body = serde_json::to_vec(&StyleBody {
            style: style.clone(),
        })
        .map_err(|e| StyleError::Serialization(e.to_string()))?;
        Ok(request(
            HttpMethod::Post,
            self.collection_url(),
            vec![content_type(JSON_TYPE), accept_json()],
            Some(body),
        ))
    }

    /// Upload request replacing the definition of style `name` with `content`.
    pub fn build_upload_style(
        &self,
        content: impl Into<Vec<u8>>,
        name: &str,
    ) -> Result<HttpRequest, StyleError> {
        Ok(request(
            HttpMethod::Put,
            self.style_url(name)?,
            vec![content_type(SLD_TYPE), accept_json()],
            Some(content.into()),
        ))
    }

    /// Delete request for style `name`; `purge` also removes the definition
    /// file on the server.
    pub fn build_delete_style(&self, name: &str, purge: bool) -> Result<HttpRequest, StyleError> {
        let mut url = self.style_url(name)?;
        url.query_pairs_mut().append_pair("purge", &purge.to_string());
        Ok(request(HttpMethod::Delete, url, vec![accept_json()], None))
    }

    pub fn parse_list_styles(&self, response: HttpResponse) -> Result<Vec<StyleRef>, StyleError> {
        check_status(&response, STATUS_OK)?;
        let list: StyleList = serde_json::from_str(&response.body).map_err(|e| {
            warn!("undecodable style listing: {e}");
            StyleError::Deserialization(e.to_string())
        })?;
        Ok(list.style)
    }

    pub fn parse_create_style(&self, response: HttpResponse) -> Result<(), StyleError> {
        check_status(&response, STATUS_CREATED)
    }

    pub fn parse_upload_style(&self, response: HttpResponse) -> Result<(), StyleError> {
        check_status(&response, STATUS_OK)
    }

    pub fn parse_delete_style(&self, response: HttpResponse) -> Result<(), StyleError> {
        check_status(&response, STATUS_OK)
    }

    /// `<base>/rest/styles`.
    fn collection_url(&self) -> Url {
        let mut url = self.base_url.clone();
        // new() rejects cannot-be-a-base URLs, so segments are always available.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["rest", "styles"]);
        }
        url
    }

    /// `<base>/rest/styles/<name>`, with `name` escaped as a single segment.
    fn style_url(&self, name: &str) -> Result<Url, StyleError> {
        check_name(name)?;
        let mut url = self.collection_url();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(name);
        }
        Ok(url)
    }
}

/// `push` drops `.` and `..` instead of escaping them, and an empty name
/// would address the collection, so all three are refused.
fn check_name(name: &str) -> Result<(), StyleError> {
    if matches!(name, "" | "." | "..") {
        warn!("refusing style name {name:?}");
        return Err(StyleError::InvalidStyleName(name.to_string()));
    }
    Ok(())
}

fn request(
    method: HttpMethod,
    url: Url,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
) -> HttpRequest {
    debug!("built {method} {url}");
    HttpRequest {
        method,
        url: url.into(),
        headers,
        body,
    }
}

fn accept_json() -> (String, String) {
    ("accept".to_string(), JSON_TYPE.to_string())
}

fn content_type(value: &str) -> (String, String) {
    ("content-type".to_string(), value.to_string())
}

/// Anything but `expected` becomes `UnexpectedStatus`.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), StyleError> {
    if response.status == expected {
        debug!("got expected status {expected}");
        return Ok(());
    }
    warn!("expected status {expected}, got {}", response.status);
    Err(StyleError::UnexpectedStatus {
        status: response.status,
        body: response.body.clone(),
    })
}
