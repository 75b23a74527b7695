//! Synchronous client core for the GeoServer styles REST resource.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values for the four
//! styles operations (list, create, upload, delete). `StyleService` runs the
//! round trip through a `Transport`; with the default `ureq` feature,
//! `UreqTransport` does it over real HTTP.
//!
//! # Design
//! - `StyleClient` is stateless; it holds only the parsed base URL.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - Success is one exact status per operation; everything else is a
//!   `StyleError` carrying the status, the transport failure, or the decode
//!   failure.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::StyleClient;
pub use error::StyleError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, JSON_TYPE, SLD_TYPE};
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use transport::{StyleService, Transport};
pub use types::{LanguageVersion, Style, StyleBody, StyleList, StyleRef};
