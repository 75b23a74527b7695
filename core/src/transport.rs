//! Executing built requests.
//!
//! # Design
//! `Transport` is the seam between the pure `StyleClient` and the network.
//! `StyleService` pairs the two and runs build, execute, parse for each
//! operation. Timeouts, proxies and credentials belong to the transport;
//! nothing here retries.

use log::debug;

use crate::client::StyleClient;
use crate::error::StyleError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{Style, StyleRef};

/// Executes one `HttpRequest` and returns whatever response came back.
///
/// Implementations must hand back every status as a response; only a failure
/// to get a response at all is an `Err`.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, StyleError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, StyleError> {
        (**self).execute(request)
    }
}

/// The styles client bound to a transport.
#[derive(Debug, Clone)]
pub struct StyleService<T> {
    client: StyleClient,
    transport: T,
}

impl<T: Transport> StyleService<T> {
    pub fn new(client: StyleClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &StyleClient {
        &self.client
    }

    pub fn list_styles(&self) -> Result<Vec<StyleRef>, StyleError> {
        let response = self.round_trip(self.client.build_list_styles())?;
        self.client.parse_list_styles(response)
    }

    /// Create `name` with definition file `<name>.sld`.
    pub fn create_style(&self, name: &str) -> Result<(), StyleError> {
        let response = self.round_trip(self.client.build_create_style(name)?)?;
        self.client.parse_create_style(response)
    }

    pub fn create_style_from(&self, style: &Style) -> Result<(), StyleError> {
        let response = self.round_trip(self.client.build_create_style_from(style)?)?;
        self.client.parse_create_style(response)
    }

    pub fn upload_style(&self, content: impl Into<Vec<u8>>, name: &str) -> Result<(), StyleError> {
        let response = self.round_trip(self.client.build_upload_style(content, name)?)?;
        self.client.parse_upload_style(response)
    }

    pub fn delete_style(&self, name: &str, purge: bool) -> Result<(), StyleError> {
        let response = self.round_trip(self.client.build_delete_style(name, purge)?)?;
        self.client.parse_delete_style(response)
    }

    fn round_trip(&self, request: HttpRequest) -> Result<HttpResponse, StyleError> {
        let response = self.transport.execute(&request)?;
        debug!("{} {} -> {}", request.method, request.url, response.status);
        Ok(response)
    }
}

#[cfg(feature = "ureq")]
pub use self::ureq_transport::UreqTransport;

#[cfg(feature = "ureq")]
mod ureq_transport {
    use ureq::{Agent, RequestBuilder};

    use super::Transport;
    use crate::error::StyleError;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// Blocking transport backed by a `ureq::Agent`.
    #[derive(Debug, Clone)]
    pub struct UreqTransport {
        agent: Agent,
    }

    impl UreqTransport {
        /// Agent with `http_status_as_error` disabled, so 4xx/5xx come back
        /// as responses for the client to interpret.
        pub fn new() -> Self {
            let agent = Agent::config_builder()
                .http_status_as_error(false)
                .build()
                .new_agent();
            Self { agent }
        }

        /// Use a caller-configured agent. It must not treat HTTP statuses as
        /// errors, or non-success statuses surface as `StyleError::Transport`.
        pub fn with_agent(agent: Agent) -> Self {
            Self { agent }
        }
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Transport for UreqTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, StyleError> {
            let url = request.url.as_str();
            let headers = &request.headers;
            let body = request.body.as_deref();

            let result = match request.method {
                HttpMethod::Get => with_headers(self.agent.get(url), headers).call(),
                HttpMethod::Delete => with_headers(self.agent.delete(url), headers).call(),
                HttpMethod::Post => {
                    let builder = with_headers(self.agent.post(url), headers);
                    match body {
                        Some(body) => builder.send(body),
                        None => builder.send_empty(),
                    }
                }
                HttpMethod::Put => {
                    let builder = with_headers(self.agent.put(url), headers);
                    match body {
                        Some(body) => builder.send(body),
                        None => builder.send_empty(),
                    }
                }
            };
            let mut response = result.map_err(|e| StyleError::Transport(e.to_string()))?;

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(k, v)| {
                    v.to_str()
                        .ok()
                        .map(|v| (k.as_str().to_string(), v.to_string()))
                })
                .collect();
            let body = response
                .body_mut()
                .read_to_string()
                .map_err(|e| StyleError::Transport(e.to_string()))?;

            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }

    fn with_headers<B>(
        mut builder: RequestBuilder<B>,
        headers: &[(String, String)],
    ) -> RequestBuilder<B> {
        for (key, value) in headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        builder
    }
}
