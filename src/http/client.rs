//! HTTP client that follows redirects itself so the hop count stays bounded.

use log::debug;
use reqwest::{Client, Response, StatusCode, Url, header::LOCATION, redirect::Policy};
use std::time::Duration;

use super::FetchError;

/// Maximum number of redirect hops followed for one retrieval.
pub const MAX_REDIRECTS: usize = 5;

/// Client label sent as `User-Agent` with every request.
pub const USER_AGENT: &str = "eldrin-server-postinstall";

/// Deadlines applied to every request. `None` means no deadline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientOptions {
    pub connect_timeout: Option<Duration>,
    pub timeout: Option<Duration>,
}

/// HTTP client with explicit, bounded redirect following.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Builds the underlying reqwest client with its own redirect policy disabled.
    pub fn new(options: &ClientOptions) -> Result<Self, FetchError> {
        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(Policy::none());

        if let Some(connect_timeout) = options.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Performs a GET request, following up to [`MAX_REDIRECTS`] redirects.
    ///
    /// Only a terminal `200 OK` is returned; every other final status becomes
    /// [`FetchError::HttpStatus`]. The body is left unread so callers can stream it.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, url: &str) -> Result<Response, FetchError> {
        let mut current = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        let mut hops = 0;

        loop {
            debug!("GET {}", current);
            let response = self.client.get(current.clone()).send().await?;
            let status = response.status();

            if status.is_redirection()
                && let Some(header) = response.headers().get(LOCATION)
            {
                if hops == MAX_REDIRECTS {
                    return Err(FetchError::TooManyRedirects {
                        limit: MAX_REDIRECTS,
                    });
                }

                let location = header.to_str().map_err(|e| FetchError::InvalidUrl {
                    url: String::from_utf8_lossy(header.as_bytes()).into_owned(),
                    reason: e.to_string(),
                })?;
                // Relative locations resolve against the URL that produced them.
                let next = current.join(location).map_err(|e| FetchError::InvalidUrl {
                    url: location.to_string(),
                    reason: e.to_string(),
                })?;

                hops += 1;
                debug!(
                    "Redirect {}/{}: {} -> {} ({})",
                    hops, MAX_REDIRECTS, current, next, status
                );
                current = next;
                continue;
            }

            if status != StatusCode::OK {
                return Err(FetchError::HttpStatus {
                    status: status.as_u16(),
                    reason: status.canonical_reason().unwrap_or_default().to_string(),
                });
            }

            return Ok(response);
        }
    }
}
