// FortiOS REST HTTP client
//
// Wraps `reqwest::Client` with CMDB URL construction, vdom scoping,
// bounded retries for transient failures, and envelope unwrapping. The
// CRUD verbs themselves live in `cmdb.rs`.

use std::time::Duration;

use reqwest::{Method, StatusCode};
use secrecy::SecretString;
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::{debug, trace, warn};
use url::Url;

use crate::client::Object;
use crate::error::Error;
use crate::rest::models::{Envelope, normalize_version};
use crate::transport::TransportConfig;

const CMDB_PREFIX: &str = "api/v2/cmdb";
const STATUS_PATH: &str = "api/v2/monitor/system/status";

/// HTTP client for the FortiOS CMDB REST API.
pub struct RestClient {
    http: reqwest::Client,
    base_url: Url,
    vdom: String,
    retries: u32,
    /// Firmware version, either configured up front or probed once.
    firmware: OnceCell<String>,
}

/// A decoded response: the HTTP status, the envelope, and the raw body object.
pub(crate) struct Reply {
    pub status: StatusCode,
    pub envelope: Envelope,
    pub body: Object,
}

impl RestClient {
    /// Create a client for the device at `base_url` (e.g. `https://192.168.1.99`).
    pub fn new(
        base_url: Url,
        token: &SecretString,
        vdom: String,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client(token)?;
        Ok(Self::with_client(http, base_url, vdom))
    }

    /// Create a client around a pre-built `reqwest::Client`.
    ///
    /// The caller is responsible for any authentication headers.
    pub fn with_client(http: reqwest::Client, base_url: Url, vdom: String) -> Self {
        Self {
            http,
            base_url,
            vdom,
            retries: 1,
            firmware: OnceCell::new(),
        }
    }

    /// Pin the firmware version instead of probing the device for it.
    pub fn with_firmware_version(self, version: &str) -> Self {
        let firmware = OnceCell::new();
        // A fresh cell cannot already be set.
        let _ = firmware.set(normalize_version(version));
        Self { firmware, ..self }
    }

    /// The device base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn vdom(&self) -> &str {
        &self.vdom
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    pub(crate) fn set_retry_count(&mut self, retries: u32) {
        self.retries = retries;
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/api/v2/cmdb/{path}[/{mkey}]?vdom=..&filter=..`.
    ///
    /// `path` segments are taken verbatim (`vpn.ipsec/phase1-interface`);
    /// the `mkey` is percent-encoded as a single segment.
    pub(crate) fn cmdb_url(
        &self,
        path: &str,
        mkey: &str,
        vdom: &str,
        filter: Option<&str>,
    ) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?;
            segments.pop_if_empty();
            segments.extend(CMDB_PREFIX.split('/'));
            segments.extend(path.split('/').filter(|s| !s.is_empty()));
            if !mkey.is_empty() {
                segments.push(mkey);
            }
        }
        {
            let mut query = url.query_pairs_mut();
            if !vdom.is_empty() {
                query.append_pair("vdom", vdom);
            }
            if let Some(filter) = filter {
                query.append_pair("filter", filter);
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }
        Ok(url)
    }

    fn status_url(&self) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(STATUS_PATH.split('/'));
        Ok(url)
    }

    // ── Firmware probe ───────────────────────────────────────────────

    pub(crate) async fn probe_firmware(&self) -> Result<String, Error> {
        let version = self
            .firmware
            .get_or_try_init(|| async {
                let url = self.status_url()?;
                let reply = self.send(Method::GET, url, None).await?;
                let raw = reply.envelope.version.ok_or_else(|| Error::Deserialization {
                    message: "system status response carries no version".into(),
                    body: Value::Object(reply.body).to_string(),
                })?;
                debug!(version = %raw, "probed firmware version");
                Ok::<_, Error>(normalize_version(&raw))
            })
            .await?;
        Ok(version.clone())
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a request, retrying transient failures up to the retry count.
    pub(crate) async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<&Object>,
    ) -> Result<Reply, Error> {
        let attempts = self.retries.max(1);
        let mut attempt = 1;
        loop {
            match self.send_once(method.clone(), url.clone(), body).await {
                Err(e) if e.is_transient() && attempt < attempts => {
                    warn!(%url, attempt, error = %e, "transient failure, retrying");
                    tokio::time::sleep(Duration::from_millis(500 * u64::from(attempt))).await;
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    async fn send_once(
        &self,
        method: Method,
        url: Url,
        body: Option<&Object>,
    ) -> Result<Reply, Error> {
        debug!("{} {}", method, url);

        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            let shown = Value::Object(body.clone());
            trace!(payload = %shown, "request body");
            request = request.json(body);
        }
        let resp = request.send().await.map_err(Error::Transport)?;

        Self::parse_envelope(resp).await
    }

    /// Decode the response body and turn envelope failures into errors.
    ///
    /// A 404 is surfaced as [`Error::NotFound`] so callers can decide whether
    /// absence is an error for their verb.
    async fn parse_envelope(resp: reqwest::Response) -> Result<Reply, Error> {
        let status = resp.status();
        let path = resp.url().path().to_owned();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::Authentication {
                message: format!("device rejected the API token (HTTP {})", status.as_u16()),
            });
        }
        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound {
                path,
                mkey: String::new(),
            });
        }

        let text = resp.text().await.map_err(Error::Transport)?;
        let body: Object = if text.trim().is_empty() {
            Object::new()
        } else {
            serde_json::from_str(&text).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: text.clone(),
            })?
        };
        let envelope: Envelope = serde_json::from_value(Value::Object(body.clone()))
            .map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: text,
            })?;

        if envelope.http_status == Some(404) {
            return Err(Error::NotFound {
                path,
                mkey: String::new(),
            });
        }
        if envelope.is_error() || !status.is_success() {
            return Err(Error::Api {
                status: envelope.http_status.unwrap_or(status.as_u16()),
                code: envelope.error.unwrap_or(0),
                message: envelope.message(),
            });
        }

        let shown = Value::Object(body.clone());
        trace!(response = %shown, "response body");
        Ok(Reply {
            status,
            envelope,
            body,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> RestClient {
        RestClient::with_client(reqwest::Client::new(), Url::parse(base).unwrap(), "root".into())
    }

    #[test]
    fn cmdb_url_with_key_and_vdom() {
        let c = client("https://fgt.example.com");
        let url = c
            .cmdb_url("firewall/proxy-address", "web proxy", "root", None)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://fgt.example.com/api/v2/cmdb/firewall/proxy-address/web%20proxy?vdom=root"
        );
    }

    #[test]
    fn cmdb_url_singleton_without_vdom() {
        let c = client("https://fgt.example.com/");
        let url = c.cmdb_url("router/rip", "", "", None).unwrap();
        assert_eq!(url.as_str(), "https://fgt.example.com/api/v2/cmdb/router/rip");
    }

    #[test]
    fn cmdb_url_dotted_path_and_filter() {
        let c = client("https://10.0.0.1:8443");
        let url = c
            .cmdb_url("vpn.ipsec/phase1-interface", "", "corp", Some("name=@hq"))
            .unwrap();
        assert_eq!(url.path(), "/api/v2/cmdb/vpn.ipsec/phase1-interface");
        assert_eq!(url.query(), Some("vdom=corp&filter=name%3D%40hq"));
    }

    #[test]
    fn pinned_firmware_is_normalized() {
        let c = client("https://fgt.example.com").with_firmware_version("v7.4.1");
        assert_eq!(c.firmware.get().map(String::as_str), Some("7.4.1"));
    }
}
