// CMDB verbs for `RestClient`
//
// POST creates, GET reads/lists, PUT updates, DELETE deletes. Singleton
// tables (`router/rip`, `system/session-ttl`) are addressed without a key.

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use crate::client::{FortiClient, Object};
use crate::error::Error;
use crate::rest::client::RestClient;
use crate::rest::models::first_result;

#[async_trait]
impl FortiClient for RestClient {
    async fn firmware_version(&self) -> Result<String, Error> {
        self.probe_firmware().await
    }

    fn default_vdom(&self) -> &str {
        self.vdom()
    }

    fn set_retries(&mut self, retries: u32) {
        self.set_retry_count(retries);
    }

    /// `POST /api/v2/cmdb/{path}`
    async fn create(&self, path: &str, obj: &Object, vdom: &str) -> Result<Object, Error> {
        let url = self.cmdb_url(path, "", vdom, None)?;
        let reply = self.send(Method::POST, url, Some(obj)).await?;
        debug!(path, status = %reply.status, "created object");
        Ok(reply.body)
    }

    /// `GET /api/v2/cmdb/{path}/{mkey}`
    async fn read(&self, path: &str, mkey: &str, vdom: &str) -> Result<Option<Object>, Error> {
        let url = self.cmdb_url(path, mkey, vdom, None)?;
        match self.send(Method::GET, url, None).await {
            Ok(reply) => Ok(first_result(reply.body.get("results")).cloned()),
            Err(e) if e.is_not_found() => {
                debug!(path, mkey, "object not found");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// `PUT /api/v2/cmdb/{path}/{mkey}`
    async fn update(
        &self,
        path: &str,
        obj: &Object,
        mkey: &str,
        vdom: &str,
    ) -> Result<Object, Error> {
        let url = self.cmdb_url(path, mkey, vdom, None)?;
        let reply = self.send(Method::PUT, url, Some(obj)).await?;
        debug!(path, mkey, status = %reply.status, "updated object");
        Ok(reply.body)
    }

    /// `DELETE /api/v2/cmdb/{path}/{mkey}`
    async fn delete(&self, path: &str, mkey: &str, vdom: &str) -> Result<(), Error> {
        let url = self.cmdb_url(path, mkey, vdom, None)?;
        match self.send(Method::DELETE, url, None).await {
            Ok(_) => Ok(()),
            Err(Error::NotFound { .. }) => Err(Error::NotFound {
                path: path.to_owned(),
                mkey: mkey.to_owned(),
            }),
            Err(e) => Err(e),
        }
    }

    /// `GET /api/v2/cmdb/{path}?filter=..`
    async fn list(
        &self,
        path: &str,
        filter: Option<&str>,
        vdom: &str,
    ) -> Result<Vec<Object>, Error> {
        let url = self.cmdb_url(path, "", vdom, filter)?;
        let reply = self.send(Method::GET, url, None).await?;
        let items = match reply.body.get("results") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_object)
                .cloned()
                .collect(),
            Some(Value::Object(obj)) => vec![obj.clone()],
            _ => Vec::new(),
        };
        debug!(path, count = items.len(), "listed objects");
        Ok(items)
    }
}
