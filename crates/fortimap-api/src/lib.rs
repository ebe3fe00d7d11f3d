// fortimap-api: async client for the FortiOS CMDB REST API

pub mod client;
pub mod error;
pub mod rest;
pub mod transport;

pub use client::{FortiClient, Object, response_mkey};
pub use error::Error;
pub use rest::RestClient;
pub use transport::{TlsMode, TransportConfig};
