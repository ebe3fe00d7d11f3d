// FortiOS REST client modules
//
// `client` holds transport mechanics (URLs, retries, envelope parsing);
// `cmdb` implements the `FortiClient` verbs on top of it.

pub mod client;
mod cmdb;
pub mod models;

pub use client::RestClient;
