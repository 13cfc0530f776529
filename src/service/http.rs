use anyhow::{Context, Result};
use rquest::Client;
use rquest_util::Emulation;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Copy)]
pub enum ClientType {
    /// Plain client for collaborator APIs (auth, row store, completions).
    Standard,
    /// Full browser impersonation for fetching target pages. Some origins
    /// refuse unrecognized or missing user agents outright.
    BrowserEmulation,
}

/// Factory for the two HTTP client flavors the pipeline uses.
pub fn create_client(client_type: ClientType) -> Result<Client> {
    let builder = Client::builder().timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS));

    match client_type {
        ClientType::BrowserEmulation => builder
            .emulation(Emulation::Firefox136)
            .build()
            .context("Failed to build browser-emulating client"),
        ClientType::Standard => builder
            .build()
            .context("Failed to build standard client"),
    }
}
