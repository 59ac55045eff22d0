//! HTTP client for a single 3x-ui panel.
//!
//! `PanelClient` owns one panel's session cookie, logs in lazily and re-authenticates
//! at most once per call when the panel rejects the session.

pub mod client;
pub mod session;

pub use client::PanelClient;

#[cfg(test)]
mod test;
