//! Request signing: where the bearer token comes from.
//!
//! The client asks its [`TokenSource`] for a token on every request, so a
//! token rotated on disk is picked up without rebuilding the client.

use std::path::PathBuf;

/// Supplies the bearer token attached to each request.
pub trait TokenSource: Send + Sync {
    /// Returns the current token, or `None` to send the request unsigned.
    fn token(&self) -> Option<String>;
}

/// Sends every request without an `Authorization` header.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAuth;

impl TokenSource for NoAuth {
    fn token(&self) -> Option<String> {
        None
    }
}

/// A fixed token, typically taken from the environment.
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl TokenSource for StaticToken {
    fn token(&self) -> Option<String> {
        non_blank(&self.0)
    }
}

/// A token persisted in a file, re-read on every call.
#[derive(Debug, Clone)]
pub struct TokenFile {
    path: PathBuf,
}

impl TokenFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenSource for TokenFile {
    fn token(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => non_blank(&contents),
            Err(e) => {
                tracing::warn!("Failed to read token file {}: {}", self.path.display(), e);
                None
            }
        }
    }
}

fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
