// ABOUTME: Container image reference parsing and validation.
// ABOUTME: Handles formats like nginx, nginx:tag, registry/image:tag@digest.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseImageRefError {
    #[error("image reference cannot be empty")]
    Empty,

    #[error("invalid character in image reference: {0}")]
    InvalidChar(char),
}

/// A parsed image reference.
///
/// Unqualified references get the `latest` tag so that the rendered form is
/// stable regardless of how the caller wrote it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    registry: Option<String>,
    repository: String,
    tag: Option<String>,
    digest: Option<String>,
}

fn is_reference_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '/' | ':' | '.' | '-' | '_' | '@')
}

/// The first path component names a registry only if it could be a hostname:
/// it contains a dot or a port, or is the literal "localhost".
fn is_registry_component(component: &str) -> bool {
    component.contains('.') || component.contains(':') || component == "localhost"
}

impl ImageRef {
    pub fn parse(input: &str) -> Result<Self, ParseImageRefError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ParseImageRefError::Empty);
        }
        if let Some(c) = input.chars().find(|c| !is_reference_char(*c)) {
            return Err(ParseImageRefError::InvalidChar(c));
        }

        let (rest, digest) = match input.split_once('@') {
            Some((rest, digest)) => (rest, Some(digest.to_string())),
            None => (input, None),
        };

        // A colon after the last slash is a tag separator; earlier colons
        // belong to a registry port.
        let (rest, mut tag) = match rest.rsplit_once(':') {
            Some((before, after)) if !after.contains('/') => (before, Some(after.to_string())),
            _ => (rest, None),
        };

        let (registry, repository) = match rest.split_once('/') {
            Some((first, remainder)) if is_registry_component(first) => {
                (Some(first.to_string()), remainder.to_string())
            }
            _ => (None, rest.to_string()),
        };

        if tag.is_none() && digest.is_none() {
            tag = Some("latest".to_string());
        }

        Ok(Self {
            registry,
            repository,
            tag,
            digest,
        })
    }

    pub fn registry(&self) -> Option<&str> {
        self.registry.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.repository
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref registry) = self.registry {
            write!(f, "{}/", registry)?;
        }
        write!(f, "{}", self.repository)?;
        if let Some(ref tag) = self.tag {
            write!(f, ":{}", tag)?;
        }
        if let Some(ref digest) = self.digest {
            write!(f, "@{}", digest)?;
        }
        Ok(())
    }
}
