// ABOUTME: Descriptor naming an image and, for builds, its source directory.
// ABOUTME: Constructed per operation, validated at the start of pull/build.

use super::error::AcquireError;
use crate::types::ImageRef;
use std::path::{Path, PathBuf};

/// Names an image to acquire.
///
/// `name` is the registry reference for pulls and the resulting tag for
/// builds. `source_path` is only meaningful for builds.
#[derive(Debug, Clone)]
pub struct ImageDescriptor {
    name: String,
    source_path: Option<PathBuf>,
}

impl ImageDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source_path: None,
        }
    }

    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(path.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Validate the name as an image reference.
    pub(crate) fn image_ref(&self) -> Result<ImageRef, AcquireError> {
        Ok(ImageRef::parse(&self.name)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_is_rejected() {
        let descriptor = ImageDescriptor::new("");
        assert!(matches!(
            descriptor.image_ref(),
            Err(AcquireError::InvalidReference(_))
        ));
    }

    #[test]
    fn valid_name_normalizes_to_latest() {
        let descriptor = ImageDescriptor::new("myimagename");
        let reference = descriptor.image_ref().unwrap();
        assert_eq!(reference.to_string(), "myimagename:latest");
    }

    #[test]
    fn source_path_is_optional() {
        let descriptor = ImageDescriptor::new("myimagename");
        assert!(descriptor.source_path().is_none());

        let descriptor = descriptor.with_source("/my/path/1/");
        assert_eq!(descriptor.source_path(), Some(Path::new("/my/path/1/")));
    }
}
