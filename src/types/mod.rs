// ABOUTME: Validated domain types shared across the crate.
// ABOUTME: Currently image references; kept separate from engine wire types.

mod image_ref;

pub use image_ref::{ImageRef, ParseImageRefError};
