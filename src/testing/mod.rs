//! Testing utilities for AvatarFit
//!
//! Provides synthetic frames and images for offline testing.

pub mod synthetic_data;

pub use synthetic_data::{
    synthetic_face,
    synthetic_frame,
    synthetic_template,
    SyntheticCamera,
};
