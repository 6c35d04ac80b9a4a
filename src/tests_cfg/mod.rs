//! Sample configuration, profiles and trees shared by unit and integration
//! tests.

pub mod config;
pub mod profile;
pub mod tree;
