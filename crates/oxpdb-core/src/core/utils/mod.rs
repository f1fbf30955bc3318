//! Utility functions for the core module.
//!
//! This module provides the static base-code tables shared by topology parsing
//! and fragment selection, along with small geometry helpers used by the frame
//! computation and alignment code.

pub mod codes;
pub mod geometry;
