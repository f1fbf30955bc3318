//! # Workflows Module
//!
//! This module provides the high-level workflow that orchestrates a complete
//! coarse-grained-to-atomistic conversion in oxPDB.
//!
//! ## Overview
//!
//! Workflows are the top-level entry points for users of oxPDB. They
//! encapsulate the entire conversion pipeline, from input discovery through
//! file serialization. The workflow handles resource loading, progress
//! reporting, and output organization, providing a simple API over the
//! engine's reconstruction stages.
//!
//! ## Architecture
//!
//! The module is organized around one conversion workflow:
//!
//! - **Convert Workflow** ([`convert`]) - Complete trajectory-to-PDB
//!   reconstruction including fragment placement, strand assembly,
//!   compliance rewriting, and single- or per-strand file output.

pub mod convert;
