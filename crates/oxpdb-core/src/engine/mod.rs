//! # Engine Module
//!
//! This module implements the conversion engine that rebuilds all-atom
//! structures from coarse-grained trajectory frames, providing the stateful
//! machinery between the passive data layer and the public workflows.
//!
//! ## Overview
//!
//! The engine orchestrates the complete reconstruction process. It aligns
//! reference fragments to simulated orientation frames, translates them onto
//! scaled positions under periodic boundaries, assembles per-strand record
//! blocks with chain identifiers and terminators, and runs the compliance
//! renumbering pass that mixed nucleic-acid and protein scenes require.
//!
//! ## Architecture
//!
//! The module is organized into specialized submodules that handle different
//! stages of the conversion:
//!
//! - **Configuration** ([`config`]) - Conversion parameters, read direction, and output options
//! - **Progress Monitoring** ([`progress`]) - Progress reporting and user feedback mechanisms
//! - **Error Handling** ([`error`]) - Engine-specific error types and error propagation
//!
//! The remaining stages (alignment, placement, protein anchoring, assembly,
//! and compliance rewriting) are internal and reached through
//! [`crate::workflows`].

pub(crate) mod alignment;
pub(crate) mod assembler;
pub mod config;
pub mod error;
pub(crate) mod placement;
pub mod progress;
pub(crate) mod protein;
pub(crate) mod rewriter;
