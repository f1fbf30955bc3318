//! # oxPDB Core Library
//!
//! A library for rebuilding all-atom molecular structures from coarse-grained
//! oxDNA trajectories, serializing the result as standard PDB files compatible
//! with downstream structural-biology tools.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture so that concerns stay
//! separated and each layer remains independently testable.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models (`System`,
//!   `Configuration`, `Frame`), the reference fragment library, and readers/writers
//!   for the oxDNA and PDB file families.
//!
//! - **[`engine`]: The Logic Core.** This stateful layer orchestrates the
//!   reconstruction process. It includes the frame alignment routines, the
//!   per-nucleotide placement pipeline, the strand assembler that interleaves
//!   nucleic-acid and protein chains, and the compliance rewriter that renumbers
//!   multi-chain output.
//!
//! - **[`workflows`]: The Public API.** This is the highest-level, user-facing
//!   layer. It ties the `engine` and `core` together to execute a complete
//!   trajectory-to-PDB conversion and is the intended entry point for end-users
//!   of the library.

pub mod core;
pub mod engine;
pub mod workflows;
