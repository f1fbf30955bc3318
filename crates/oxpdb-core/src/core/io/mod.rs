//! Provides input/output functionality for the oxDNA and PDB file families.
//!
//! This module contains the readers that turn an oxDNA simulation into
//! in-memory models (input script, topology, configuration, RMSF decorations)
//! and the fixed-column PDB parsing and serialization shared by reference
//! templates, protein templates, and the final output writer.

pub mod conf;
pub mod input;
pub mod pdb;
pub mod rmsf;
pub mod topology;
