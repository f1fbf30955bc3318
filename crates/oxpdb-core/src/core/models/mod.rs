//! # Core Models Module
//!
//! This module contains the fundamental data structures used to represent
//! coarse-grained systems and their atomistic reconstruction targets in oxPDB.
//!
//! ## Overview
//!
//! The models module defines the core abstractions shared by every stage of a
//! conversion: atoms with fixed-width PDB fields, orthonormal orientation
//! frames, strand topology, and per-frame trajectory state. These models are
//! designed to:
//!
//! - **Represent structure faithfully** - Every field of the output record format is carried explicitly
//! - **Stay immutable where possible** - Topology and trajectory data never change after parsing
//! - **Keep geometry strongly typed** - Positions are `Point3`, orientations are `Vector3` triples
//!
//! ## Key Components
//!
//! - [`atom`] - Individual atom representation with PDB record fields and group classification
//! - [`frame`] - Orthonormal orientation frames with Gram-Schmidt correction
//! - [`system`] - Strand topology: monomer ordering, circularity, peptide tagging
//! - [`conf`] - One trajectory frame: box dimensions plus per-monomer positions and orientation vectors
//!
//! ## Usage
//!
//! Most conversions start by parsing a topology into a [`system::System`] and a
//! configuration into a [`conf::Configuration`], then walking strands in
//! declaration order.
//!
//! ```ignore
//! use oxpdb::core::models::{conf::Configuration, system::System};
//!
//! let system = oxpdb::core::io::topology::load(&topology_path)?;
//! let mut conf = oxpdb::core::io::conf::load_first(&conf_path, system.monomer_count())?;
//! conf.inbox_centered();
//! ```

pub mod atom;
pub mod conf;
pub mod frame;
pub mod system;
