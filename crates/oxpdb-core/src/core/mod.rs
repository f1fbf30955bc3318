//! # Core Module
//!
//! This module provides the fundamental building blocks for coarse-grained to
//! atomistic structure reconstruction in oxPDB, serving as the stateless
//! foundation of the library.
//!
//! ## Overview
//!
//! The core module implements the data structures, file readers, and geometric
//! utilities required to turn an oxDNA topology/configuration pair into placed
//! atomistic fragments. Everything here is free of conversion state: parsing
//! produces plain values, and the fragment library is immutable once loaded.
//!
//! ## Architecture
//!
//! The module is organized into specialized submodules that handle different
//! aspects of the reconstruction input:
//!
//! - **Molecular Representation** ([`models`]) - Atoms, orientation frames, strands, and trajectory frames
//! - **Reference Fragments** ([`fragments`]) - Atomistic nucleotide templates and their orientation frames
//! - **File I/O** ([`io`]) - Readers for oxDNA input/topology/configuration files and PDB parsing/serialization
//! - **Utilities** ([`utils`]) - Base-code tables and small geometry helpers
//!
//! ## Key Capabilities
//!
//! - **Complete trajectory representation** with per-monomer positions and orientation vectors
//! - **Reference fragment management** with per-base deduplication and frame orthonormalization
//! - **Fixed-column PDB parsing and serialization** shared by templates and output records
//! - **Periodic-boundary handling** for configurations that leave the simulation box

pub mod fragments;
pub mod io;
pub mod models;
pub mod utils;
