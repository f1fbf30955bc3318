//! Reference nucleotide fragments and the library that loads them.
//!
//! This module provides the atomistic templates each coarse-grained nucleotide
//! is rebuilt from. A template PDB is parsed into per-residue [`fragment::Fragment`]
//! values with orientation frames derived from atom geometry; the
//! [`library::FragmentLibrary`] keeps the best fragment per base type and hands
//! out clones for placement.

pub mod fragment;
pub mod library;
