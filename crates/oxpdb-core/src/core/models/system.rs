/// A single coarse-grained unit of a strand, as declared in the topology.
#[derive(Debug, Clone, PartialEq)]
pub struct Monomer {
    /// The raw type code from the topology file, numeric or symbolic.
    pub code: String,
    /// The row index in the configuration file holding this monomer's state.
    pub conf_index: usize,
    /// Conf index of the 3' neighbour, or -1 at a free 3' end.
    pub n3: isize,
    /// Conf index of the 5' neighbour, or -1 at a free 5' end.
    pub n5: isize,
}

/// An ordered sequence of monomers sharing one strand id.
///
/// Monomers are stored in topology declaration order, which for nucleic acids
/// is the 3' to 5' direction. Whether output walks this order or its reverse
/// is decided by the configured read direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Strand {
    /// The strand id from the topology; negative ids mark peptides.
    pub id: i64,
    /// The monomers in declaration order.
    pub monomers: Vec<Monomer>,
    /// Whether the strand closes on itself and has no free ends.
    pub circular: bool,
}

impl Strand {
    /// Returns `true` if this strand is a peptide rather than a nucleic acid.
    pub fn is_peptide(&self) -> bool {
        self.id < 0
    }
}

/// The full topology of a simulated system.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct System {
    /// Strands ordered by first appearance in the topology file.
    pub strands: Vec<Strand>,
}

impl System {
    /// Returns the total number of monomers across all strands.
    pub fn monomer_count(&self) -> usize {
        self.strands.iter().map(|s| s.monomers.len()).sum()
    }

    /// Returns the number of strands.
    pub fn strand_count(&self) -> usize {
        self.strands.len()
    }

    /// Returns `true` if any strand is a peptide.
    pub fn has_peptides(&self) -> bool {
        self.strands.iter().any(Strand::is_peptide)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strand(id: i64, n: usize) -> Strand {
        Strand {
            id,
            monomers: (0..n)
                .map(|i| Monomer {
                    code: "0".to_string(),
                    conf_index: i,
                    n3: -1,
                    n5: -1,
                })
                .collect(),
            circular: false,
        }
    }

    #[test]
    fn monomer_count_sums_over_strands() {
        let system = System {
            strands: vec![strand(1, 3), strand(2, 5)],
        };
        assert_eq!(system.monomer_count(), 8);
        assert_eq!(system.strand_count(), 2);
    }

    #[test]
    fn negative_strand_ids_mark_peptides() {
        assert!(strand(-1, 2).is_peptide());
        assert!(!strand(1, 2).is_peptide());
    }

    #[test]
    fn has_peptides_detects_any_negative_id() {
        let nucleic_only = System {
            strands: vec![strand(1, 2), strand(2, 2)],
        };
        let mixed = System {
            strands: vec![strand(1, 2), strand(-2, 2)],
        };
        assert!(!nucleic_only.has_peptides());
        assert!(mixed.has_peptides());
    }
}
