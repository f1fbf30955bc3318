use crate::core::fragments::library::FragmentLibrary;
use crate::core::io::pdb::Record;
use crate::core::io::rmsf::DecorationMap;
use crate::core::models::atom::Atom;
use crate::core::models::conf::MonomerState;
use crate::core::models::system::{Strand, System};
use crate::engine::config::ConvertConfig;
use crate::engine::error::EngineError;
use crate::engine::placement::{PlacementPipeline, Terminus};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::protein::{PlacerSignal, ProteinPlacer, ProteinTemplate};
use nalgebra::{Point3, Vector3};
use tracing::debug;

/// Everything the assembly stage reads; owned by the workflow and borrowed
/// here for the duration of one conversion.
pub(crate) struct AssemblyInput<'a> {
    pub(crate) system: &'a System,
    pub(crate) states: &'a [MonomerState],
    pub(crate) library: &'a FragmentLibrary,
    pub(crate) decorations: &'a DecorationMap,
    pub(crate) box_angstrom: Vector3<f64>,
    pub(crate) protein_templates: &'a [ProteinTemplate],
    pub(crate) config: &'a ConvertConfig,
}

/// The records of one rebuilt strand, kept separate so the per-strand output
/// mode can write each to its own file.
#[derive(Debug)]
pub(crate) struct StrandBlock {
    pub(crate) strand_id: i64,
    pub(crate) records: Vec<Record>,
}

#[derive(Debug)]
pub(crate) struct Assembly {
    pub(crate) blocks: Vec<StrandBlock>,
    /// Whether any peptide strand was rebuilt; those carry template chain
    /// letters and serials that need the compliance rewrite.
    pub(crate) contains_protein: bool,
}

/// Rebuilds every strand of the system into atom records.
///
/// Nucleic strands walk their monomers in the configured direction and close
/// with a bare terminator. Peptide strands consume protein templates through
/// the feed and are left unterminated for the rewriter. The chain letter
/// advances after every strand when all strands share one output file and
/// stays at `A` in per-strand mode.
pub(crate) fn assemble(
    input: &AssemblyInput,
    placer: &dyn ProteinPlacer,
    reporter: &ProgressReporter,
) -> Result<Assembly, EngineError> {
    let mut pipeline = PlacementPipeline::new(
        input.library,
        input.decorations,
        input.box_angstrom,
        input.config.include_hydrogens,
        input.config.uniform_residue_names,
    );
    let mut feed = ProteinFeed::new(
        input.protein_templates,
        input.config.shared_protein_template,
    );

    reporter.report(Progress::ConversionStart {
        strands: input.system.strand_count() as u64,
    });

    let mut blocks = Vec::with_capacity(input.system.strands.len());
    let mut contains_protein = false;
    let mut chain_slot = 0usize;

    for strand in &input.system.strands {
        reporter.report(Progress::StrandStart { id: strand.id });
        debug!(
            strand = strand.id,
            monomers = strand.monomers.len(),
            peptide = strand.is_peptide(),
            "Assembling strand"
        );

        let records = if strand.is_peptide() {
            contains_protein = true;
            assemble_peptide(strand, input, placer, &mut feed)?
        } else {
            assemble_nucleic(strand, input, &mut pipeline, &chain_letter(chain_slot))?
        };
        blocks.push(StrandBlock {
            strand_id: strand.id,
            records,
        });

        if !input.config.one_file_per_strand {
            chain_slot += 1;
        }
        reporter.report(Progress::StrandFinish);
    }

    reporter.report(Progress::ConversionFinish);
    Ok(Assembly {
        blocks,
        contains_protein,
    })
}

fn assemble_nucleic(
    strand: &Strand,
    input: &AssemblyInput,
    pipeline: &mut PlacementPipeline,
    chain_id: &str,
) -> Result<Vec<Record>, EngineError> {
    let stored_len = strand.monomers.len();
    let mut order: Vec<usize> = (0..stored_len).collect();
    if input.config.direction.reverses_declared_order() {
        order.reverse();
    }

    let mut records = Vec::new();
    for (output_index, &stored_index) in order.iter().enumerate() {
        let monomer = &strand.monomers[stored_index];
        let state = &input.states[monomer.conf_index];
        let terminus = terminus_for(stored_index, stored_len, strand.circular);
        let atoms = pipeline.place(
            monomer,
            state,
            strand.id,
            chain_id,
            output_index + 1,
            terminus,
        )?;
        records.extend(atoms.into_iter().map(Record::Atom));
    }
    records.push(Record::Ter(None));
    Ok(records)
}

fn assemble_peptide(
    strand: &Strand,
    input: &AssemblyInput,
    placer: &dyn ProteinPlacer,
    feed: &mut ProteinFeed,
) -> Result<Vec<Record>, EngineError> {
    let positions: Vec<Point3<f64>> = strand
        .monomers
        .iter()
        .map(|m| input.states[m.conf_index].position)
        .collect();

    let mut atoms = Vec::new();
    feed.place_strand(placer, &positions, strand.id, &mut atoms)?;
    Ok(atoms.into_iter().map(Record::Atom).collect())
}

/// Residue position on the strand ends, judged against stored topology
/// order. Iteration direction changes which end is written first but never
/// which end is chemically which.
fn terminus_for(stored_index: usize, stored_len: usize, circular: bool) -> Terminus {
    if circular {
        return Terminus::None;
    }
    if stored_index == 0 {
        Terminus::ThreePrime
    } else if stored_index == stored_len - 1 {
        Terminus::FivePrime
    } else {
        Terminus::None
    }
}

fn chain_letter(slot: usize) -> String {
    let letter = (b'A' + (slot % 26) as u8) as char;
    letter.to_string()
}

/// Hands protein templates to peptide strands in order, resuming partially
/// consumed templates and skipping ones with too few residues left.
struct ProteinFeed<'a> {
    templates: &'a [ProteinTemplate],
    index: usize,
    cursor: usize,
    shared: bool,
}

impl<'a> ProteinFeed<'a> {
    fn new(templates: &'a [ProteinTemplate], shared: bool) -> Self {
        Self {
            templates,
            index: 0,
            cursor: 0,
            shared,
        }
    }

    fn place_strand(
        &mut self,
        placer: &dyn ProteinPlacer,
        positions: &[Point3<f64>],
        strand_id: i64,
        sink: &mut Vec<Atom>,
    ) -> Result<(), EngineError> {
        if self.shared {
            let template = self
                .templates
                .first()
                .ok_or(EngineError::MissingProteinTemplate { strand_id })?;
            let before = sink.len();
            let signal = placer.place_strand(template, positions, 0, sink);
            if signal == PlacerSignal::Exhausted && sink.len() == before {
                return Err(EngineError::MissingProteinTemplate { strand_id });
            }
            return Ok(());
        }

        loop {
            let Some(template) = self.templates.get(self.index) else {
                return Err(EngineError::MissingProteinTemplate { strand_id });
            };
            let before = sink.len();
            match placer.place_strand(template, positions, self.cursor, sink) {
                PlacerSignal::Placed { next_cursor } => {
                    self.cursor = next_cursor;
                    return Ok(());
                }
                PlacerSignal::Exhausted => {
                    self.index += 1;
                    self.cursor = 0;
                    if sink.len() > before {
                        return Ok(());
                    }
                    debug!(
                        strand = strand_id,
                        residues = template.len(),
                        "Protein template too short for strand, advancing to the next"
                    );
                }
            }
        }
    }
}
