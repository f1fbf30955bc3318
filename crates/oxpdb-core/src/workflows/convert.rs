use crate::core::fragments::library::FragmentLibrary;
use crate::core::io::pdb::{self, Record};
use crate::core::io::rmsf::DecorationMap;
use crate::core::io::{conf, input, topology};
use crate::engine::assembler::{self, Assembly, AssemblyInput};
use crate::engine::config::ConvertConfig;
use crate::engine::error::EngineError;
use crate::engine::placement::FROM_OXDNA_TO_ANGSTROM;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::protein::{CaAnchorPlacer, ProteinTemplate};
use crate::engine::rewriter;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// What a finished conversion produced.
#[derive(Debug, Clone)]
pub struct ConvertSummary {
    pub files: Vec<PathBuf>,
    pub strands: usize,
    pub monomers: usize,
    /// Whether the compliance rewrite ran because peptide strands were
    /// rebuilt from protein templates.
    pub rewritten: bool,
}

/// Runs a complete conversion: reads the simulation inputs, rebuilds every
/// strand at atomic detail, and writes the resulting PDB file(s).
#[instrument(skip_all, name = "convert_workflow")]
pub fn run(
    config: &ConvertConfig,
    reporter: &ProgressReporter,
) -> Result<ConvertSummary, EngineError> {
    // === Phase 0: Load inputs and reference templates ===
    reporter.report(Progress::StageStart {
        name: "Loading Inputs",
    });
    info!("Starting conversion setup: reading topology, trajectory, and templates.");

    let topology_path = PathBuf::from(input::input_parameter(&config.input_path, "topology")?);
    let system = topology::load(&topology_path)?;
    let mut configuration = conf::load_first(&config.conf_path, system.monomer_count())?;
    configuration.inbox_centered();

    let library = FragmentLibrary::load(&config.template_path)?;
    let decorations = load_decorations(config, system.monomer_count())?;
    let protein_templates = config
        .protein_template_paths
        .iter()
        .map(|path| ProteinTemplate::load(path))
        .collect::<Result<Vec<_>, _>>()?;

    info!(
        strands = system.strand_count(),
        monomers = system.monomer_count(),
        protein_templates = protein_templates.len(),
        "Inputs loaded."
    );
    reporter.report(Progress::StageFinish);

    // === Phase 1: Rebuild every strand into atom records ===
    let assembly_input = AssemblyInput {
        system: &system,
        states: &configuration.monomers,
        library: &library,
        decorations: &decorations,
        box_angstrom: configuration.box_size * FROM_OXDNA_TO_ANGSTROM,
        protein_templates: &protein_templates,
        config,
    };
    let assembly = assembler::assemble(&assembly_input, &CaAnchorPlacer, reporter)?;

    // === Phase 2: Rewrite for compliance and serialize ===
    reporter.report(Progress::StageStart {
        name: "Writing Output",
    });
    let files = write_output(config, &assembly, reporter)?;
    reporter.report(Progress::StageFinish);

    info!(files = files.len(), "Conversion complete.");
    Ok(ConvertSummary {
        files,
        strands: system.strand_count(),
        monomers: system.monomer_count(),
        rewritten: assembly.contains_protein,
    })
}

fn load_decorations(
    config: &ConvertConfig,
    monomer_count: usize,
) -> Result<DecorationMap, EngineError> {
    let Some(path) = &config.rmsf_path else {
        return Ok(DecorationMap::uniform());
    };
    let decorations = DecorationMap::load(path)?;
    if decorations.len() < monomer_count {
        warn!(
            values = decorations.len(),
            monomers = monomer_count,
            "Decoration file covers fewer monomers than the trajectory, missing values default to 1.00"
        );
    }
    Ok(decorations)
}

fn write_output(
    config: &ConvertConfig,
    assembly: &Assembly,
    reporter: &ProgressReporter,
) -> Result<Vec<PathBuf>, EngineError> {
    let mut files = Vec::new();

    if config.one_file_per_strand {
        for (index, block) in assembly.blocks.iter().enumerate() {
            let path = strand_file_path(&config.output_path, index + 1);
            if assembly.contains_protein {
                let rewritten = rewriter::rewrite(&block.records)?;
                write_records_to(&path, &rewritten)?;
            } else {
                write_records_to(&path, &block.records)?;
            }
            info!(strand = block.strand_id, path = %path.display(), "Wrote strand file.");
            reporter.report(Progress::Message(format!(
                "Wrote strand {} to {}",
                block.strand_id,
                path.display()
            )));
            files.push(path);
        }
        return Ok(files);
    }

    let mut records: Vec<Record> = Vec::new();
    for block in &assembly.blocks {
        records.extend_from_slice(&block.records);
    }
    let records = if assembly.contains_protein {
        rewriter::rewrite(&records)?
    } else {
        records
    };
    write_records_to(&config.output_path, &records)?;
    info!(path = %config.output_path.display(), "Wrote output file.");
    reporter.report(Progress::Message(format!(
        "Wrote {}",
        config.output_path.display()
    )));
    files.push(config.output_path.clone());
    Ok(files)
}

fn write_records_to(path: &Path, records: &[Record]) -> Result<(), EngineError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    pdb::write_records(&mut writer, records)?;
    writer.flush()?;
    Ok(())
}

/// Derives the per-strand file name by suffixing the 1-based strand number
/// onto the output stem, `out.pdb` becoming `out_1.pdb`.
fn strand_file_path(output: &Path, index: usize) -> PathBuf {
    let stem = output
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let mut name = format!("{}_{}", stem, index);
    if let Some(extension) = output.extension().and_then(|e| e.to_str()) {
        name.push('.');
        name.push_str(extension);
    }
    output.with_file_name(name)
}
