use clap::Parser;
use oxpdb::engine::config::Direction;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "oxPDB CLI - A command-line interface for oxPDB, a converter that rebuilds all-atom PDB structures from coarse-grained oxDNA trajectories.",
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    // --- Core Arguments ---
    /// Path to the oxDNA input script used for the simulation.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Path to the configuration (trajectory) file. Only the first
    /// configuration is converted.
    #[arg(value_name = "CONFIGURATION")]
    pub configuration: PathBuf,

    /// Direction in which nucleic strands are written: 35 (3'->5') or 53 (5'->3').
    #[arg(value_name = "DIRECTION")]
    pub direction: Direction,

    /// Protein template PDBs, consumed in order by peptide strands.
    #[arg(value_name = "PROTEIN_PDB")]
    pub protein_templates: Vec<PathBuf>,

    // --- Output Controls ---
    /// Include hydrogen atoms in the output. Pass 'false' to strip them.
    #[arg(
        short = 'H',
        long = "hydrogen",
        value_name = "BOOL",
        num_args = 0..=1,
        default_value_t = true,
        default_missing_value = "true",
        action = clap::ArgAction::Set,
    )]
    pub hydrogen: bool,

    /// Drop the 3/5 suffix from terminal residue names.
    #[arg(short, long)]
    pub uniform_residue_names: bool,

    /// Write each strand to its own numbered output file.
    #[arg(short, long)]
    pub one_file_per_strand: bool,

    /// Reuse the first protein template for every peptide strand.
    #[arg(short, long)]
    pub same_pdb_all_protein_strands: bool,

    /// Per-monomer values (e.g. RMSF) written into the temperature-factor column.
    #[arg(short, long, value_name = "PATH")]
    pub rmsf_file: Option<PathBuf>,

    /// Reference duplex PDB supplying one all-atom fragment per base type.
    #[arg(short, long, value_name = "PATH", default_value = "dd12_na.pdb")]
    pub template: PathBuf,

    /// Path for the output PDB file. Defaults to the configuration path
    /// with '.pdb' appended.
    #[arg(short = 'O', long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    // --- Diagnostics ---
    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
