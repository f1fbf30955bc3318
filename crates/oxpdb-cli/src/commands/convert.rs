use crate::cli::Cli;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use oxpdb::engine::config::{ConvertConfig, ConvertConfigBuilder};
use oxpdb::engine::progress::ProgressReporter;
use oxpdb::workflows::convert;
use std::path::{Path, PathBuf};
use tracing::info;

pub fn run(cli: &Cli) -> Result<()> {
    let config = build_config(cli)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Starting atomistic reconstruction...");
    info!("Invoking the core conversion workflow...");

    let summary = convert::run(&config, &reporter)?;

    info!(
        "Workflow finished, wrote {} file(s) covering {} strand(s).",
        summary.files.len(),
        summary.strands
    );
    if summary.rewritten {
        info!("Atom and residue numbering was rewritten for PDB compliance.");
    }

    for (i, path) in summary.files.iter().enumerate() {
        if i == 0 {
            println!(
                "✓ Converted {} strand(s), {} monomer(s) to: {}",
                summary.strands,
                summary.monomers,
                path.display()
            );
        } else {
            println!("  Strand file written to: {}", path.display());
        }
    }

    Ok(())
}

fn build_config(cli: &Cli) -> Result<ConvertConfig> {
    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.configuration));

    ConvertConfigBuilder::new()
        .input_path(cli.input.clone())
        .conf_path(cli.configuration.clone())
        .output_path(output_path)
        .template_path(cli.template.clone())
        .direction(cli.direction)
        .protein_template_paths(cli.protein_templates.clone())
        .rmsf_path(cli.rmsf_file.clone())
        .include_hydrogens(cli.hydrogen)
        .uniform_residue_names(cli.uniform_residue_names)
        .one_file_per_strand(cli.one_file_per_strand)
        .shared_protein_template(cli.same_pdb_all_protein_strands)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// The default output keeps the full configuration file name, so
/// "last_conf.dat" becomes "last_conf.dat.pdb".
fn default_output_path(configuration: &Path) -> PathBuf {
    let mut name = configuration.as_os_str().to_os_string();
    name.push(".pdb");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxpdb::engine::config::Direction;

    fn setup_cli() -> Cli {
        Cli {
            input: PathBuf::from("input"),
            configuration: PathBuf::from("last_conf.dat"),
            direction: Direction::ThreeToFive,
            protein_templates: vec![],
            hydrogen: true,
            uniform_residue_names: false,
            one_file_per_strand: false,
            same_pdb_all_protein_strands: false,
            rmsf_file: None,
            template: PathBuf::from("dd12_na.pdb"),
            output: None,
            verbose: 0,
            quiet: false,
            log_file: None,
        }
    }

    #[test]
    fn default_output_appends_pdb_to_the_configuration_name() {
        assert_eq!(
            default_output_path(Path::new("last_conf.dat")),
            PathBuf::from("last_conf.dat.pdb")
        );
        assert_eq!(
            default_output_path(Path::new("/runs/traj.conf")),
            PathBuf::from("/runs/traj.conf.pdb")
        );
    }

    #[test]
    fn config_inherits_the_default_output_path() {
        let cli = setup_cli();
        let config = build_config(&cli).unwrap();

        assert_eq!(config.output_path, PathBuf::from("last_conf.dat.pdb"));
        assert_eq!(config.conf_path, PathBuf::from("last_conf.dat"));
        assert_eq!(config.direction, Direction::ThreeToFive);
        assert!(config.include_hydrogens);
    }

    #[test]
    fn explicit_output_path_wins_over_the_default() {
        let mut cli = setup_cli();
        cli.output = Some(PathBuf::from("custom.pdb"));

        let config = build_config(&cli).unwrap();
        assert_eq!(config.output_path, PathBuf::from("custom.pdb"));
    }

    #[test]
    fn flags_map_through_to_the_config() {
        let mut cli = setup_cli();
        cli.hydrogen = false;
        cli.uniform_residue_names = true;
        cli.one_file_per_strand = true;
        cli.same_pdb_all_protein_strands = true;
        cli.rmsf_file = Some(PathBuf::from("factors.json"));
        cli.protein_templates = vec![PathBuf::from("peptide.pdb")];

        let config = build_config(&cli).unwrap();
        assert!(!config.include_hydrogens);
        assert!(config.uniform_residue_names);
        assert!(config.one_file_per_strand);
        assert!(config.shared_protein_template);
        assert_eq!(config.rmsf_path, Some(PathBuf::from("factors.json")));
        assert_eq!(
            config.protein_template_paths,
            vec![PathBuf::from("peptide.pdb")]
        );
    }
}
