use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

/// The direction in which nucleic-acid strands are read out.
///
/// Topology files store strands 3' to 5'. Reading 5' to 3' walks the stored
/// monomers in reverse; the terminal residue labels stay attached to the
/// chemical ends either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    ThreeToFive,
    FiveToThree,
}

impl Direction {
    pub fn reverses_declared_order(&self) -> bool {
        matches!(self, Direction::FiveToThree)
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "35" => Ok(Direction::ThreeToFive),
            "53" => Ok(Direction::FiveToThree),
            _ => Err("direction must be either 35 or 53".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConvertConfig {
    pub input_path: PathBuf,
    pub conf_path: PathBuf,
    pub output_path: PathBuf,
    pub template_path: PathBuf,
    pub direction: Direction,
    pub protein_template_paths: Vec<PathBuf>,
    pub rmsf_path: Option<PathBuf>,
    pub include_hydrogens: bool,
    pub uniform_residue_names: bool,
    pub one_file_per_strand: bool,
    pub shared_protein_template: bool,
}

#[derive(Debug, Clone)]
pub struct ConvertConfigBuilder {
    input_path: Option<PathBuf>,
    conf_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    template_path: Option<PathBuf>,
    direction: Option<Direction>,
    protein_template_paths: Vec<PathBuf>,
    rmsf_path: Option<PathBuf>,
    include_hydrogens: bool,
    uniform_residue_names: bool,
    one_file_per_strand: bool,
    shared_protein_template: bool,
}

impl Default for ConvertConfigBuilder {
    fn default() -> Self {
        Self {
            input_path: None,
            conf_path: None,
            output_path: None,
            template_path: None,
            direction: None,
            protein_template_paths: Vec::new(),
            rmsf_path: None,
            include_hydrogens: true,
            uniform_residue_names: false,
            one_file_per_strand: false,
            shared_protein_template: false,
        }
    }
}

impl ConvertConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_path(mut self, path: PathBuf) -> Self {
        self.input_path = Some(path);
        self
    }
    pub fn conf_path(mut self, path: PathBuf) -> Self {
        self.conf_path = Some(path);
        self
    }
    pub fn output_path(mut self, path: PathBuf) -> Self {
        self.output_path = Some(path);
        self
    }
    pub fn template_path(mut self, path: PathBuf) -> Self {
        self.template_path = Some(path);
        self
    }
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }
    pub fn protein_template_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.protein_template_paths = paths;
        self
    }
    pub fn rmsf_path(mut self, path: Option<PathBuf>) -> Self {
        self.rmsf_path = path;
        self
    }
    pub fn include_hydrogens(mut self, on: bool) -> Self {
        self.include_hydrogens = on;
        self
    }
    pub fn uniform_residue_names(mut self, on: bool) -> Self {
        self.uniform_residue_names = on;
        self
    }
    pub fn one_file_per_strand(mut self, on: bool) -> Self {
        self.one_file_per_strand = on;
        self
    }
    pub fn shared_protein_template(mut self, on: bool) -> Self {
        self.shared_protein_template = on;
        self
    }

    pub fn build(self) -> Result<ConvertConfig, ConfigError> {
        Ok(ConvertConfig {
            input_path: self
                .input_path
                .ok_or(ConfigError::MissingParameter("input_path"))?,
            conf_path: self
                .conf_path
                .ok_or(ConfigError::MissingParameter("conf_path"))?,
            output_path: self
                .output_path
                .ok_or(ConfigError::MissingParameter("output_path"))?,
            template_path: self
                .template_path
                .ok_or(ConfigError::MissingParameter("template_path"))?,
            direction: self
                .direction
                .ok_or(ConfigError::MissingParameter("direction"))?,
            protein_template_paths: self.protein_template_paths,
            rmsf_path: self.rmsf_path,
            include_hydrogens: self.include_hydrogens,
            uniform_residue_names: self.uniform_residue_names,
            one_file_per_strand: self.one_file_per_strand,
            shared_protein_template: self.shared_protein_template,
        })
    }
}
