use thiserror::Error;

use crate::core::fragments::library::TemplateError;
use crate::core::io::conf::ConfError;
use crate::core::io::input::InputError;
use crate::core::io::rmsf::RmsfError;
use crate::core::io::topology::TopologyError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Input script error: {source}")]
    Input {
        #[from]
        source: InputError,
    },

    #[error("Topology error: {source}")]
    Topology {
        #[from]
        source: TopologyError,
    },

    #[error("Trajectory error: {source}")]
    Trajectory {
        #[from]
        source: ConfError,
    },

    #[error("Template error: {source}")]
    Template {
        #[from]
        source: TemplateError,
    },

    #[error("Decoration error: {source}")]
    Decoration {
        #[from]
        source: RmsfError,
    },

    #[error("Unknown unit type '{code}' in strand {strand_id}")]
    UnknownUnitType { code: String, strand_id: i64 },

    #[error("No protein template left for peptide strand {strand_id}")]
    MissingProteinTemplate { strand_id: i64 },

    #[error("Internal logic error: {0}")]
    Internal(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
