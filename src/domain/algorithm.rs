//! Algorithm enum for selecting how a generation is evaluated.
//!
//! Both variants read only the snapshot and write only the cell they own,
//! so they produce identical grids.

use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// One pass over the flat buffer on the calling thread
    Serial,
    /// Per-cell pass fanned out over the rayon pool
    #[default]
    Parallel,
}

impl Algorithm {
    /// Get all available algorithms
    pub fn all() -> Vec<Algorithm> {
        vec![Algorithm::Serial, Algorithm::Parallel]
    }

    /// Display name for logs and benchmark tables
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Serial => "Serial",
            Algorithm::Parallel => "Parallel",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Algorithm::Serial => "Flat buffer, single thread",
            Algorithm::Parallel => "Flat buffer, rayon par_iter over cells",
        }
    }
}
