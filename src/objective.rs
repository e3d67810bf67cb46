//! Tuning objectives and their comparison directions.

use crate::Error;
use std::{
    cmp::Ordering,
    fmt::{self, Display},
    str::FromStr,
};

/// Whether smaller or larger objective values are better.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Minimize,
    Maximize,
}

impl Direction {
    /// Whether `candidate` is strictly better than `incumbent`. NaN is never better.
    pub fn is_better(&self, candidate: f64, incumbent: f64) -> bool {
        match (self, candidate.partial_cmp(&incumbent)) {
            (Direction::Minimize, Some(Ordering::Less)) => true,
            (Direction::Maximize, Some(Ordering::Greater)) => true,
            _ => false,
        }
    }
}

/// Tuning objective used to rank configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Objective {
    Runtime,
    Energy,
    Edp,
    Ed2p,
    Mlups,
}

impl Objective {
    pub const ALL: [Objective; 5] = [
        Objective::Runtime,
        Objective::Energy,
        Objective::Edp,
        Objective::Ed2p,
        Objective::Mlups,
    ];

    pub fn direction(&self) -> Direction {
        match self {
            Objective::Mlups => Direction::Maximize,
            _ => Direction::Minimize,
        }
    }

    /// Label of the table column holding this objective.
    pub fn label(&self) -> &'static str {
        match self {
            Objective::Runtime => "Runtime",
            Objective::Energy => "Energy",
            Objective::Edp => "EDP",
            Objective::Ed2p => "ED2P",
            Objective::Mlups => "MLUPS",
        }
    }
}

impl Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Objective {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "runtime" => Ok(Objective::Runtime),
            "energy" => Ok(Objective::Energy),
            "edp" => Ok(Objective::Edp),
            "ed2p" => Ok(Objective::Ed2p),
            "mlups" => Ok(Objective::Mlups),
            _ => Err(Error::UnknownObjective(s.to_owned())),
        }
    }
}
