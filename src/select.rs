//! Selection of best configurations and the energy-performance trade-off between them.

use crate::{
    metrics::{ed2p, edp, pct_change, round_to},
    Direction, DynamicConfigRow, Objective, StaticConfigRow,
};
use std::collections::{BTreeMap, HashMap};

/// First row with the best `value` under `direction`; later rows replace it only if strictly
/// better. NaN values never win over a number.
fn best_by<'a, R>(
    rows: impl IntoIterator<Item = &'a R>,
    direction: Direction,
    value: impl Fn(&R) -> f64,
) -> Option<&'a R> {
    let mut best: Option<(&'a R, f64)> = None;
    for row in rows {
        let v = value(row);
        best = match best {
            None => Some((row, v)),
            Some((_, bv)) if bv.is_nan() && !v.is_nan() => Some((row, v)),
            Some((_, bv)) if direction.is_better(v, bv) => Some((row, v)),
            keep => keep,
        };
    }
    best.map(|(row, _)| row)
}

//==============
// Static selection

/// Best row of `table` under `objective`, first occurrence winning ties.
pub fn best_static(table: &[StaticConfigRow], objective: Objective) -> Option<&StaticConfigRow> {
    best_by(table, objective.direction(), |r| r.objective_value(objective))
}

/// Best row of `table` for every objective. Empty if `table` is empty.
pub fn best_static_per_objective(
    table: &[StaticConfigRow],
) -> BTreeMap<Objective, &StaticConfigRow> {
    Objective::ALL
        .iter()
        .filter_map(|o| best_static(table, *o).map(|r| (*o, r)))
        .collect()
}

//==============
// Dynamic selection

/// The best configuration of each kernel under one objective.
#[derive(Debug, Clone, PartialEq)]
pub struct BestDynamicConfig {
    pub objective: Objective,
    /// One row per kernel, in order of each kernel's first appearance in the input table.
    pub rows: Vec<DynamicConfigRow>,
}

impl BestDynamicConfig {
    pub fn get(&self, kernel_name: &str) -> Option<&DynamicConfigRow> {
        self.rows.iter().find(|r| r.kernel_name == kernel_name)
    }

    /// Whole-run estimate from combining the per-kernel best configurations.
    pub fn ideal(&self) -> Option<IdealDynamicConfig> {
        ideal_dynamic(&self.rows)
    }
}

/// Selects, for every kernel of `table`, the row that is best under `objective`, first occurrence
/// winning ties.
pub fn best_dynamic(table: &[DynamicConfigRow], objective: Objective) -> BestDynamicConfig {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Vec<&DynamicConfigRow>> = Vec::new();
    for row in table {
        let i = *index.entry(row.kernel_name.as_str()).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[i].push(row);
    }

    let rows = groups
        .into_iter()
        .filter_map(|g| {
            best_by(g, objective.direction(), |r| r.objective_value(objective)).cloned()
        })
        .collect();

    BestDynamicConfig { objective, rows }
}

//==============
// Ideal dynamic configuration

/// Idealized whole-run result of switching to each kernel's best configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct IdealDynamicConfig {
    /// Sum of the kernels' mean runtimes, scaled by `iterations` and converted from ms to s.
    pub runtime: f64,
    /// Sum of the kernels' mean energies, scaled by `iterations`.
    pub energy: f64,
    pub edp: f64,
    pub ed2p: f64,
    /// Smallest iteration count among the combined rows.
    pub iterations: u32,
    pub kernels: usize,
}

/// Combines per-kernel best rows into one whole-run estimate; `None` if `best` is empty.
pub fn ideal_dynamic(best: &[DynamicConfigRow]) -> Option<IdealDynamicConfig> {
    let iterations = best.iter().map(|r| r.key.iterations).min()?;
    let n = f64::from(iterations);
    let runtime = best.iter().map(|r| r.mean_runtime_ms).sum::<f64>() * n / 1000.0;
    let energy = best.iter().map(|r| r.mean_energy_joules).sum::<f64>() * n;
    log::debug!(
        "ideal dynamic configuration over {} kernels: runtime {runtime}, energy {energy}",
        best.len()
    );
    Some(IdealDynamicConfig {
        runtime,
        energy,
        edp: edp(energy, runtime),
        ed2p: ed2p(energy, runtime),
        iterations,
        kernels: best.len(),
    })
}

//==============
// Trade-off

/// Percentage changes between the reference, best static and ideal dynamic configurations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradeoffPcts {
    pub static_vs_reference: f64,
    pub dynamic_vs_reference: f64,
    pub dynamic_vs_static: f64,
}

impl TradeoffPcts {
    fn new(reference: f64, best_static: f64, dynamic: f64) -> Self {
        TradeoffPcts {
            static_vs_reference: pct_change(reference, best_static),
            dynamic_vs_reference: pct_change(reference, dynamic),
            dynamic_vs_static: pct_change(best_static, dynamic),
        }
    }
}

/// Runtime and energy of the three configurations, rounded to two decimals, and the percentage
/// changes between them. A zero base value yields an infinite or NaN percentage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tradeoff {
    pub reference_runtime: f64,
    pub static_runtime: f64,
    pub dynamic_runtime: f64,
    pub reference_energy: f64,
    pub static_energy: f64,
    pub dynamic_energy: f64,
    pub runtime: TradeoffPcts,
    pub energy: TradeoffPcts,
}

impl Tradeoff {
    /// Compares `best_static` and `ideal` against `reference`, and `ideal` against `best_static`.
    ///
    /// The `#C` runtimes of the static rows and the ideal runtime are compared as they are; the
    /// kernel writes its compute time in seconds, the unit of [`IdealDynamicConfig::runtime`].
    pub fn compute(
        reference: &StaticConfigRow,
        best_static: &StaticConfigRow,
        ideal: &IdealDynamicConfig,
    ) -> Self {
        let reference_runtime = round_to(reference.runtime_ms, 2);
        let static_runtime = round_to(best_static.runtime_ms, 2);
        let dynamic_runtime = round_to(ideal.runtime, 2);
        let reference_energy = round_to(reference.total_energy, 2);
        let static_energy = round_to(best_static.total_energy, 2);
        let dynamic_energy = round_to(ideal.energy, 2);

        Tradeoff {
            reference_runtime,
            static_runtime,
            dynamic_runtime,
            reference_energy,
            static_energy,
            dynamic_energy,
            runtime: TradeoffPcts::new(reference_runtime, static_runtime, dynamic_runtime),
            energy: TradeoffPcts::new(reference_energy, static_energy, dynamic_energy),
        }
    }

    /// Runs the whole comparison: the fastest row of `reference` is the baseline, the best row of
    /// `tuned_static` under `objective` the static configuration, and the ideal combination of the
    /// best rows of `tuned_dynamic` under `objective` the dynamic one.
    ///
    /// Returns `None` if any of the tables is empty.
    pub fn from_tables(
        reference: &[StaticConfigRow],
        tuned_static: &[StaticConfigRow],
        tuned_dynamic: &[DynamicConfigRow],
        objective: Objective,
    ) -> Option<Self> {
        let reference = best_static(reference, Objective::Runtime)?;
        let best = best_static(tuned_static, objective)?;
        let ideal = best_dynamic(tuned_dynamic, objective).ideal()?;
        Some(Self::compute(reference, best, &ideal))
    }
}
