use std::time::Duration;

/// How tie-breaks among equally-good riders/drivers are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreakMode {
    /// Pick the lowest-id candidate; used by the test suite and whenever
    /// reproducibility matters more than distributional fairness.
    #[default]
    Deterministic,
    /// Draw uniformly among tied candidates using the run's seeded RNG.
    Random,
}

/// Run-wide knobs recognized by every assigner. Constructed once by the host
/// and shared by read-only reference; nothing here is mutated during a run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Radius (graph-weight units) used to build a driver's corridor once a
    /// path is committed. Defaults to 200, per the design notes.
    pub corridor_radius: f64,
    /// Seed for the injectable RNG driving all tie-breaks. `None` seeds from
    /// entropy, which is still deterministic once drawn if `tie_break_mode`
    /// is `Deterministic` (the RNG is then never consulted).
    pub rng_seed: Option<u64>,
    /// Wall-clock budget for the ILP solver. `None` means unbounded.
    pub solver_time_limit: Option<Duration>,
    /// Iteration cap for greedy assigners. Defaults to `drivers * riders`,
    /// the bound proven in the termination argument; callers may tighten it.
    pub iteration_cap: Option<usize>,
    pub tie_break_mode: TieBreakMode,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            corridor_radius: 200.0,
            rng_seed: None,
            solver_time_limit: None,
            iteration_cap: None,
            tie_break_mode: TieBreakMode::Deterministic,
        }
    }
}

impl Config {
    pub fn with_seed(seed: u64) -> Config {
        Config {
            rng_seed: Some(seed),
            ..Config::default()
        }
    }
}
