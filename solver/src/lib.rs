pub mod deride;
pub mod deride_fair;
pub mod error;
pub mod ilp;
pub mod rng;

pub use error::SolverError;
pub use ilp::{assign_max_min_lex, assign_max_min_two_phase, assign_max_riders, assign_min_max};
