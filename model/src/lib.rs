pub mod assignment;
pub mod base_types;
pub mod config;
pub mod driver;
pub mod error;
pub mod rider;
pub mod utilities;

pub use assignment::{Assignment, DriverAssignment};
pub use config::{Config, TieBreakMode};
pub use driver::Driver;
pub use error::{AssignStatus, InputError};
pub use rider::Rider;
