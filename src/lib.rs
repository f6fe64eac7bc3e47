pub mod cli;
pub mod error;
pub mod game;
pub mod input;
pub mod labels;
pub mod output;
pub mod types;

pub use error::{ConfigError, Error, NameError};
pub use game::role::{assign_roles, deal, DetectivePolicy, RoleCounts, RoleSet, Variant};
pub use labels::{LabelTable, Language};
pub use types::{Assignment, Role, Seat};
