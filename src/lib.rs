//! tfblocks - Terraform block generator
//!
//! A library for turning `terraform show -json` state into `import`, `moved`
//! and `removed` blocks, with address filtering and grouping by declaring file.

pub mod address;
pub mod cli;
pub mod composer;
pub mod error;
pub mod locator;
pub mod matcher;
pub mod output;
pub mod providers;
pub mod resource;
pub mod terraform;

pub use composer::{Block, BlockKind, Composition, FilterOptions, compose};
pub use error::TfblocksError;
pub use matcher::{Pattern, PatternError};
pub use providers::{FormatError, Registry, RegistryError};
pub use resource::{InstanceKey, Resource};
pub use terraform::{StateError, parse_state, read_state};
