pub mod state;

pub use state::{StateError, parse_state, read_state};
