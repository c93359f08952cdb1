mod root;

pub use root::{Cli, Outcome};
