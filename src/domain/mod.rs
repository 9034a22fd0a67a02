pub mod analysis;
pub mod circuit;
pub mod conformance;
pub mod types;

pub use analysis::*;
pub use circuit::*;
pub use conformance::*;
pub use types::*;
