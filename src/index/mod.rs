pub mod cursor;
pub mod sparql;
pub mod tracker;
pub mod types;

pub use tracker::TrackerEndpoint;
pub use types::*;
