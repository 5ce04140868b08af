pub mod fold;
pub mod pipeline;
pub mod prober;

pub use fold::fold;
pub use pipeline::{DiscoveryOptions, DiscoveryPipeline, ResultLocation, RESULTS_FILE};
pub use prober::{DirectoryProber, HttpProber, ProbeError};
