pub mod http;

pub use http::ArtifactClient;
