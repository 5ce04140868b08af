pub mod types;

pub use types::VulnScopeError;
