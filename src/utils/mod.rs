pub mod formatting;

pub use formatting::{clamp_text, short_sha};
