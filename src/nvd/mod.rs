pub mod client;

pub use client::{NvdClient, NvdSummary, NOT_FOUND_MESSAGE};
