pub mod github;

pub use github::{
    blob_url, commit_url, raw_file_url, source_line_url, tree_url, CommitDetail, CommitFile,
    ForgeClient,
};
