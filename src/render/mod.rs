pub mod diff;
pub mod formatter;

pub use diff::{render_commit, render_patch};
pub use formatter::{
    render_commit_badges, render_detail_header, render_fix_locations, render_flow_step,
    render_nvd_summary, render_record_line,
};
