pub mod labels;
pub mod loader;
pub mod search;

pub use labels::{file_level_match, flow_labels, method_level_match, StepLabels};
pub use loader::{
    browsable, find_record, load_class_locations, load_fix_index, load_func_locations,
    load_records,
};
pub use search::{matches_search, search_records};
