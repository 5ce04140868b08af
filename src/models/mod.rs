pub mod cve;
pub mod fixes;
pub mod locations;
pub mod sarif;

pub use cve::{CveRecord, ProjectRow};
pub use fixes::{FixIndex, FixLocation, FixRow};
pub use locations::{enclosing_item, ItemLocation, ItemRow};
pub use sarif::{FlowStep, SarifLog, SarifResult, ThreadFlow};
