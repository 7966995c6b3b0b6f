//! An engine for simulating virtual-memory address translation and page
//! replacement policies.

#![warn(clippy::pedantic)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![warn(missing_docs)]

mod address;
mod context;
mod engine;
mod errors;
mod page_table;
mod policy;
mod record;
mod report;
mod step;
mod tlb;
mod translate;
mod utils;
mod workload;
#[cfg(any(test, feature = "workloads"))]
pub mod workloads;

pub use address::*;
pub use context::*;
pub use engine::*;
pub use errors::*;
pub use page_table::*;
pub use policy::*;
pub use record::*;
pub use report::*;
pub use step::*;
pub use tlb::*;
pub use translate::*;
pub use utils::*;
pub use workload::*;
