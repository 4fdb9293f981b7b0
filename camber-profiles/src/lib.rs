//! Tabular I/O collaborators for the camber quarter-car simulator.
//!
//! [`RoadProfileTable`] loads named road elevation profiles from a delimited
//! table, one column per profile. [`ReportRow`] and [`write_report`] emit
//! the per-profile comfort scores as the matching results table. The
//! simulation engine itself lives in `camber-core` and stays free of I/O.

mod report;
mod table;

pub use report::{ReportError, ReportRow, write_report, write_report_to_path};
pub use table::{ProfileTableError, RoadProfileTable};
