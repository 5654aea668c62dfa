//! Layoff trend pipeline: import raw rows, clean them once, then compute the
//! report catalog over the cleaned set.

pub mod cleaning;
pub mod domain;
pub mod import;
pub mod report;

pub use cleaning::clean;
pub use domain::{CleanedLayoff, CleanedLayoffs, LayoffRecord};
pub use import::{LayoffImportError, LayoffImporter};
pub use report::{LayoffReport, ReportKind, ReportLimits, UnknownReport};

use std::io::Read;
use std::path::Path;

/// Runs import, cleaning and reporting in sequence.
#[derive(Debug, Clone, Default)]
pub struct LayoffPipeline {
    limits: ReportLimits,
}

impl LayoffPipeline {
    pub fn new(limits: ReportLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &ReportLimits {
        &self.limits
    }

    pub fn run_path<P: AsRef<Path>>(
        &self,
        path: P,
        kinds: &[ReportKind],
    ) -> Result<LayoffReport, LayoffImportError> {
        let records = LayoffImporter::from_path(path)?;
        Ok(self.run(records, kinds))
    }

    pub fn run_reader<R: Read>(
        &self,
        reader: R,
        kinds: &[ReportKind],
    ) -> Result<LayoffReport, LayoffImportError> {
        let records = LayoffImporter::from_reader(reader)?;
        Ok(self.run(records, kinds))
    }

    /// Cleans `records` and builds the requested reports. An empty `kinds`
    /// slice selects the whole catalog.
    pub fn run(&self, records: Vec<LayoffRecord>, kinds: &[ReportKind]) -> LayoffReport {
        let cleaned = clean(records);
        if kinds.is_empty() {
            LayoffReport::build(&cleaned, &self.limits)
        } else {
            LayoffReport::build_selected(&cleaned, &self.limits, kinds)
        }
    }
}
