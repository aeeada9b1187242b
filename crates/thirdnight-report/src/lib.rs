//! # thirdnight-report
//!
//! One report run, end to end: export bytes in, roster workbook and due-today
//! summary out.
//!
//! ```text
//! export bytes ─► GuestRecordExtractor ─► GuestList ─┬─► DueSummary
//!                                                    └─► RosterLayoutEngine ─► ExcelRenderer ─► bytes
//! ```
//!
//! Any extraction or rendering failure aborts the run; no partial output is
//! returned.
//!
//! ## Example
//!
//! ```rust,ignore
//! use thirdnight_report::ReportAssembler;
//!
//! let raw = std::fs::read("In_House_Guests.xls")?;
//! let report = ReportAssembler::default().generate_report(&raw, chrono::Local::now().naive_local())?;
//! std::fs::write(&report.file_name, &report.bytes)?;
//! ```

pub mod summary;

pub use summary::{DueRoom, DueSummary};

use chrono::{Local, NaiveDate, NaiveDateTime};
use thiserror::Error;
use thirdnight_core::{ConfigError, ExtractError, RenderError, Renderer, ReportConfig, Roster};
use thirdnight_parser::{Extraction, GuestRecordExtractor};
use thirdnight_render::{ExcelRenderer, RosterLayoutEngine};
use tracing::{debug, info};

/// Content type of the roster workbook
pub const XLSX_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Download name of the roster generated on `date`
pub fn report_file_name(date: NaiveDate) -> String {
    format!("In House Guest List {}.xlsx", date.format("%Y%m%d"))
}

/// Failure of a report run
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Output of a successful run
#[derive(Clone, Debug)]
pub struct Report {
    pub file_name: String,
    /// XLSX workbook
    pub bytes: Vec<u8>,
    pub summary: DueSummary,
    /// Date printed on the roster and in the file name
    pub generated_on: NaiveDate,
}

/// Roster and summary before serialization
#[derive(Clone, Debug)]
pub struct Assembly {
    pub extraction: Extraction,
    pub summary: DueSummary,
    pub roster: Roster,
    pub generated_on: NaiveDate,
}

/// Runs the extract, summarize, lay out and render pipeline
#[derive(Clone, Debug, Default)]
pub struct ReportAssembler {
    config: ReportConfig,
    generated_on: Option<NaiveDate>,
    renderer: ExcelRenderer,
}

impl ReportAssembler {
    pub fn new(config: ReportConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Fix the stamp date instead of reading the local clock
    pub fn generated_on(mut self, date: NaiveDate) -> Self {
        self.generated_on = Some(date);
        self
    }

    /// Use a differently configured workbook renderer
    pub fn renderer(mut self, renderer: ExcelRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    fn stamp_date(&self) -> NaiveDate {
        self.generated_on.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Extract guests and compute today's due list
    pub fn summarize(
        &self,
        raw: &[u8],
        today: NaiveDateTime,
    ) -> Result<(Extraction, DueSummary), ReportError> {
        self.config.validate()?;
        let extraction = GuestRecordExtractor::new(self.config.export.clone()).extract(raw)?;
        let summary = DueSummary::new(&extraction.guests, today);
        debug!(
            records = summary.record_count,
            due = summary.due_count(),
            today = %today.date(),
            "due list computed"
        );
        Ok((extraction, summary))
    }

    /// Everything up to, but not including, serialization
    pub fn assemble(&self, raw: &[u8], today: NaiveDateTime) -> Result<Assembly, ReportError> {
        let (extraction, summary) = self.summarize(raw, today)?;
        let generated_on = self.stamp_date();
        let roster = RosterLayoutEngine::new(self.config.grid.clone()).layout(
            &extraction.guests,
            today,
            generated_on,
        );

        Ok(Assembly {
            extraction,
            summary,
            roster,
            generated_on,
        })
    }

    /// Produce the roster workbook and due-today summary for `today`
    pub fn generate_report(&self, raw: &[u8], today: NaiveDateTime) -> Result<Report, ReportError> {
        let assembly = self.assemble(raw, today)?;
        let bytes = self.renderer.render(&assembly.roster)?;
        let file_name = report_file_name(assembly.generated_on);

        info!(
            file = %file_name,
            records = assembly.summary.record_count,
            due = assembly.summary.due_count(),
            "report generated"
        );

        Ok(Report {
            file_name,
            bytes,
            summary: assembly.summary,
            generated_on: assembly.generated_on,
        })
    }
}

/// Generate a report with the default configuration and the local clock's date
/// as the stamp
pub fn generate_report(raw: &[u8], today: NaiveDateTime) -> Result<Report, ReportError> {
    ReportAssembler::default().generate_report(raw, today)
}
