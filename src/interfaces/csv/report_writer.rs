use crate::application::replay::{TimedReport, as_millis};
use crate::domain::card_type::CardType;
use crate::domain::field::{Field, FieldStatus, FocusChange};
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    /// One JSON object per line.
    Json,
}

/// Flat form of a [`TimedReport`] for tabular output.
#[derive(Debug, Serialize, PartialEq)]
pub struct ReportRow {
    pub at_ms: u64,
    pub field: Field,
    pub display: String,
    pub valid: bool,
    pub status: FieldStatus,
    pub card_type: CardType,
    pub purchase_enabled: bool,
    /// `move_to:<field>`, `release:<field>` or empty.
    pub focus: String,
}

impl From<TimedReport> for ReportRow {
    fn from(timed: TimedReport) -> Self {
        let report = timed.report;
        let focus = match report.focus {
            Some(FocusChange::MoveTo(field)) => format!("move_to:{field}"),
            Some(FocusChange::Release(field)) => format!("release:{field}"),
            None => String::new(),
        };
        Self {
            at_ms: as_millis(timed.at),
            field: report.field,
            display: report.display,
            valid: report.valid,
            status: report.status,
            card_type: report.card_type,
            purchase_enabled: report.purchase_enabled,
            focus,
        }
    }
}

pub struct ReportWriter<W: Write> {
    sink: Sink<W>,
}

enum Sink<W: Write> {
    Csv(csv::Writer<W>),
    Json(W),
}

impl<W: Write> ReportWriter<W> {
    pub fn new(destination: W, format: OutputFormat) -> Self {
        let sink = match format {
            OutputFormat::Csv => Sink::Csv(csv::Writer::from_writer(destination)),
            OutputFormat::Json => Sink::Json(destination),
        };
        Self { sink }
    }

    pub fn write_report(&mut self, report: TimedReport) -> Result<()> {
        let row = ReportRow::from(report);
        match &mut self.sink {
            Sink::Csv(writer) => writer.serialize(row)?,
            Sink::Json(writer) => {
                serde_json::to_writer(&mut *writer, &row)?;
                writer.write_all(b"\n")?;
            }
        }
        Ok(())
    }

    pub fn write_reports(&mut self, reports: impl IntoIterator<Item = TimedReport>) -> Result<()> {
        for report in reports {
            self.write_report(report)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        match &mut self.sink {
            Sink::Csv(writer) => writer.flush()?,
            Sink::Json(writer) => writer.flush()?,
        }
        Ok(())
    }
}
