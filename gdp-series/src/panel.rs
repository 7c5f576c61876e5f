//! Multi-country frames sharing one quarterly index, and the wide CSV layout
//! used to exchange them: a `date` (or `year`) column followed by one column
//! per country code.

use chrono::Datelike;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use gdp_utils::dates::{format_date, parse_any_date};
use log::debug;
use std::io::{Read, Write};

use crate::{
    error::{Result, SeriesError},
    forecast::{AnnualPanel, AnnualRate, AnnualSeries},
    quarter::Quarter,
    series::{QuarterPoint, QuarterlySeries},
};

/// Cell contents treated as an unobserved value.
pub const NULL_MARKERS: [&str; 6] = ["", "NaN", "nan", "NA", "null", "---"];

/// Several quarterly series aligned on one shared, sorted index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Panel {
    index: Vec<Quarter>,
    columns: Vec<QuarterlySeries>,
}

impl Panel {
    /// Align `series` on the union of their quarters; entries a column lacks become null.
    pub fn from_series(series: Vec<QuarterlySeries>) -> Panel {
        let mut index: Vec<Quarter> = series
            .iter()
            .flat_map(|s| s.points().iter().map(|p| p.quarter))
            .collect();
        index.sort();
        index.dedup();
        let columns = series.iter().map(|s| s.reindex(&index)).collect();
        Panel { index, columns }
    }

    pub fn index(&self) -> &[Quarter] {
        &self.index
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(QuarterlySeries::name)
    }

    pub fn series(&self, name: &str) -> Option<&QuarterlySeries> {
        self.columns.iter().find(|s| s.name() == name)
    }

    pub fn iter_series(&self) -> impl Iterator<Item = &QuarterlySeries> {
        self.columns.iter()
    }

    pub fn into_series(self) -> Vec<QuarterlySeries> {
        self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Latest quarter at which any column holds a known value.
    pub fn last_known_quarter(&self) -> Option<Quarter> {
        self.columns
            .iter()
            .filter_map(|s| s.last_known().map(|last| last.quarter))
            .max()
    }

    /// The same columns re-mapped onto `index`.
    pub fn reindex(&self, index: Vec<Quarter>) -> Panel {
        let columns = self.columns.iter().map(|s| s.reindex(&index)).collect();
        Panel { index, columns }
    }

    /// Keep the named columns, in the order given. Unknown names are skipped.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Panel {
        let columns = names
            .iter()
            .filter_map(|name| self.series(name.as_ref()).cloned())
            .collect();
        Panel {
            index: self.index.clone(),
            columns,
        }
    }

    /// Read a wide quarterly CSV: `date,<code>,<code>...`.
    pub fn read_csv<R: Read>(reader: R) -> Result<Panel> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = column_headers(rdr.headers()?)?;
        let mut columns: Vec<Vec<QuarterPoint>> = vec![Vec::new(); headers.len()];
        for (row, record) in rdr.records().enumerate() {
            let record = record?;
            let label = record.get(0).unwrap_or_default();
            let quarter: Quarter = label.parse()?;
            for (column, header) in headers.iter().enumerate() {
                let value = parse_cell(record.get(column + 1), row + 1, header)?;
                columns[column].push(QuarterPoint { quarter, value });
            }
        }
        let series = headers
            .into_iter()
            .zip(columns)
            .map(|(name, points)| QuarterlySeries::new(name, points))
            .collect::<Result<Vec<_>>>()?;
        let panel = Panel::from_series(series);
        debug!(
            "Read quarterly panel with {} columns over {} quarters",
            panel.len(),
            panel.index.len()
        );
        Ok(panel)
    }

    /// Write the panel as wide CSV, one row per quarter stamped with its first day.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = WriterBuilder::new().from_writer(writer);
        let mut header = vec!["date".to_string()];
        header.extend(self.names().map(str::to_string));
        wtr.write_record(&header)?;
        for (row, quarter) in self.index.iter().enumerate() {
            let mut record = vec![format_date(&quarter.start_date())];
            record.extend(self.columns.iter().map(|s| match s.points()[row].value {
                Some(value) => value.to_string(),
                None => String::new(),
            }));
            wtr.write_record(&record)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

impl AnnualPanel {
    /// Read a wide annual CSV: `year,<code>,<code>...`. The first column is a
    /// year or any date inside the year; blank cells mean "no forecast".
    pub fn read_csv<R: Read>(reader: R) -> Result<AnnualPanel> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = column_headers(rdr.headers()?)?;
        let mut columns: Vec<Vec<AnnualRate>> = vec![Vec::new(); headers.len()];
        for (row, record) in rdr.records().enumerate() {
            let record = record?;
            let year = parse_year(record.get(0).unwrap_or_default())?;
            for (column, header) in headers.iter().enumerate() {
                if let Some(rate) = parse_cell(record.get(column + 1), row + 1, header)? {
                    columns[column].push(AnnualRate { year, rate });
                }
            }
        }
        let series = headers
            .into_iter()
            .zip(columns)
            .map(|(name, points)| AnnualSeries::new(name, points))
            .collect::<Result<Vec<_>>>()?;
        Ok(AnnualPanel::from_series(series))
    }
}

fn column_headers(record: &StringRecord) -> Result<Vec<String>> {
    if record.len() < 2 {
        return Err(SeriesError::MissingHeader);
    }
    let mut headers: Vec<String> = Vec::with_capacity(record.len() - 1);
    for name in record.iter().skip(1) {
        if headers.iter().any(|seen| seen == name) {
            return Err(SeriesError::DuplicateColumn(name.to_string()));
        }
        headers.push(name.to_string());
    }
    Ok(headers)
}

fn parse_cell(cell: Option<&str>, row: usize, column: &str) -> Result<Option<f64>> {
    let cell = cell.unwrap_or_default().trim();
    if NULL_MARKERS.contains(&cell) {
        return Ok(None);
    }
    match cell.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(SeriesError::InvalidValue {
            row,
            column: column.to_string(),
            value: cell.to_string(),
        }),
    }
}

fn parse_year(label: &str) -> Result<i32> {
    let label = label.trim();
    if let Ok(year) = label.parse::<i32>() {
        return Ok(year);
    }
    parse_any_date(label)
        .map(|date| date.year())
        .map_err(|_| SeriesError::InvalidDate(label.to_string()))
}
