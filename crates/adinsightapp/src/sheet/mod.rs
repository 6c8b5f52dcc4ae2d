//! # Spreadsheet Writer
//!
//! The export path ends here: a [`Projection`] plus layout hints goes in, a file payload
//! comes out. Writing the bytes to disk (or offering them for download) is the client's
//! job.
//!
//! [`SheetWriter`] is the seam. [`xlsx::XlsxWriter`] is the production implementation;
//! tests can plug in anything that records what it was given.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::model::day_string;
use crate::projection::{Projection, LEADING_HEADERS};
use crate::selection::ExportScope;

pub mod xlsx;

pub const SHEET_NAME: &str = "广告测评数据";

const LEADING_WIDTHS: [u32; LEADING_HEADERS.len()] = [120, 80, 80, 120];
const DYNAMIC_WIDTH: u32 = 110;
const TRAILING_WIDTH: u32 = 200;

/// Presentation hints for the written sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLayout {
    pub sheet_name: String,
    /// Pixel width per column, same length as the headers.
    pub column_widths: Vec<u32>,
    pub header_bold: bool,
    pub header_centered: bool,
    /// RGB hex, no leading `#`.
    pub header_fill: String,
    pub header_font_color: String,
    pub bordered: bool,
    pub wrap_body: bool,
    pub font_name: String,
    pub header_font_size: u32,
    pub body_font_size: u32,
}

impl SheetLayout {
    /// Standard layout for a projection: fixed widths for the leading and trailing
    /// columns, a uniform width for every attribute column.
    pub fn for_projection(projection: &Projection) -> Self {
        let column_widths = LEADING_WIDTHS
            .iter()
            .copied()
            .chain(std::iter::repeat(DYNAMIC_WIDTH).take(projection.dynamic_keys.len()))
            .chain(std::iter::once(TRAILING_WIDTH))
            .collect();

        Self {
            sheet_name: SHEET_NAME.to_string(),
            column_widths,
            header_bold: true,
            header_centered: true,
            header_fill: "4472C4".to_string(),
            header_font_color: "FFFFFF".to_string(),
            bordered: true,
            wrap_body: true,
            font_name: "SimSun".to_string(),
            header_font_size: 11,
            body_font_size: 10,
        }
    }
}

/// Anything that can turn a table into a file.
pub trait SheetWriter {
    fn write(&self, projection: &Projection, layout: &SheetLayout) -> Result<Vec<u8>>;
}

/// `{prefix}_{scope}_{YYYY-MM-DD}.xlsx`
pub fn export_filename(prefix: &str, scope: ExportScope, now: DateTime<Utc>) -> String {
    format!("{}_{}_{}.xlsx", prefix, scope.descriptor(), day_string(now))
}
