//! Office Open XML workbook writer.
//!
//! An `.xlsx` file is a zip container of XML parts. This writer emits the minimal set a
//! spreadsheet application needs to open one styled sheet:
//!
//! ```text
//! [Content_Types].xml
//! _rels/.rels
//! xl/workbook.xml
//! xl/_rels/workbook.xml.rels
//! xl/styles.xml
//! xl/sharedStrings.xml
//! xl/worksheets/sheet1.xml
//! ```
//!
//! Every cell is a shared-string cell. Styles are fixed at three cell formats:
//! `0` default, `1` header, `2` body.

use std::collections::HashMap;
use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::{SheetLayout, SheetWriter};
use crate::error::{AdinsightError, Result};
use crate::projection::Projection;

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const STYLE_HEADER: u32 = 1;
const STYLE_BODY: u32 = 2;

/// Approximate pixels per character of column width in the default font.
const PX_PER_CHAR: f64 = 7.0;

#[derive(Debug, Default, Clone, Copy)]
pub struct XlsxWriter;

impl XlsxWriter {
    pub fn new() -> Self {
        Self
    }
}

impl SheetWriter for XlsxWriter {
    fn write(&self, projection: &Projection, layout: &SheetLayout) -> Result<Vec<u8>> {
        let mut strings = SharedStrings::default();
        let sheet = sheet_xml(projection, layout, &mut strings);

        let parts: [(&str, String); 7] = [
            ("[Content_Types].xml", content_types_xml()),
            ("_rels/.rels", root_rels_xml()),
            ("xl/workbook.xml", workbook_xml(&layout.sheet_name)),
            ("xl/_rels/workbook.xml.rels", workbook_rels_xml()),
            ("xl/styles.xml", styles_xml(layout)),
            ("xl/sharedStrings.xml", strings.to_xml()),
            ("xl/worksheets/sheet1.xml", sheet),
        ];

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for (name, body) in parts {
            zip.start_file(name, options)
                .map_err(|e| AdinsightError::Sheet(e.to_string()))?;
            zip.write_all(body.as_bytes())?;
        }
        let cursor = zip
            .finish()
            .map_err(|e| AdinsightError::Sheet(e.to_string()))?;
        Ok(cursor.into_inner())
    }
}

#[derive(Default)]
struct SharedStrings {
    index: HashMap<String, usize>,
    ordered: Vec<String>,
    references: usize,
}

impl SharedStrings {
    fn intern(&mut self, value: &str) -> usize {
        self.references += 1;
        if let Some(&i) = self.index.get(value) {
            return i;
        }
        let i = self.ordered.len();
        self.ordered.push(value.to_string());
        self.index.insert(value.to_string(), i);
        i
    }

    fn to_xml(&self) -> String {
        let mut xml = format!(
            r#"{}<sst xmlns="{}" count="{}" uniqueCount="{}">"#,
            XML_DECL,
            MAIN_NS,
            self.references,
            self.ordered.len()
        );
        for s in &self.ordered {
            xml.push_str(&format!(
                r#"<si><t xml:space="preserve">{}</t></si>"#,
                escape_xml(s)
            ));
        }
        xml.push_str("</sst>");
        xml
    }
}

/// Spreadsheet column name for a 1-based column number: 1 → A, 27 → AA.
pub fn column_letter(mut n: usize) -> String {
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

/// Escapes markup characters and drops control characters XML 1.0 cannot carry.
pub fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(c),
            c if (c as u32) < 0x20 => {}
            c => out.push(c),
        }
    }
    out
}

fn width_chars(px: u32) -> f64 {
    (px as f64 / PX_PER_CHAR * 100.0).round() / 100.0
}

fn row_xml(row_number: usize, cells: &[String], style: u32, strings: &mut SharedStrings) -> String {
    let mut xml = format!(r#"<row r="{}">"#, row_number);
    for (col, value) in cells.iter().enumerate() {
        let reference = format!("{}{}", column_letter(col + 1), row_number);
        if value.is_empty() {
            xml.push_str(&format!(r#"<c r="{}" s="{}"/>"#, reference, style));
        } else {
            let idx = strings.intern(value);
            xml.push_str(&format!(
                r#"<c r="{}" s="{}" t="s"><v>{}</v></c>"#,
                reference, style, idx
            ));
        }
    }
    xml.push_str("</row>");
    xml
}

fn sheet_xml(projection: &Projection, layout: &SheetLayout, strings: &mut SharedStrings) -> String {
    let mut xml = format!(r#"{}<worksheet xmlns="{}" xmlns:r="{}">"#, XML_DECL, MAIN_NS, REL_NS);

    if !layout.column_widths.is_empty() {
        xml.push_str("<cols>");
        for (i, px) in layout.column_widths.iter().enumerate() {
            xml.push_str(&format!(
                r#"<col min="{n}" max="{n}" width="{w}" customWidth="1"/>"#,
                n = i + 1,
                w = width_chars(*px)
            ));
        }
        xml.push_str("</cols>");
    }

    xml.push_str("<sheetData>");
    xml.push_str(&row_xml(1, &projection.headers, STYLE_HEADER, strings));
    for (i, row) in projection.rows.iter().enumerate() {
        xml.push_str(&row_xml(i + 2, row, STYLE_BODY, strings));
    }
    xml.push_str("</sheetData></worksheet>");
    xml
}

fn styles_xml(layout: &SheetLayout) -> String {
    let font_name = escape_xml(&layout.font_name);
    let bold = if layout.header_bold { "<b/>" } else { "" };
    let border_id = if layout.bordered { 1 } else { 0 };
    let wrap = if layout.wrap_body { r#" wrapText="1""# } else { "" };
    let horizontal = if layout.header_centered {
        r#" horizontal="center""#
    } else {
        ""
    };

    let thin = r#"style="thin"><color auto="1"/>"#;
    format!(
        concat!(
            "{decl}<styleSheet xmlns=\"{ns}\">",
            "<fonts count=\"3\">",
            "<font><sz val=\"11\"/><name val=\"Calibri\"/></font>",
            "<font>{bold}<sz val=\"{hsz}\"/><color rgb=\"FF{hcolor}\"/><name val=\"{font}\"/></font>",
            "<font><sz val=\"{bsz}\"/><name val=\"{font}\"/></font>",
            "</fonts>",
            "<fills count=\"3\">",
            "<fill><patternFill patternType=\"none\"/></fill>",
            "<fill><patternFill patternType=\"gray125\"/></fill>",
            "<fill><patternFill patternType=\"solid\"><fgColor rgb=\"FF{fill}\"/><bgColor indexed=\"64\"/></patternFill></fill>",
            "</fills>",
            "<borders count=\"2\">",
            "<border><left/><right/><top/><bottom/><diagonal/></border>",
            "<border><left {thin}</left><right {thin}</right><top {thin}</top><bottom {thin}</bottom><diagonal/></border>",
            "</borders>",
            "<cellStyleXfs count=\"1\"><xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\"/></cellStyleXfs>",
            "<cellXfs count=\"3\">",
            "<xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\" xfId=\"0\"/>",
            "<xf numFmtId=\"0\" fontId=\"1\" fillId=\"2\" borderId=\"{border}\" xfId=\"0\" applyFont=\"1\" applyFill=\"1\" applyBorder=\"1\" applyAlignment=\"1\">",
            "<alignment{horizontal} vertical=\"center\" wrapText=\"1\"/></xf>",
            "<xf numFmtId=\"0\" fontId=\"2\" fillId=\"0\" borderId=\"{border}\" xfId=\"0\" applyFont=\"1\" applyBorder=\"1\" applyAlignment=\"1\">",
            "<alignment vertical=\"center\"{wrap}/></xf>",
            "</cellXfs>",
            "<cellStyles count=\"1\"><cellStyle name=\"Normal\" xfId=\"0\" builtinId=\"0\"/></cellStyles>",
            "</styleSheet>"
        ),
        decl = XML_DECL,
        ns = MAIN_NS,
        bold = bold,
        hsz = layout.header_font_size,
        hcolor = escape_xml(&layout.header_font_color),
        bsz = layout.body_font_size,
        font = font_name,
        fill = escape_xml(&layout.header_fill),
        thin = thin,
        border = border_id,
        horizontal = horizontal,
        wrap = wrap,
    )
}

fn workbook_xml(sheet_name: &str) -> String {
    format!(
        r#"{}<workbook xmlns="{}" xmlns:r="{}"><sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        XML_DECL,
        MAIN_NS,
        REL_NS,
        escape_xml(sheet_name)
    )
}

fn workbook_rels_xml() -> String {
    format!(
        concat!(
            "{}<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">",
            "<Relationship Id=\"rId1\" Type=\"{rel}/worksheet\" Target=\"worksheets/sheet1.xml\"/>",
            "<Relationship Id=\"rId2\" Type=\"{rel}/styles\" Target=\"styles.xml\"/>",
            "<Relationship Id=\"rId3\" Type=\"{rel}/sharedStrings\" Target=\"sharedStrings.xml\"/>",
            "</Relationships>"
        ),
        XML_DECL,
        rel = REL_NS,
    )
}

fn root_rels_xml() -> String {
    format!(
        concat!(
            "{}<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">",
            "<Relationship Id=\"rId1\" Type=\"{}/officeDocument\" Target=\"xl/workbook.xml\"/>",
            "</Relationships>"
        ),
        XML_DECL, REL_NS,
    )
}

fn content_types_xml() -> String {
    const SHEETML: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml";
    format!(
        concat!(
            "{}<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">",
            "<Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>",
            "<Default Extension=\"xml\" ContentType=\"application/xml\"/>",
            "<Override PartName=\"/xl/workbook.xml\" ContentType=\"{s}.sheet.main+xml\"/>",
            "<Override PartName=\"/xl/worksheets/sheet1.xml\" ContentType=\"{s}.worksheet+xml\"/>",
            "<Override PartName=\"/xl/styles.xml\" ContentType=\"{s}.styles+xml\"/>",
            "<Override PartName=\"/xl/sharedStrings.xml\" ContentType=\"{s}.sharedStrings+xml\"/>",
            "</Types>"
        ),
        XML_DECL,
        s = SHEETML,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{project, ProjectionOptions};
    use crate::test_utils::make_entry;
    use std::io::Read;

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut out = String::new();
        file.read_to_string(&mut out).unwrap();
        out
    }

    fn sample_bytes() -> Vec<u8> {
        let mut entry = make_entry("A&B", &[&[("广告位置", "顶部")], &[("广告位置", "底部")]]);
        entry.notes = "fun".to_string();
        let projection = project([&entry], &ProjectionOptions::default());
        let layout = SheetLayout::for_projection(&projection);
        XlsxWriter::new().write(&projection, &layout).unwrap()
    }

    #[test]
    fn column_letters() {
        assert_eq!(column_letter(1), "A");
        assert_eq!(column_letter(26), "Z");
        assert_eq!(column_letter(27), "AA");
        assert_eq!(column_letter(52), "AZ");
        assert_eq!(column_letter(703), "AAA");
    }

    #[test]
    fn escapes_markup_and_drops_controls() {
        assert_eq!(escape_xml("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&apos;");
        assert_eq!(escape_xml("x\u{1}y\nz"), "xy\nz");
    }

    #[test]
    fn container_has_all_parts() {
        let bytes = sample_bytes();
        let archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "xl/workbook.xml",
            "xl/_rels/workbook.xml.rels",
            "xl/styles.xml",
            "xl/sharedStrings.xml",
            "xl/worksheets/sheet1.xml",
        ] {
            assert!(names.contains(&part), "missing {}", part);
        }
    }

    #[test]
    fn sheet_rows_and_styles() {
        let bytes = sample_bytes();
        let sheet = read_part(&bytes, "xl/worksheets/sheet1.xml");

        assert_eq!(sheet.matches("<row ").count(), 3);
        assert!(sheet.contains(r#"<c r="A1" s="1" t="s">"#));
        assert!(sheet.contains(r#"<c r="A3" s="2"/>"#));
        assert!(sheet.contains(r#"width="17.14""#));

        let strings = read_part(&bytes, "xl/sharedStrings.xml");
        assert!(strings.contains("A&amp;B"));
        assert!(strings.contains("游戏名称"));

        let workbook = read_part(&bytes, "xl/workbook.xml");
        assert!(workbook.contains(r#"name="广告测评数据""#));

        let styles = read_part(&bytes, "xl/styles.xml");
        assert!(styles.contains("FF4472C4"));
        assert!(styles.contains(r#"horizontal="center""#));
        assert!(styles.contains(r#"<name val="SimSun"/>"#));
    }

    #[test]
    fn body_cells_center_vertically() {
        let styles = read_part(&sample_bytes(), "xl/styles.xml");
        assert_eq!(styles.matches(r#"vertical="center""#).count(), 2);
        assert!(!styles.contains(r#"vertical="top""#));
    }
}
