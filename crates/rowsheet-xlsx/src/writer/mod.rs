//! XLSX writer
//!
//! Produces the smallest package Excel and LibreOffice open without repair:
//! content types, package and workbook relationships, a one-format styles
//! part and one worksheet part per sheet. Strings are written inline, so no
//! shared strings table is emitted.

use std::fmt::Write as _;
use std::fs;
use std::io::{Cursor, Seek, Write};
use std::path::Path;

use crate::error::XlsxResult;
use rowsheet_core::{CellAddress, CellError, CellValue, Workbook, Worksheet};

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <fonts count="1"><font><sz val="11"/><name val="Calibri"/><family val="2"/></font></fonts>
    <fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills>
    <borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders>
    <cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>
    <cellXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/></cellXfs>
    <cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>
</styleSheet>"#;

/// Escape text for XML content and attribute values
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Encode characters XML 1.0 cannot carry as Excel's `_xHHHH_` sequences.
///
/// Carriage returns are encoded too (XML parsers normalize them away), and a
/// literal `_x` that would read back as an escape gets its underscore escaped.
pub(crate) fn encode_excel_escapes(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for (i, c) in s.char_indices() {
        match c {
            '\t' | '\n' => result.push(c),
            '_' if looks_like_escape(&s[i..]) => result.push_str("_x005F_"),
            c if (c as u32) < 0x20 || c == '\u{FFFE}' || c == '\u{FFFF}' => {
                let _ = write!(result, "_x{:04X}_", c as u32);
            }
            c => result.push(c),
        }
    }
    result
}

fn looks_like_escape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() >= 7
        && bytes[1] == b'x'
        && bytes[2..6].iter().all(u8::is_ascii_hexdigit)
        && bytes[6] == b'_'
}

/// Serializes a [`Workbook`] as a values-only XLSX package
pub struct XlsxWriter;

impl XlsxWriter {
    /// Serialize and store at `path` with one write
    pub fn write_file<P: AsRef<Path>>(workbook: &Workbook, path: P) -> XlsxResult<()> {
        let bytes = Self::to_bytes(workbook)?;
        fs::write(path, bytes)?;
        Ok(())
    }

    /// Serialize a workbook into an in-memory package
    pub fn to_bytes(workbook: &Workbook) -> XlsxResult<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        Self::write(workbook, &mut cursor)?;
        Ok(cursor.into_inner())
    }

    /// Stream the package into any seekable sink
    pub fn write<W: Write + Seek>(workbook: &Workbook, writer: W) -> XlsxResult<()> {
        let mut zip = zip::ZipWriter::new(writer);

        Self::write_content_types(&mut zip, workbook)?;
        Self::write_root_rels(&mut zip)?;
        Self::write_workbook_xml(&mut zip, workbook)?;
        Self::write_workbook_rels(&mut zip, workbook)?;
        Self::write_part(&mut zip, "xl/styles.xml", STYLES_XML)?;

        for (i, sheet) in workbook.worksheets().enumerate() {
            let xml = Self::worksheet_xml(sheet);
            Self::write_part(&mut zip, &format!("xl/worksheets/sheet{}.xml", i + 1), &xml)?;
        }

        zip.finish()?;
        Ok(())
    }

    fn write_part<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        name: &str,
        content: &str,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file(name.to_string(), options)?;
        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_content_types<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
        );

        for i in 0..workbook.sheet_count() {
            let _ = write!(
                content,
                r#"
    <Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
                i + 1
            );
        }

        content.push_str("\n</Types>");
        Self::write_part(zip, "[Content_Types].xml", &content)
    }

    fn write_root_rels<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;
        Self::write_part(zip, "_rels/.rels", content)
    }

    fn write_workbook_xml<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets>"#,
        );

        for (i, sheet) in workbook.worksheets().enumerate() {
            let _ = write!(
                content,
                r#"
        <sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                escape_xml(sheet.name()),
                i + 1,
                i + 1
            );
        }

        content.push_str(
            r#"
    </sheets>
</workbook>"#,
        );
        Self::write_part(zip, "xl/workbook.xml", &content)
    }

    fn write_workbook_rels<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );

        for i in 0..workbook.sheet_count() {
            let _ = write!(
                content,
                r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                i + 1,
                i + 1
            );
        }

        // Styles take the id after the last sheet
        let _ = write!(
            content,
            r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
            workbook.sheet_count() + 1
        );

        content.push_str("\n</Relationships>");
        Self::write_part(zip, "xl/_rels/workbook.xml.rels", &content)
    }

    /// Render one worksheet part
    pub(crate) fn worksheet_xml(sheet: &Worksheet) -> String {
        let dimension = sheet
            .used_range()
            .map_or_else(|| "A1".to_string(), |range| range.to_string());

        let mut content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <dimension ref="{}"/>
    <sheetData>"#,
            dimension
        );

        // Cells come out of storage row-major, so rows open and close in order
        let mut current_row: Option<u32> = None;
        for (row, col, value) in sheet.iter_cells() {
            if current_row != Some(row) {
                if current_row.is_some() {
                    content.push_str("\n        </row>");
                }
                let _ = write!(content, "\n        <row r=\"{}\">", row + 1);
                current_row = Some(row);
            }

            let cell_ref = CellAddress::new(row, col).to_a1_string();
            Self::write_cell(&mut content, &cell_ref, value);
        }

        if current_row.is_some() {
            content.push_str("\n        </row>");
        }

        content.push_str("\n    </sheetData>\n</worksheet>");
        content
    }

    fn write_cell(content: &mut String, cell_ref: &str, value: &CellValue) {
        let _ = match value {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) if !n.is_finite() => write!(
                content,
                "\n            <c r=\"{}\" t=\"e\"><v>{}</v></c>",
                cell_ref,
                CellError::Num
            ),
            CellValue::Number(n) => write!(
                content,
                "\n            <c r=\"{}\"><v>{}</v></c>",
                cell_ref, n
            ),
            CellValue::String(s) => write!(
                content,
                "\n            <c r=\"{}\" t=\"inlineStr\"><is><t xml:space=\"preserve\">{}</t></is></c>",
                cell_ref,
                escape_xml(&encode_excel_escapes(s))
            ),
            CellValue::Boolean(b) => write!(
                content,
                "\n            <c r=\"{}\" t=\"b\"><v>{}</v></c>",
                cell_ref,
                u8::from(*b)
            ),
            CellValue::Error(e) => write!(
                content,
                "\n            <c r=\"{}\" t=\"e\"><v>{}</v></c>",
                cell_ref,
                escape_xml(e.as_str())
            ),
            CellValue::Formula { text, cached_value } => {
                let formula = escape_xml(text.strip_prefix('=').unwrap_or(text));
                let (type_attr, cached) = match cached_value.as_deref() {
                    Some(CellValue::Number(n)) if n.is_finite() => ("", n.to_string()),
                    Some(CellValue::Boolean(b)) => (" t=\"b\"", u8::from(*b).to_string()),
                    Some(CellValue::Error(e)) => (" t=\"e\"", e.as_str().to_string()),
                    Some(CellValue::String(s)) => {
                        (" t=\"str\"", escape_xml(&encode_excel_escapes(s)))
                    }
                    _ => ("", String::new()),
                };
                if cached.is_empty() && type_attr.is_empty() {
                    write!(
                        content,
                        "\n            <c r=\"{}\"><f>{}</f></c>",
                        cell_ref, formula
                    )
                } else {
                    write!(
                        content,
                        "\n            <c r=\"{}\"{}><f>{}</f><v>{}</v></c>",
                        cell_ref, type_attr, formula, cached
                    )
                }
            }
        };
    }
}
