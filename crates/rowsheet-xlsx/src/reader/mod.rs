//! XLSX reader

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use rowsheet_core::{CellAddress, CellError, CellValue, Workbook, Worksheet};

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";
const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

/// Undo the `_xHHHH_` escaping OOXML applies to characters XML text cannot
/// carry verbatim, `_x000D_` for CR being the usual one.
///
/// Malformed sequences pass through untouched.
pub(crate) fn decode_excel_escapes(s: &str) -> String {
    if !s.contains("_x") {
        return s.to_string();
    }

    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find("_x") {
        result.push_str(&rest[..pos]);
        let candidate = &rest[pos..];

        // `_xHHHH_` is exactly 7 ASCII bytes
        let decoded = candidate
            .get(2..6)
            .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
            .filter(|_| candidate.as_bytes().get(6) == Some(&b'_'))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .and_then(char::from_u32);

        match decoded {
            Some(c) => {
                result.push(c);
                rest = &candidate[7..];
            }
            None => {
                result.push_str("_x");
                rest = &candidate[2..];
            }
        }
    }

    result.push_str(rest);
    result
}

/// Value of the attribute with the given local name (namespace prefix ignored)
fn attr_value(e: &BytesStart<'_>, name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == name)
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.into_owned()))
}

/// Which text node the worksheet parser is currently collecting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    None,
    Value,
    Formula,
    InlineText,
}

/// A `<c>` element being parsed
#[derive(Debug)]
struct PendingCell {
    row: u32,
    col: u16,
    cell_type: Option<String>,
    value: Option<String>,
    formula: Option<String>,
    inline: Option<String>,
}

/// Sheet entry from workbook.xml
#[derive(Debug)]
struct SheetEntry {
    name: String,
    rel_id: String,
}

/// XLSX file reader
pub struct XlsxReader;

impl XlsxReader {
    /// Load every sheet of the package at `path`
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<Workbook> {
        let file = File::open(path)?;
        Self::read(BufReader::new(file))
    }

    /// Load every sheet of a package held in any seekable source
    pub fn read<R: Read + Seek>(reader: R) -> XlsxResult<Workbook> {
        let mut archive = zip::ZipArchive::new(reader)?;

        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }

        let shared_strings = Self::read_shared_strings(&mut archive)?;
        let sheets = Self::read_workbook_xml(&mut archive)?;
        let sheet_paths = Self::read_workbook_rels(&mut archive)?;

        let mut workbook = Workbook::empty();

        for entry in sheets {
            let Some(path) = sheet_paths.get(&entry.rel_id) else {
                log::warn!(
                    "sheet '{}' has no worksheet relationship ({}), skipped",
                    entry.name,
                    entry.rel_id
                );
                continue;
            };

            let mut worksheet = Worksheet::new(entry.name);
            Self::read_worksheet(&mut archive, path, &mut worksheet, &shared_strings)?;
            log::debug!(
                "read sheet '{}' from {} ({} cells)",
                worksheet.name(),
                path,
                worksheet.cell_count()
            );
            workbook.add_existing_worksheet(worksheet)?;
        }

        Ok(workbook)
    }

    /// The shared string table, in index order
    fn read_shared_strings<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<String>> {
        let mut strings = Vec::new();

        let file = match archive.by_name(SHARED_STRINGS_PART) {
            Ok(f) => f,
            Err(_) => return Ok(strings),
        };

        let mut xml_reader = Reader::from_reader(BufReader::new(file));

        let mut buf = Vec::new();
        let mut current = String::new();
        let mut in_si = false;
        let mut in_t = false;
        // Phonetic runs (<rPh>) repeat the text as a reading guide
        let mut in_phonetic = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.local_name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current.clear();
                    }
                    b"rPh" => in_phonetic = true,
                    b"t" if in_si && !in_phonetic => in_t = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) if e.local_name().as_ref() == b"si" => {
                    strings.push(String::new());
                }
                Ok(Event::End(e)) => match e.local_name().as_ref() {
                    b"si" => {
                        strings.push(decode_excel_escapes(&current));
                        current.clear();
                        in_si = false;
                    }
                    b"rPh" => in_phonetic = false,
                    b"t" => in_t = false,
                    _ => {}
                },
                Ok(Event::Text(e)) if in_t => {
                    let text = e.unescape()?;
                    current.push_str(&text);
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(strings)
    }

    /// Read workbook.xml to get sheet names and relationship ids, in order
    fn read_workbook_xml<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<SheetEntry>> {
        let file = archive
            .by_name(WORKBOOK_PART)
            .map_err(|_| XlsxError::MissingPart(WORKBOOK_PART.into()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut sheets = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.local_name().as_ref() == b"sheet" =>
                {
                    // `r:id` is matched by local name, prefixes vary between producers
                    match (attr_value(&e, b"name"), attr_value(&e, b"id")) {
                        (Some(name), Some(rel_id)) => sheets.push(SheetEntry { name, rel_id }),
                        _ => {
                            return Err(XlsxError::parse(
                                WORKBOOK_PART,
                                "<sheet> without name or r:id",
                            ))
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(sheets)
    }

    /// Read workbook.xml.rels to get worksheet part paths keyed by relationship id
    fn read_workbook_rels<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<HashMap<String, String>> {
        let file = archive
            .by_name(WORKBOOK_RELS_PART)
            .map_err(|_| XlsxError::MissingPart(WORKBOOK_RELS_PART.into()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut rels = HashMap::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let id = attr_value(&e, b"Id");
                    let target = attr_value(&e, b"Target");
                    let rel_type = attr_value(&e, b"Type");

                    match (id, target, rel_type) {
                        (Some(id), Some(target), Some(rel_type))
                            if rel_type.ends_with("/worksheet") =>
                        {
                            rels.insert(id, resolve_part_path(&target));
                        }
                        (_, target, rel_type) => {
                            log::debug!(
                                "ignoring workbook relationship {:?} -> {:?}",
                                rel_type,
                                target
                            );
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Read the cells of one worksheet part into `worksheet`
    fn read_worksheet<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        path: &str,
        worksheet: &mut Worksheet,
        shared_strings: &[String],
    ) -> XlsxResult<()> {
        let file = archive
            .by_name(path)
            .map_err(|_| XlsxError::MissingPart(path.to_string()))?;

        // No trimming: leading/trailing spaces in <t> and <v> are cell content
        let mut xml_reader = Reader::from_reader(BufReader::new(file));

        let mut buf = Vec::new();
        // 0-based cursors used when <row>/<c> omit their `r` attribute
        let mut current_row: Option<u32> = None;
        let mut next_col: u32 = 0;
        let mut pending: Option<PendingCell> = None;
        let mut capture = Capture::None;
        let mut in_phonetic = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.local_name().as_ref() {
                    b"row" => {
                        current_row = Some(Self::row_index(&e, current_row, path)?);
                        next_col = 0;
                    }
                    b"c" => {
                        let (row, col) = Self::cell_position(&e, current_row, next_col, path)?;
                        next_col = u32::from(col) + 1;
                        pending = Some(PendingCell {
                            row,
                            col,
                            cell_type: attr_value(&e, b"t"),
                            value: None,
                            formula: None,
                            inline: None,
                        });
                    }
                    b"v" => {
                        if let Some(cell) = pending.as_mut() {
                            cell.value = Some(String::new());
                            capture = Capture::Value;
                        }
                    }
                    b"f" => {
                        if let Some(cell) = pending.as_mut() {
                            cell.formula = Some(String::new());
                            capture = Capture::Formula;
                        }
                    }
                    b"is" => {
                        if let Some(cell) = pending.as_mut() {
                            cell.inline = Some(String::new());
                        }
                    }
                    b"rPh" => in_phonetic = true,
                    b"t" if !in_phonetic => {
                        if pending.as_ref().is_some_and(|c| c.inline.is_some()) {
                            capture = Capture::InlineText;
                        }
                    }
                    _ => {}
                },
                Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                    b"row" => {
                        current_row = Some(Self::row_index(&e, current_row, path)?);
                        next_col = 0;
                    }
                    b"c" => {
                        // Valueless cell (style only): it still occupies a column
                        let (_, col) = Self::cell_position(&e, current_row, next_col, path)?;
                        next_col = u32::from(col) + 1;
                    }
                    b"v" => {
                        if let Some(cell) = pending.as_mut() {
                            cell.value = Some(String::new());
                        }
                    }
                    b"is" => {
                        if let Some(cell) = pending.as_mut() {
                            cell.inline = Some(String::new());
                        }
                    }
                    _ => {}
                },
                Ok(Event::Text(e)) if capture != Capture::None => {
                    let text = e.unescape()?;
                    if let Some(cell) = pending.as_mut() {
                        let target = match capture {
                            Capture::Value => cell.value.as_mut(),
                            Capture::Formula => cell.formula.as_mut(),
                            Capture::InlineText => cell.inline.as_mut(),
                            Capture::None => None,
                        };
                        if let Some(target) = target {
                            target.push_str(&text);
                        }
                    }
                }
                Ok(Event::End(e)) => match e.local_name().as_ref() {
                    b"v" | b"f" | b"t" => capture = Capture::None,
                    b"rPh" => in_phonetic = false,
                    b"c" => {
                        capture = Capture::None;
                        if let Some(cell) = pending.take() {
                            let (row, col) = (cell.row, cell.col);
                            let value = Self::cell_value(cell, shared_strings)?;
                            worksheet.set_cell_value_at(row, col, value)?;
                        }
                    }
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(())
    }

    /// 0-based row index of a `<row>` element
    fn row_index(e: &BytesStart<'_>, current: Option<u32>, part: &str) -> XlsxResult<u32> {
        match attr_value(e, b"r") {
            Some(r) => {
                let r: u32 = r
                    .trim()
                    .parse()
                    .map_err(|_| XlsxError::parse(part, format!("invalid row number '{}'", r)))?;
                r.checked_sub(1)
                    .ok_or_else(|| XlsxError::parse(part, "row number 0"))
            }
            None => Ok(current.map_or(0, |row| row + 1)),
        }
    }

    /// 0-based (row, col) of a `<c>` element
    fn cell_position(
        e: &BytesStart<'_>,
        current_row: Option<u32>,
        next_col: u32,
        part: &str,
    ) -> XlsxResult<(u32, u16)> {
        match attr_value(e, b"r") {
            Some(cell_ref) => {
                let addr = CellAddress::parse(&cell_ref).map_err(|err| {
                    XlsxError::parse(
                        part,
                        format!("invalid cell reference '{}': {}", cell_ref, err),
                    )
                })?;
                Ok((addr.row, addr.col))
            }
            None => {
                let col = u16::try_from(next_col)
                    .map_err(|_| XlsxError::parse(part, "too many cells in row"))?;
                Ok((current_row.unwrap_or(0), col))
            }
        }
    }

    /// Build the value of a finished `<c>` element
    fn cell_value(cell: PendingCell, shared_strings: &[String]) -> XlsxResult<CellValue> {
        let value = match (cell.cell_type.as_deref(), cell.inline) {
            (Some("inlineStr"), Some(text)) => CellValue::String(decode_excel_escapes(&text)),
            (cell_type, _) => match cell.value {
                Some(raw) => Self::typed_value(cell_type, &raw, shared_strings)?,
                None => CellValue::Empty,
            },
        };

        // Followers of a shared formula carry an empty <f/>, keep their cached value
        match cell.formula.filter(|f| !f.is_empty()) {
            Some(text) => {
                let cached = Some(value).filter(|v| !v.is_empty());
                Ok(CellValue::formula(text, cached))
            }
            None => Ok(value),
        }
    }

    /// Interpret a `<v>` payload according to the cell's `t` attribute
    fn typed_value(
        cell_type: Option<&str>,
        raw: &str,
        shared_strings: &[String],
    ) -> XlsxResult<CellValue> {
        let value = match cell_type {
            Some("s") => {
                let index: usize = raw.trim().parse().map_err(|_| {
                    XlsxError::parse(SHARED_STRINGS_PART, format!("invalid index '{}'", raw))
                })?;
                let s = shared_strings
                    .get(index)
                    .ok_or(XlsxError::SharedStringIndex {
                        index,
                        len: shared_strings.len(),
                    })?;
                CellValue::String(s.clone())
            }
            Some("b") => CellValue::Boolean(raw == "1" || raw.eq_ignore_ascii_case("true")),
            Some("e") => CellError::parse(raw)
                .map(CellValue::Error)
                .unwrap_or_else(|| CellValue::string(raw)),
            Some("str") | Some("inlineStr") => CellValue::String(decode_excel_escapes(raw)),
            // ISO 8601 date cells are kept as their text
            Some("d") => CellValue::string(raw),
            None | Some("n") => {
                if raw.trim().is_empty() {
                    CellValue::Empty
                } else {
                    match raw.trim().parse::<f64>() {
                        Ok(n) => CellValue::Number(n),
                        Err(_) => CellValue::string(raw),
                    }
                }
            }
            Some(other) => {
                log::debug!("unknown cell type '{}', keeping raw text", other);
                CellValue::string(raw)
            }
        };
        Ok(value)
    }
}

/// Resolve a relationship target against the `xl/` folder
fn resolve_part_path(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => {
            let mut parts: Vec<&str> = vec!["xl"];
            for segment in target.split('/') {
                match segment {
                    "" | "." => {}
                    ".." => {
                        parts.pop();
                    }
                    s => parts.push(s),
                }
            }
            parts.join("/")
        }
    }
}
