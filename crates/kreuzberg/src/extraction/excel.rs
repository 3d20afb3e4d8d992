//! Excel and spreadsheet extraction.
//!
//! Parses modern Office Open XML spreadsheets (`.xlsx`, `.xlsm`, `.xlam`, `.xltm`),
//! the legacy binary format (`.xls`, `.xla`), the binary XLSX variant (`.xlsb`), and
//! OpenDocument spreadsheets (`.ods`) via `calamine`, converting every sheet to a
//! Markdown table.

use calamine::{Data, DataRef, Range, Reader, open_workbook_auto};
use std::collections::HashMap;
use std::fmt::Write as FmtWrite;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use crate::error::{KreuzbergError, Result};
use crate::extraction::capacity;
use crate::types::{ExcelSheet, ExcelWorkbook};

/// Maximum number of cells in a sheet's bounding box before it's considered pathological
/// (e.g. a Solver file with cells at A1 and XFD1048575, a ~17B-cell bounding box).
const MAX_BOUNDING_BOX_CELLS: u64 = 100_000_000;

pub fn read_excel_file(file_path: &str) -> Result<ExcelWorkbook> {
    let lower_path = file_path.to_lowercase();

    if lower_path.ends_with(".xlsx") || lower_path.ends_with(".xlsm") || lower_path.ends_with(".xltm") {
        let file = std::fs::File::open(file_path)?;
        let workbook = calamine::Xlsx::new(std::io::BufReader::new(file))
            .map_err(|e| KreuzbergError::parsing(format!("Failed to parse XLSX: {}", e)))?;
        return process_xlsx_workbook(workbook);
    }

    if lower_path.ends_with(".xlam") {
        let file = std::fs::File::open(file_path)?;
        return match calamine::Xlsx::new(std::io::BufReader::new(file)) {
            Ok(workbook) => process_xlsx_workbook(workbook),
            Err(_) => Ok(ExcelWorkbook { sheets: vec![], metadata: HashMap::new() }),
        };
    }

    let workbook = match open_workbook_auto(Path::new(file_path)) {
        Ok(wb) => wb,
        Err(calamine::Error::Io(io_err)) => {
            if io_err.kind() == std::io::ErrorKind::InvalidData {
                return Err(KreuzbergError::parsing(format!("Cannot detect Excel file format: {}", io_err)));
            }
            return Err(io_err.into());
        }
        Err(e) => return Err(KreuzbergError::parsing(format!("Failed to parse Excel file: {}", e))),
    };

    process_workbook(workbook)
}

pub fn read_excel_bytes(data: &[u8], file_extension: &str) -> Result<ExcelWorkbook> {
    match file_extension.to_lowercase().as_str() {
        "xlsx" | "xlsm" | "xltm" => {
            let workbook = calamine::Xlsx::new(Cursor::new(data))
                .map_err(|e| KreuzbergError::parsing(format!("Failed to parse XLSX: {}", e)))?;
            process_xlsx_workbook(workbook)
        }
        "xlam" => match calamine::Xlsx::new(Cursor::new(data)) {
            Ok(workbook) => process_xlsx_workbook(workbook),
            Err(_) => Ok(ExcelWorkbook { sheets: vec![], metadata: HashMap::new() }),
        },
        "xls" => {
            let workbook = calamine::Xls::new(Cursor::new(data))
                .map_err(|e| KreuzbergError::parsing(format!("Failed to parse XLS: {}", e)))?;
            process_workbook(workbook)
        }
        "xla" => match calamine::Xls::new(Cursor::new(data)) {
            Ok(workbook) => process_workbook(workbook),
            Err(_) => Ok(ExcelWorkbook { sheets: vec![], metadata: HashMap::new() }),
        },
        "xlsb" => match calamine::Xlsb::new(Cursor::new(data)) {
            Ok(workbook) => process_workbook(workbook),
            Err(_) => Ok(ExcelWorkbook { sheets: vec![], metadata: HashMap::new() }),
        },
        "ods" => {
            let workbook = calamine::Ods::new(Cursor::new(data))
                .map_err(|e| KreuzbergError::parsing(format!("Failed to parse ODS: {}", e)))?;
            process_workbook(workbook)
        }
        _ => Err(KreuzbergError::parsing(format!("Unsupported file extension: {}", file_extension))),
    }
}

/// Process XLSX workbooks, pre-checking each sheet's bounding box via the cell-streaming
/// API before allocating a full `Range` to avoid OOM on sparse, pathologically-dimensioned
/// sheets.
fn process_xlsx_workbook<RS: Read + Seek>(mut workbook: calamine::Xlsx<RS>) -> Result<ExcelWorkbook> {
    let sheet_names = workbook.sheet_names();
    let mut sheets = Vec::with_capacity(sheet_names.len());

    for name in &sheet_names {
        match process_xlsx_sheet_safe(&mut workbook, name) {
            Ok(sheet) => sheets.push(sheet),
            Err(e) => tracing::warn!("Failed to process sheet '{}': {}", name, e),
        }
    }

    Ok(ExcelWorkbook { sheets, metadata: sheet_name_metadata(&sheet_names) })
}

fn process_xlsx_sheet_safe<RS: Read + Seek>(workbook: &mut calamine::Xlsx<RS>, sheet_name: &str) -> Result<ExcelSheet> {
    let (cells, row_min, row_max, col_min, col_max) = {
        let mut cell_reader = workbook
            .worksheet_cells_reader(sheet_name)
            .map_err(|e| KreuzbergError::parsing(format!("Failed to read sheet '{}': {}", sheet_name, e)))?;

        let mut cells: Vec<((u32, u32), Data)> = Vec::new();
        let mut row_min = u32::MAX;
        let mut row_max = 0u32;
        let mut col_min = u32::MAX;
        let mut col_max = 0u32;

        while let Ok(Some(cell)) = cell_reader.next_cell() {
            let (row, col) = cell.get_position();
            row_min = row_min.min(row);
            row_max = row_max.max(row);
            col_min = col_min.min(col);
            col_max = col_max.max(col);

            let data = match cell.get_value() {
                DataRef::Empty => Data::Empty,
                DataRef::String(s) => Data::String(s.clone()),
                DataRef::SharedString(s) => Data::String(s.to_string()),
                DataRef::Float(f) => Data::Float(*f),
                DataRef::Int(i) => Data::Int(*i),
                DataRef::Bool(b) => Data::Bool(*b),
                DataRef::DateTime(dt) => Data::DateTime(*dt),
                DataRef::DateTimeIso(s) => Data::DateTimeIso(s.clone()),
                DataRef::DurationIso(s) => Data::DurationIso(s.clone()),
                DataRef::Error(e) => Data::Error(e.clone()),
            };
            cells.push(((row, col), data));
        }
        (cells, row_min, row_max, col_min, col_max)
    };

    if cells.is_empty() {
        return Ok(empty_sheet(sheet_name));
    }

    let bb_rows = (row_max - row_min + 1) as u64;
    let bb_cols = (col_max - col_min + 1) as u64;

    if bb_rows.saturating_mul(bb_cols) > MAX_BOUNDING_BOX_CELLS {
        return Ok(process_sparse_sheet_from_cells(sheet_name, cells, row_min, row_max, col_min, col_max));
    }

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| KreuzbergError::parsing(format!("Failed to parse sheet '{}': {}", sheet_name, e)))?;

    Ok(process_sheet(sheet_name, &range))
}

fn process_sparse_sheet_from_cells(
    sheet_name: &str, cells: Vec<((u32, u32), Data)>, row_min: u32, row_max: u32, col_min: u32, col_max: u32,
) -> ExcelSheet {
    let cell_count = cells.len();
    let bb_rows = (row_max - row_min + 1) as usize;
    let bb_cols = (col_max - col_min + 1) as usize;

    let mut markdown = String::with_capacity(500 + cell_count * 50);
    write!(
        markdown,
        "## {}\n\n*Note: Sheet contains sparse data spanning {} rows x {} columns ({} actual cells). \
         Bounding box too large for dense extraction. Showing actual cell data below.*\n\n",
        sheet_name, bb_rows, bb_cols, cell_count
    )
    .expect("write to String cannot fail");

    let mut cells_by_row: HashMap<u32, Vec<(u32, &Data)>> = HashMap::new();
    for ((row, col), data) in &cells {
        cells_by_row.entry(*row).or_default().push((*col, data));
    }
    let mut rows: Vec<_> = cells_by_row.keys().copied().collect();
    rows.sort_unstable();

    const MAX_OUTPUT_CELLS: usize = 1000;
    let mut output_count = 0;

    for row in rows {
        if output_count >= MAX_OUTPUT_CELLS {
            write!(markdown, "\n... ({} more cells not shown)\n", cell_count - output_count).expect("write to String cannot fail");
            break;
        }
        let mut row_cells = cells_by_row.remove(&row).unwrap_or_default();
        row_cells.sort_by_key(|(col, _)| *col);

        for (col, data) in row_cells {
            if output_count >= MAX_OUTPUT_CELLS {
                break;
            }
            let cell_str = format_cell_to_string(data);
            if !cell_str.is_empty() {
                writeln!(markdown, "- **{}{}**: {}", col_to_excel_letter(col), row + 1, cell_str).expect("write to String cannot fail");
                output_count += 1;
            }
        }
    }

    ExcelSheet {
        name: sheet_name.to_owned(),
        markdown,
        row_count: bb_rows,
        col_count: bb_cols,
        cell_count,
        table_cells: None,
    }
}

fn col_to_excel_letter(col: u32) -> String {
    let mut result = String::new();
    let mut n = col + 1;
    while n > 0 {
        n -= 1;
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        n /= 26;
    }
    result
}

fn process_workbook<RS, R>(mut workbook: R) -> Result<ExcelWorkbook>
where
    RS: Read + Seek,
    R: Reader<RS>,
{
    let sheet_names = workbook.sheet_names();
    let mut sheets = Vec::with_capacity(sheet_names.len());

    for name in &sheet_names {
        if let Ok(range) = workbook.worksheet_range(name) {
            sheets.push(process_sheet(name, &range));
        }
    }

    Ok(ExcelWorkbook { sheets, metadata: sheet_name_metadata(&sheet_names) })
}

fn sheet_name_metadata(sheet_names: &[String]) -> HashMap<String, String> {
    let mut metadata = HashMap::with_capacity(2);
    metadata.insert("sheet_count".to_owned(), sheet_names.len().to_string());
    metadata.insert("sheet_names".to_owned(), sheet_names.join(", "));
    metadata
}

fn empty_sheet(name: &str) -> ExcelSheet {
    ExcelSheet {
        name: name.to_owned(),
        markdown: format!("## {}\n\n*Empty sheet*", name),
        row_count: 0,
        col_count: 0,
        cell_count: 0,
        table_cells: None,
    }
}

#[inline]
fn process_sheet(name: &str, range: &Range<Data>) -> ExcelSheet {
    let (rows, cols) = range.get_size();
    let cell_count = range.used_cells().count();

    if rows == 0 || cols == 0 {
        return empty_sheet(name);
    }

    let estimated_capacity = 50 + (cols * 20) + (cell_count * 12);
    let (markdown, table_cells) = generate_markdown_and_cells(name, range, estimated_capacity);
    ExcelSheet { name: name.to_owned(), markdown, row_count: rows, col_count: cols, cell_count, table_cells: Some(table_cells) }
}

/// Generates a sheet's Markdown table and its structured cell grid in a single pass.
fn generate_markdown_and_cells(sheet_name: &str, range: &Range<Data>, capacity_hint: usize) -> (String, Vec<Vec<String>>) {
    const MAX_REASONABLE_ROWS: usize = 100_000;

    let (declared_rows, _) = range.get_size();
    if declared_rows > MAX_REASONABLE_ROWS {
        let actual_cell_count = range.used_cells().count();
        if actual_cell_count < 10_000 {
            let mut result = String::with_capacity(100 + sheet_name.len());
            write!(
                result,
                "## {}\n\n*Sheet has extreme declared dimensions ({} rows) with minimal actual data ({} cells). Skipping to prevent OOM.*",
                sheet_name, declared_rows, actual_cell_count
            )
            .expect("write to String cannot fail");
            return (result, Vec::new());
        }
    }

    let rows: Vec<_> = range.rows().collect();
    if rows.is_empty() {
        let mut result = String::with_capacity(50 + sheet_name.len());
        write!(result, "## {}\n\n*No data*", sheet_name).expect("write to String cannot fail");
        return (result, Vec::new());
    }

    let header = &rows[0];
    let header_len = header.len();
    let row_count = rows.len();
    let table_capacity = capacity::estimate_table_markdown_capacity(row_count, header_len);

    let mut markdown = String::with_capacity(table_capacity.max(capacity_hint));
    let mut cells: Vec<Vec<String>> = Vec::with_capacity(row_count);

    write!(markdown, "## {}\n\n", sheet_name).expect("write to String cannot fail");

    let mut header_cells = Vec::with_capacity(header_len);
    markdown.push_str("| ");
    for (i, cell) in header.iter().enumerate() {
        if i > 0 {
            markdown.push_str(" | ");
        }
        let cell_str = format_cell_to_string(cell);
        push_escaped(&mut markdown, &cell_str);
        header_cells.push(cell_str);
    }
    markdown.push_str(" |\n");
    cells.push(header_cells);

    markdown.push_str("| ");
    for i in 0..header_len {
        if i > 0 {
            markdown.push_str(" | ");
        }
        markdown.push_str("---");
    }
    markdown.push_str(" |\n");

    for row in rows.iter().skip(1) {
        let mut row_cells = Vec::with_capacity(header_len);
        markdown.push_str("| ");
        for i in 0..header_len {
            if i > 0 {
                markdown.push_str(" | ");
            }
            let cell_str = row.get(i).map(format_cell_to_string).unwrap_or_default();
            push_escaped(&mut markdown, &cell_str);
            row_cells.push(cell_str);
        }
        markdown.push_str(" |\n");
        cells.push(row_cells);
    }

    (markdown, cells)
}

fn push_escaped(markdown: &mut String, cell_str: &str) {
    if cell_str.contains('|') || cell_str.contains('\\') {
        for ch in cell_str.chars() {
            match ch {
                '|' => markdown.push_str("\\|"),
                '\\' => markdown.push_str("\\\\"),
                _ => markdown.push(ch),
            }
        }
    } else {
        markdown.push_str(cell_str);
    }
}

/// Converts a cell's value to its string representation, shared between Markdown
/// generation and structured cell extraction so both stay byte-identical.
#[inline]
fn format_cell_to_string(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                format!("{:.1}", f)
            } else {
                format!("{}", f)
            }
        }
        Data::Int(i) => format!("{}", i),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => format!("{}", datetime.format("%Y-%m-%d %H:%M:%S")),
            None => format!("{:?}", dt),
        },
        Data::Error(e) => format!("#ERR: {:?}", e),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => format!("DURATION: {}", s),
    }
}

/// Joins every sheet's Markdown into one document.
pub fn excel_to_markdown(workbook: &ExcelWorkbook) -> String {
    let total_capacity: usize = workbook.sheets.iter().map(|sheet| sheet.markdown.len() + 2).sum();
    let mut result = String::with_capacity(total_capacity);

    for (i, sheet) in workbook.sheets.iter().enumerate() {
        if i > 0 {
            result.push_str("\n\n");
        }
        result.push_str(sheet.markdown.trim_end());
    }

    result
}
