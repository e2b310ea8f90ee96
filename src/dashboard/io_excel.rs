// Primitives for reading Excel workbooks.

use calamine::{open_workbook, DataType, Reader, Xlsx};

use crate::dashboard::*;

pub fn read_excel_table(path: &str, sheet: &str) -> DashboardResult<RawTable> {
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let wrange = workbook
        .worksheet_range(sheet)
        .context(MissingWorksheetSnafu { path, sheet })?
        .context(OpeningExcelSnafu { path })?;

    let mut iter = wrange.rows();
    let header: Vec<String> = match iter.next() {
        Some(row) => row.iter().map(read_header_cell).collect(),
        None => Vec::new(),
    };
    debug!("read_excel_table: {:?}/{:?}: header {:?}", path, sheet, header);

    let rows: Vec<Vec<RawCell>> = iter.map(|row| row.iter().map(read_cell).collect()).collect();
    info!("read_excel_table: {:?}/{:?}: {} rows", path, sheet, rows.len());
    Ok(RawTable { header, rows })
}

fn read_header_cell(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.trim().to_string(),
        DataType::Int(i) => i.to_string(),
        DataType::Float(f) => f.to_string(),
        DataType::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn read_cell(cell: &DataType) -> RawCell {
    match cell {
        DataType::Int(i) => RawCell::Int(*i),
        DataType::Float(f) => RawCell::Float(*f),
        DataType::String(s) if s.trim().is_empty() => RawCell::Empty,
        DataType::String(s) => RawCell::Text(s.clone()),
        DataType::Bool(b) => RawCell::Bool(*b),
        DataType::Empty => RawCell::Empty,
        _ => {
            debug!("read_cell: unsupported cell {:?}", cell);
            RawCell::Empty
        }
    }
}
