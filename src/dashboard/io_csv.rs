// Primitives for reading CSV files.

use std::path::Path;

use crate::dashboard::{io_common::read_text_cell, *};

pub const PEER_TYPE_COLUMN: &str = "PEER_TYPE";
pub const PEER_NAME_COLUMN: &str = "PEER_NAME";

pub fn read_csv_table(path: &str) -> DashboardResult<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    let header: Vec<String> = rdr
        .headers()
        .context(CsvReadSnafu { path })?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    debug!("read_csv_table: {:?}: header {:?}", path, header);

    let mut rows: Vec<Vec<RawCell>> = Vec::new();
    for line_r in rdr.records() {
        let line = line_r.context(CsvReadSnafu { path })?;
        rows.push(line.iter().map(read_text_cell).collect());
    }
    info!("read_csv_table: {:?}: {} rows", path, rows.len());
    Ok(RawTable { header, rows })
}

/// Reads the peer groups. A missing file is not an error: `None` is returned.
pub fn read_peer_groups(path: &str) -> DashboardResult<Option<PeerGroups>> {
    if !Path::new(path).exists() {
        return Ok(None);
    }
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    let header = rdr.headers().context(CsvReadSnafu { path })?.clone();
    let position = |column: &str| {
        header
            .iter()
            .position(|h| h.trim() == column)
            .context(MissingPeerColumnSnafu { path, column })
    };
    let type_idx = position(PEER_TYPE_COLUMN)?;
    let name_idx = position(PEER_NAME_COLUMN)?;

    let mut pairs: Vec<(String, String)> = Vec::new();
    for line_r in rdr.records() {
        let line = line_r.context(CsvReadSnafu { path })?;
        let group = line.get(type_idx).unwrap_or("").trim();
        let name = line.get(name_idx).unwrap_or("").trim();
        if group.is_empty() || name.is_empty() {
            debug!("read_peer_groups: skipping incomplete line {:?}", line);
            continue;
        }
        pairs.push((group.to_string(), name.to_string()));
    }
    let groups = PeerGroups::from_pairs(&pairs);
    info!(
        "read_peer_groups: {:?}: {} groups, {} entries",
        path,
        groups.groups.len(),
        pairs.len()
    );
    Ok(Some(groups))
}
