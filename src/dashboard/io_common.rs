use std::path::Path;

use ranking_compare::RawCell;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Paths in the configuration are relative to the configuration file.
pub fn resolve_path(root: &Path, file_path: &str) -> String {
    let p = Path::new(file_path);
    if p.is_absolute() {
        file_path.to_string()
    } else {
        root.join(p).to_string_lossy().to_string()
    }
}

/// Text files carry no types: cells that read as numbers become numbers.
pub fn read_text_cell(s: &str) -> RawCell {
    let t = s.trim();
    if t.is_empty() {
        return RawCell::Empty;
    }
    if let Ok(i) = t.parse::<i64>() {
        return RawCell::Int(i);
    }
    match t.parse::<f64>() {
        Ok(f) if f.is_finite() => RawCell::Float(f),
        _ => RawCell::Text(t.to_string()),
    }
}
