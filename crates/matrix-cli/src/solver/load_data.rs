//! Matrix input from delimited text files.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::{ReaderBuilder, Trim};

use crate::solver::input::CellInput;

/// Ensure `path` names an existing `.csv` or `.tsv` file.
pub fn validate_tsv_or_csv_file(path: &str) -> Result<()> {
    let pb = PathBuf::from(path);

    let ext = pb
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());
    match ext.as_deref() {
        Some("tsv") | Some("csv") => {}
        _ => anyhow::bail!("File must have a .tsv or .csv extension: {}", path),
    }

    if !pb.exists() {
        anyhow::bail!("File does not exist: {}", path);
    }

    Ok(())
}

/// Read a header-less delimited file into raw cells, one record per row.
///
/// Tabs delimit `.tsv` files, commas everything else. Records may differ in
/// length; blank records are skipped.
pub fn read_matrix_file<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<CellInput>>> {
    let path = path.as_ref();
    validate_tsv_or_csv_file(&path.to_string_lossy())?;

    let delimiter = match path.extension().and_then(|s| s.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
        _ => b',',
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .delimiter(delimiter)
        .from_path(path)
        .with_context(|| format!("Failed to open matrix file: {}", path.display()))?;

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.with_context(|| {
            format!("Failed to read record {} of {}", idx + 1, path.display())
        })?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        rows.push(record.iter().map(CellInput::from).collect());
    }

    log::debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_csv_and_tsv() {
        let dir = tempfile::tempdir().unwrap();

        let csv_path = dir.path().join("a.csv");
        let mut f = std::fs::File::create(&csv_path).unwrap();
        writeln!(f, "1, 2\n3,x").unwrap();
        let rows = read_matrix_file(&csv_path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][1].value(), 2.0);
        assert_eq!(rows[1][1].value(), 0.0);

        let tsv_path = dir.path().join("b.TSV");
        let mut f = std::fs::File::create(&tsv_path).unwrap();
        writeln!(f, "1\t2\t3\n\n4").unwrap();
        let rows = read_matrix_file(&tsv_path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 3);
        assert_eq!(rows[1].len(), 1);
    }

    #[test]
    fn rejects_other_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::File::create(&path).unwrap();
        assert!(read_matrix_file(&path).is_err());
    }
}
