use jwalk::WalkDir;
use log::{debug, info};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::error::ConvertError;
use crate::parser::parse_ann_file;
use crate::types::{AnnotationRecord, CombinedTable, TableBuilder, COLUMNS};

/// List every regular file (or symlink to one) below the bounding-box root, in sorted walk order.
pub fn discover_annotation_files(bb_root: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    if !bb_root.is_dir() {
        return Err(ConvertError::discovery(
            bb_root,
            "bounding-box root does not exist or is not a directory",
        ));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(bb_root).skip_hidden(false).sort(true) {
        let entry = entry.map_err(|e| ConvertError::discovery(bb_root, e.to_string()))?;
        let file_type = entry.file_type();
        let path = entry.path();
        // Symlinks count when they resolve to a regular file
        if file_type.is_file()
            || (file_type.is_symlink() && fs::metadata(&path).is_ok_and(|m| m.is_file()))
        {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(ConvertError::discovery(
            bb_root,
            "no annotation files found",
        ));
    }
    Ok(files)
}

/// Parse every annotation file under `bb_root` into one table.
pub fn collect_annotations(bb_root: &Path) -> Result<CombinedTable, ConvertError> {
    let files = discover_annotation_files(bb_root)?;
    info!("Found {} annotation files under {}", files.len(), bb_root.display());
    collect_from_files(&files)
}

/// Parse the given files in order. The first malformed file aborts the whole collection.
pub fn collect_from_files(files: &[PathBuf]) -> Result<CombinedTable, ConvertError> {
    let mut builder = TableBuilder::new();
    for path in files {
        builder.push_file(parse_ann_file(path)?);
    }
    debug!(
        "Collected {} records from {} files",
        builder.record_count(),
        builder.file_count()
    );

    Ok(builder.finish())
}

/// Write the table as CSV: one header row, no index column.
pub fn write_csv(table: &CombinedTable, output_path: &Path) -> Result<(), ConvertError> {
    let csv_err = |source: csv::Error| ConvertError::Csv {
        path: output_path.to_path_buf(),
        source,
    };

    let file = File::create(output_path).map_err(|source| ConvertError::Io {
        path: output_path.to_path_buf(),
        source,
    })?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(BufWriter::new(file));

    writer.write_record(table.columns()).map_err(csv_err)?;
    for record in table.records() {
        writer.serialize(record).map_err(csv_err)?;
    }
    writer.flush().map_err(|source| ConvertError::Io {
        path: output_path.to_path_buf(),
        source,
    })?;

    info!("Wrote {} rows to {}", table.len(), output_path.display());
    Ok(())
}

/// Read back a CSV produced by [`write_csv`].
pub fn read_csv(path: &Path) -> Result<CombinedTable, ConvertError> {
    let csv_err = |source: csv::Error| ConvertError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::Reader::from_path(path).map_err(csv_err)?;
    let headers = reader.headers().map_err(csv_err)?;
    if !headers.iter().eq(COLUMNS.iter().copied()) {
        return Err(ConvertError::parse(
            path,
            Some(1),
            format!("unexpected header: {}", headers.iter().collect::<Vec<_>>().join(",")),
        ));
    }

    let records = reader
        .deserialize::<AnnotationRecord>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(csv_err)?;
    Ok(CombinedTable::from(records))
}
