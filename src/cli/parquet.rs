//! Parquet corpus loading for the CLI.
//!
//! The core pipeline only sees `(id, text)` pairs; this module is the thin
//! boundary that extracts them from a parquet file. Id columns may be any
//! of the common integer types, text columns `Utf8` or `LargeUtf8`.

use crate::error::{DedupError, Result};
use arrow::array::{
    Array, Int32Array, Int64Array, LargeStringArray, RecordBatch, StringArray, UInt32Array,
    UInt64Array,
};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ProjectionMask;
use std::fs::File;
use std::path::Path;

/// Read `(id, text)` pairs from the given columns of a parquet file.
pub fn read_documents(path: &Path, main_col: &str, idx_col: &str) -> Result<Vec<(u64, String)>> {
    let file = File::open(path).map_err(|e| DedupError::io(path, e))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| DedupError::input(format!("cannot open parquet {}: {e}", path.display())))?;

    let schema = builder.schema();
    let mut root_indices = Vec::new();
    for col in [main_col, idx_col] {
        match schema.index_of(col) {
            Ok(i) => root_indices.push(i),
            Err(_) => {
                return Err(DedupError::input(format!(
                    "missing column {col:?} in {}",
                    path.display()
                )))
            }
        }
    }

    let mask = ProjectionMask::roots(builder.parquet_schema(), root_indices);
    let reader = builder
        .with_projection(mask)
        .build()
        .map_err(|e| DedupError::input(format!("cannot read parquet {}: {e}", path.display())))?;

    let mut docs = Vec::new();
    for batch in reader {
        let batch =
            batch.map_err(|e| DedupError::input(format!("parquet batch read failed: {e}")))?;
        extend_from_batch(&mut docs, &batch, main_col, idx_col)?;
    }
    tracing::debug!(documents = docs.len(), path = %path.display(), "loaded parquet corpus");
    Ok(docs)
}

fn extend_from_batch(
    docs: &mut Vec<(u64, String)>,
    batch: &RecordBatch,
    main_col: &str,
    idx_col: &str,
) -> Result<()> {
    let ids = id_values(batch, idx_col)?;
    let texts = batch
        .column_by_name(main_col)
        .ok_or_else(|| DedupError::input(format!("missing column {main_col:?} in batch")))?;

    docs.reserve(batch.num_rows());
    if let Some(arr) = texts.as_any().downcast_ref::<StringArray>() {
        for (row, id) in ids.into_iter().enumerate() {
            let text = if arr.is_null(row) { "" } else { arr.value(row) };
            docs.push((id, text.to_string()));
        }
        Ok(())
    } else if let Some(arr) = texts.as_any().downcast_ref::<LargeStringArray>() {
        for (row, id) in ids.into_iter().enumerate() {
            let text = if arr.is_null(row) { "" } else { arr.value(row) };
            docs.push((id, text.to_string()));
        }
        Ok(())
    } else {
        Err(DedupError::input(format!(
            "column {main_col:?} has unsupported type {}; expected Utf8 or LargeUtf8",
            texts.data_type()
        )))
    }
}

fn id_values(batch: &RecordBatch, idx_col: &str) -> Result<Vec<u64>> {
    let array = batch
        .column_by_name(idx_col)
        .ok_or_else(|| DedupError::input(format!("missing column {idx_col:?} in batch")))?;
    if array.null_count() > 0 {
        return Err(DedupError::input(format!(
            "column {idx_col:?} contains null ids"
        )));
    }

    if let Some(arr) = array.as_any().downcast_ref::<UInt64Array>() {
        Ok((0..arr.len()).map(|i| arr.value(i)).collect())
    } else if let Some(arr) = array.as_any().downcast_ref::<UInt32Array>() {
        Ok((0..arr.len()).map(|i| u64::from(arr.value(i))).collect())
    } else if let Some(arr) = array.as_any().downcast_ref::<Int64Array>() {
        (0..arr.len())
            .map(|i| {
                u64::try_from(arr.value(i)).map_err(|_| {
                    DedupError::input(format!(
                        "column {idx_col:?} contains negative id {}",
                        arr.value(i)
                    ))
                })
            })
            .collect()
    } else if let Some(arr) = array.as_any().downcast_ref::<Int32Array>() {
        (0..arr.len())
            .map(|i| {
                u64::try_from(arr.value(i)).map_err(|_| {
                    DedupError::input(format!(
                        "column {idx_col:?} contains negative id {}",
                        arr.value(i)
                    ))
                })
            })
            .collect()
    } else {
        Err(DedupError::input(format!(
            "column {idx_col:?} has unsupported type {}; expected an integer type",
            array.data_type()
        )))
    }
}
