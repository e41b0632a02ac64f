use std::sync::Arc;

use arrow_array::{ArrayRef, RecordBatch, StringArray};
use arrow_schema::{Field, Schema};
use urlenc_batch::Batch;

/// Create a batch with a single nullable string column.
pub fn batch_from_strings(name: &str, values: Vec<Option<&str>>) -> Batch {
    batch_from_columns(vec![(name, Arc::new(StringArray::from(values)) as ArrayRef)])
}

/// Create a batch from named columns. Every field is nullable.
///
/// Panics if the columns have different lengths.
pub fn batch_from_columns(columns: Vec<(&str, ArrayRef)>) -> Batch {
    let fields: Vec<_> = columns
        .iter()
        .map(|(name, column)| Field::new(*name, column.data_type().clone(), true))
        .collect();
    let schema = Arc::new(Schema::new(fields));
    let columns = columns.into_iter().map(|(_, column)| column).collect();
    Batch::new(RecordBatch::try_new(schema, columns).unwrap())
}
