use arrow_array::{ArrayRef, RecordBatch};
use arrow_schema::SchemaRef;
use error_stack::{IntoReport, ResultExt};

use crate::Error;

/// A batch of rows moving through the pipeline.
///
/// Rows are the logical records of the stream; each column of the underlying
/// [RecordBatch] holds one value per row, and any value may be null
/// independent of its type.
#[derive(Clone, PartialEq, Debug)]
pub struct Batch {
    data: RecordBatch,
}

impl Batch {
    pub fn new(data: RecordBatch) -> Self {
        Self { data }
    }

    /// Create a batch with no rows for the given schema.
    pub fn new_empty(schema: SchemaRef) -> Self {
        Self {
            data: RecordBatch::new_empty(schema),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.num_rows() == 0
    }

    pub fn num_rows(&self) -> usize {
        self.data.num_rows()
    }

    pub fn num_columns(&self) -> usize {
        self.data.num_columns()
    }

    pub fn schema(&self) -> SchemaRef {
        self.data.schema()
    }

    pub fn column(&self, index: usize) -> Option<&ArrayRef> {
        self.data.columns().get(index)
    }

    pub fn columns(&self) -> &[ArrayRef] {
        self.data.columns()
    }

    pub fn data(&self) -> &RecordBatch {
        &self.data
    }

    pub fn into_record_batch(self) -> RecordBatch {
        self.data
    }

    /// Return a new `Batch` with the same schema and row count, but new columns.
    ///
    /// The columns must match the schema of this batch in number, order and
    /// type, and each must have the same length as this batch.
    pub fn with_columns(&self, columns: Vec<ArrayRef>) -> error_stack::Result<Self, Error> {
        error_stack::ensure!(
            columns.iter().all(|column| column.len() == self.num_rows()),
            Error::internal_msg(format!(
                "replacement columns must all have {} rows",
                self.num_rows()
            ))
        );

        let data = RecordBatch::try_new(self.data.schema(), columns)
            .into_report()
            .change_context_lazy(|| {
                Error::internal_msg("replacement columns do not match schema".to_owned())
            })?;
        Ok(Self { data })
    }
}

impl From<RecordBatch> for Batch {
    fn from(data: RecordBatch) -> Self {
        Self::new(data)
    }
}
