use std::sync::Arc;

use arrow_array::cast::AsArray;
use arrow_array::ArrayRef;
use arrow_schema::DataType;
use error_stack::{IntoReport, ResultExt};
use urlenc_batch::Batch;
use urlenc_kernels::{url_encode, EncodingMode};

use crate::schema::{is_string_type, TargetColumns};
use crate::{Error, UrlEncodeTask};

/// Transform replacing the target columns of a batch with their encoded form.
///
/// Non-target columns are carried over as the same arrays, so rows, columns
/// and nulls of the output line up exactly with the input.
#[derive(Debug)]
pub struct UrlEncode {
    task: UrlEncodeTask,
}

impl UrlEncode {
    pub fn try_new(task: UrlEncodeTask) -> error_stack::Result<Self, Error> {
        error_stack::ensure!(
            targets_are_strings(task.targets(), task.schema()),
            Error::SchemaMismatch("task targets a column that is not a string".to_owned())
        );
        Ok(Self { task })
    }

    pub fn task(&self) -> &UrlEncodeTask {
        &self.task
    }

    /// Apply the transform to the given input batch.
    pub fn apply(&self, batch: Batch) -> error_stack::Result<Batch, Error> {
        self.check_schema(&batch)?;

        let targets = self.task.targets();
        if batch.is_empty() || targets.is_empty() {
            return Ok(batch);
        }

        let columns = batch
            .columns()
            .iter()
            .enumerate()
            .map(|(index, column)| {
                if targets.contains(index) {
                    encode_column(index, column, self.task.mode())
                } else {
                    Ok(column.clone())
                }
            })
            .collect::<error_stack::Result<Vec<_>, Error>>()?;

        batch
            .with_columns(columns)
            .change_context(Error::SchemaMismatch(
                "encoded columns rejected by batch".to_owned(),
            ))
    }

    /// Check that the batch has the column layout the task was resolved for.
    fn check_schema(&self, batch: &Batch) -> error_stack::Result<(), Error> {
        let expected = self.task.schema().fields();
        error_stack::ensure!(
            batch.num_columns() == expected.len(),
            Error::SchemaMismatch(format!(
                "expected {} columns but batch has {}",
                expected.len(),
                batch.num_columns()
            ))
        );

        for (index, (field, column)) in expected.iter().zip(batch.columns()).enumerate() {
            error_stack::ensure!(
                field.data_type() == column.data_type(),
                Error::SchemaMismatch(format!(
                    "column {index} ('{}') expected {} but was {}",
                    field.name(),
                    field.data_type(),
                    column.data_type()
                ))
            );
        }
        Ok(())
    }
}

fn encode_column(
    index: usize,
    column: &ArrayRef,
    mode: EncodingMode,
) -> error_stack::Result<ArrayRef, Error> {
    let encoded: ArrayRef = match column.data_type() {
        DataType::Utf8 => Arc::new(
            url_encode(column.as_string::<i32>(), mode)
                .into_report()
                .change_context(Error::EncodedTooLarge { index })?,
        ),
        DataType::LargeUtf8 => Arc::new(
            url_encode(column.as_string::<i64>(), mode)
                .into_report()
                .change_context(Error::EncodedTooLarge { index })?,
        ),
        other => {
            error_stack::bail!(Error::SchemaMismatch(format!(
                "target column {index} must be a string column but was {other}"
            )))
        }
    };
    debug_assert_eq!(encoded.len(), column.len());
    Ok(encoded)
}

/// Return true if `targets` only refers to string columns of `schema`.
fn targets_are_strings(targets: &TargetColumns, schema: &arrow_schema::Schema) -> bool {
    targets.iter().all(|index| {
        schema
            .fields()
            .get(index)
            .map_or(false, |field| is_string_type(field.data_type()))
    })
}
