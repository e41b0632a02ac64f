use arrow_schema::{DataType, Schema, SchemaRef};
use itertools::Itertools;

use crate::{Error, DEFAULT_COLUMN};

/// A read-only view of one column of a schema.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnSpec<'a> {
    pub name: &'a str,
    pub data_type: &'a DataType,
    pub index: usize,
}

impl<'a> ColumnSpec<'a> {
    /// Return the columns of `schema` in order.
    pub fn all(schema: &'a Schema) -> impl Iterator<Item = ColumnSpec<'a>> + 'a {
        schema
            .fields()
            .iter()
            .enumerate()
            .map(|(index, field)| ColumnSpec {
                name: field.name(),
                data_type: field.data_type(),
                index,
            })
    }

    pub fn is_string(&self) -> bool {
        is_string_type(self.data_type)
    }
}

pub(crate) fn is_string_type(data_type: &DataType) -> bool {
    matches!(data_type, DataType::Utf8 | DataType::LargeUtf8)
}

/// The sorted, de-duplicated indices of the columns to encode.
///
/// Every index refers to a string column of the schema it was resolved
/// against. Deserialized lists are sorted and de-duplicated as well.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "Vec<usize>")]
pub struct TargetColumns(Vec<usize>);

impl TargetColumns {
    pub fn contains(&self, index: usize) -> bool {
        self.0.binary_search(&index).is_ok()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<usize> for TargetColumns {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        Self(iter.into_iter().sorted().dedup().collect())
    }
}

impl From<Vec<usize>> for TargetColumns {
    fn from(indices: Vec<usize>) -> Self {
        indices.into_iter().collect()
    }
}

/// The result of resolving the configured columns against an input schema.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedSchema {
    /// The schema of the filter output. Always the input schema.
    pub output_schema: SchemaRef,
    pub targets: TargetColumns,
}

/// Resolve the columns named in `target_column_names` against `input_schema`.
///
/// Fails with [Error::ColumnNotFound] if a name is absent and with
/// [Error::TypeMismatch] if the named column is not a string column. An
/// empty list resolves [DEFAULT_COLUMN]. The output schema is the input
/// schema, unchanged.
pub fn resolve_schema(
    input_schema: &SchemaRef,
    target_column_names: &[&str],
) -> error_stack::Result<ResolvedSchema, Error> {
    let target_column_names: &[&str] = if target_column_names.is_empty() {
        &[DEFAULT_COLUMN]
    } else {
        target_column_names
    };

    if let Some(name) = input_schema
        .fields()
        .iter()
        .map(|field| field.name())
        .duplicates()
        .next()
    {
        error_stack::bail!(Error::DuplicateColumn { name: name.clone() });
    }

    let targets = target_column_names
        .iter()
        .map(|name| {
            let column = ColumnSpec::all(input_schema)
                .find(|column| column.name == *name)
                .ok_or_else(|| {
                    error_stack::report!(Error::ColumnNotFound {
                        name: (*name).to_owned(),
                    })
                })?;
            error_stack::ensure!(
                column.is_string(),
                Error::TypeMismatch {
                    name: (*name).to_owned(),
                    actual: column.data_type.clone(),
                }
            );
            Ok(column.index)
        })
        .collect::<error_stack::Result<TargetColumns, Error>>()?;

    tracing::debug!(
        "Resolved url_encode columns [{}] to indices [{}]",
        target_column_names.iter().format(", "),
        targets.iter().format(", ")
    );

    Ok(ResolvedSchema {
        output_schema: input_schema.clone(),
        targets,
    })
}
