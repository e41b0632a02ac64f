use arrow_array::builder::GenericStringBuilder;
use arrow_array::{Array, GenericStringArray, OffsetSizeTrait};
use arrow_schema::ArrowError;

use crate::{encode, EncodingMode};

/// Return the percent-encoded form of each element.
///
/// Null elements remain null, and the result has the same length as `base`.
/// Fails if the encoded values no longer fit the offsets of `O`, which can
/// happen since encoding grows each non-ASCII byte threefold.
pub fn url_encode<O: OffsetSizeTrait>(
    base: &GenericStringArray<O>,
    mode: EncodingMode,
) -> Result<GenericStringArray<O>, ArrowError> {
    let mut builder = GenericStringBuilder::<O>::with_capacity(base.len(), base.value_data().len());
    let mut value_bytes = 0usize;
    for value in base.iter() {
        match value {
            Some(value) => {
                let encoded = encode(value, mode);
                value_bytes = value_bytes.saturating_add(encoded.len());
                check_offset::<O>(value_bytes)?;
                builder.append_value(encoded);
            }
            None => builder.append_null(),
        }
    }
    Ok(builder.finish())
}

/// Check that `value_bytes` can be addressed by an offset of type `O`.
fn check_offset<O: OffsetSizeTrait>(value_bytes: usize) -> Result<(), ArrowError> {
    let max = if O::IS_LARGE {
        i64::MAX as usize
    } else {
        i32::MAX as usize
    };
    if value_bytes > max {
        return Err(ArrowError::ComputeError(format!(
            "encoded strings need {value_bytes} bytes, above the offset limit of {max}"
        )));
    }
    Ok(())
}
