use arrow_schema::SchemaRef;
use urlenc_kernels::EncodingMode;

use crate::schema::{resolve_schema, TargetColumns};
use crate::{Error, UrlEncodeConfig};

/// Immutable state of one url_encode run, produced once during setup.
///
/// The host hands the task back when opening the output for each partition,
/// so it may be cloned or serialized and shipped to workers.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UrlEncodeTask {
    /// Schema of both the input and the output batches.
    schema: SchemaRef,
    targets: TargetColumns,
    mode: EncodingMode,
}

impl UrlEncodeTask {
    /// Resolve `config` against `input_schema`.
    pub fn try_new(
        config: &UrlEncodeConfig,
        input_schema: &SchemaRef,
    ) -> error_stack::Result<Self, Error> {
        let resolved = resolve_schema(input_schema, &config.target_columns())?;
        Ok(Self {
            schema: resolved.output_schema,
            targets: resolved.targets,
            mode: config.mode(),
        })
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    pub fn targets(&self) -> &TargetColumns {
        &self.targets
    }

    pub fn mode(&self) -> EncodingMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow_schema::{DataType, Field, Schema};

    use super::*;

    fn schema() -> SchemaRef {
        Arc::new(Schema::new(vec![
            Field::new("url", DataType::Utf8, true),
            Field::new("count", DataType::UInt32, true),
        ]))
    }

    #[test]
    fn test_default_config_targets_url() {
        let task = UrlEncodeTask::try_new(&UrlEncodeConfig::default(), &schema()).unwrap();
        assert_eq!(task.targets().iter().collect::<Vec<_>>(), vec![0]);
        assert_eq!(task.mode(), EncodingMode::Full);
        assert_eq!(task.schema(), &schema());
    }

    #[test]
    fn test_mode_from_config() {
        let config = UrlEncodeConfig::default().with_only_non_ascii(true);
        let task = UrlEncodeTask::try_new(&config, &schema()).unwrap();
        assert_eq!(task.mode(), EncodingMode::NonAsciiOnly);
    }

    #[test]
    fn test_default_column_missing() {
        let schema = Arc::new(Schema::new(vec![Field::new("link", DataType::Utf8, true)]));
        let error = UrlEncodeTask::try_new(&UrlEncodeConfig::default(), &schema).unwrap_err();
        assert!(matches!(
            error.current_context(),
            Error::ColumnNotFound { name } if name == "url"
        ));
    }

    #[test]
    fn test_task_serde() {
        let task = UrlEncodeTask::try_new(&UrlEncodeConfig::default(), &schema()).unwrap();
        let yaml = serde_yaml::to_string(&task).unwrap();
        let restored: UrlEncodeTask = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(restored, task);
    }
}
