use arrow_schema::SchemaRef;
use urlenc_batch::BatchSink;

use crate::output::UrlEncodeOutput;
use crate::transform::UrlEncode;
use crate::{Error, UrlEncodeConfig, UrlEncodeTask};

/// Entry points used by the host pipeline to run the url_encode filter.
///
/// Setup happens once per run through [UrlEncodeFilter::transaction] (or
/// [UrlEncodeFilter::setup]); the resulting task is then used to open one
/// output per partition with [UrlEncodeFilter::open].
pub struct UrlEncodeFilter;

impl UrlEncodeFilter {
    /// Resolve the configuration against the input schema.
    ///
    /// Returns the output schema (identical to the input schema) and the task
    /// describing the run.
    pub fn setup(
        config: &UrlEncodeConfig,
        input_schema: &SchemaRef,
    ) -> error_stack::Result<(SchemaRef, UrlEncodeTask), Error> {
        let task = UrlEncodeTask::try_new(config, input_schema)?;
        Ok((task.schema().clone(), task))
    }

    /// Run setup and hand the task and output schema to `control`.
    ///
    /// Configuration errors are reported before `control` is invoked.
    pub fn transaction<T>(
        config: &UrlEncodeConfig,
        input_schema: &SchemaRef,
        control: impl FnOnce(UrlEncodeTask, SchemaRef) -> T,
    ) -> error_stack::Result<T, Error> {
        let (output_schema, task) = Self::setup(config, input_schema)?;
        tracing::info!(
            "Starting url_encode on {} column(s) with mode {}",
            task.targets().len(),
            task.mode()
        );
        Ok(control(task, output_schema))
    }

    /// Open an output that encodes batches and forwards them to `downstream`.
    pub fn open<S: BatchSink>(
        task: UrlEncodeTask,
        downstream: S,
    ) -> error_stack::Result<UrlEncodeOutput<S>, Error> {
        let transform = UrlEncode::try_new(task)?;
        Ok(UrlEncodeOutput::new(transform, downstream))
    }
}
