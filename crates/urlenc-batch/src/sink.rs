use crate::{Batch, Error};

/// A pull-based stream of batches delivered by the host.
pub trait BatchSource {
    /// Return the next batch, or `None` once the stream is exhausted.
    fn next_batch(&mut self) -> error_stack::Result<Option<Batch>, Error>;
}

/// A push-based receiver of batches.
///
/// Batches are added in stream order. Once the producer has added every
/// batch it calls [BatchSink::finish]; afterwards (or instead, when the run
/// is abandoned) it calls [BatchSink::close] to release resources. Each
/// lifecycle call is made at most once.
pub trait BatchSink: std::fmt::Debug {
    /// Accept the next batch of the stream.
    fn add(&mut self, batch: Batch) -> error_stack::Result<(), Error>;

    /// Signal that no more batches will be added.
    fn finish(&mut self) -> error_stack::Result<(), Error>;

    /// Release any resources held by the sink.
    fn close(&mut self) -> error_stack::Result<(), Error>;
}

impl<T: BatchSink + ?Sized> BatchSink for &mut T {
    fn add(&mut self, batch: Batch) -> error_stack::Result<(), Error> {
        (**self).add(batch)
    }

    fn finish(&mut self) -> error_stack::Result<(), Error> {
        (**self).finish()
    }

    fn close(&mut self) -> error_stack::Result<(), Error> {
        (**self).close()
    }
}

impl<T: BatchSink + ?Sized> BatchSink for Box<T> {
    fn add(&mut self, batch: Batch) -> error_stack::Result<(), Error> {
        (**self).add(batch)
    }

    fn finish(&mut self) -> error_stack::Result<(), Error> {
        (**self).finish()
    }

    fn close(&mut self) -> error_stack::Result<(), Error> {
        (**self).close()
    }
}

/// Move every batch from `source` into `sink`, then finish and close the sink.
///
/// If reading or adding fails, the sink is still closed and the original
/// error is returned. Returns the number of batches moved.
pub fn drive<Src, Snk>(source: &mut Src, sink: &mut Snk) -> error_stack::Result<usize, Error>
where
    Src: BatchSource + ?Sized,
    Snk: BatchSink + ?Sized,
{
    match pump(source, sink) {
        Ok(batches) => {
            sink.close()?;
            tracing::debug!("Moved {batches} batches to sink");
            Ok(batches)
        }
        Err(error) => {
            if let Err(close_error) = sink.close() {
                tracing::warn!("Failed to close sink after error: {close_error:?}");
            }
            Err(error)
        }
    }
}

fn pump<Src, Snk>(source: &mut Src, sink: &mut Snk) -> error_stack::Result<usize, Error>
where
    Src: BatchSource + ?Sized,
    Snk: BatchSink + ?Sized,
{
    let mut batches = 0;
    while let Some(batch) = source.next_batch()? {
        sink.add(batch)?;
        batches += 1;
    }
    sink.finish()?;
    Ok(batches)
}
