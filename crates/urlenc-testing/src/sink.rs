use urlenc_batch::{Batch, BatchSink, Error};

/// A sink recording every batch and lifecycle call it receives.
///
/// Lifecycle calls are counted rather than rejected, so tests can check that
/// they were forwarded exactly once.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub batches: Vec<Batch>,
    pub finished: usize,
    pub closed: usize,
}

impl BatchSink for CollectingSink {
    fn add(&mut self, batch: Batch) -> error_stack::Result<(), Error> {
        self.batches.push(batch);
        Ok(())
    }

    fn finish(&mut self) -> error_stack::Result<(), Error> {
        self.finished += 1;
        Ok(())
    }

    fn close(&mut self) -> error_stack::Result<(), Error> {
        self.closed += 1;
        Ok(())
    }
}
