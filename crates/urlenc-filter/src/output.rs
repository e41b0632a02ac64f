use error_stack::ResultExt;
use urlenc_batch::{Batch, BatchSink};

use crate::transform::UrlEncode;
use crate::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Open,
    Finished,
    Closed,
}

/// Sink applying [UrlEncode] to each added batch and forwarding the result.
///
/// Each batch is encoded and pushed downstream before `add` returns. The
/// `finish` and `close` signals are forwarded exactly once, in order, after
/// every preceding batch. Calls that arrive after the corresponding signal
/// fail without reaching the downstream sink.
#[derive(Debug)]
pub struct UrlEncodeOutput<S> {
    transform: UrlEncode,
    downstream: S,
    state: State,
    batches: usize,
    rows: usize,
}

impl<S: BatchSink> UrlEncodeOutput<S> {
    pub(crate) fn new(transform: UrlEncode, downstream: S) -> Self {
        Self {
            transform,
            downstream,
            state: State::Open,
            batches: 0,
            rows: 0,
        }
    }

    pub fn downstream(&self) -> &S {
        &self.downstream
    }

    pub fn into_downstream(self) -> S {
        self.downstream
    }

    /// Encode `batch` and forward it downstream.
    pub fn add_batch(&mut self, batch: Batch) -> error_stack::Result<(), Error> {
        self.ensure_open()?;

        let num_rows = batch.num_rows();
        tracing::trace!("Encoding batch {} with {num_rows} rows", self.batches);

        let batch = self.transform.apply(batch)?;
        self.downstream
            .add(batch)
            .change_context(Error::Downstream)?;

        self.batches += 1;
        self.rows += num_rows;
        Ok(())
    }

    /// Forward the end of the batch stream downstream.
    pub fn finish_input(&mut self) -> error_stack::Result<(), Error> {
        self.ensure_open()?;
        self.state = State::Finished;

        tracing::info!(
            "Finished url_encode output after {} batches ({} rows)",
            self.batches,
            self.rows
        );
        self.downstream.finish().change_context(Error::Downstream)
    }

    /// Forward the release of resources downstream.
    ///
    /// Allowed without a preceding [Self::finish_input] when the run is
    /// abandoned.
    pub fn close_input(&mut self) -> error_stack::Result<(), Error> {
        error_stack::ensure!(self.state != State::Closed, Error::InputClosed);
        if self.state == State::Open {
            tracing::info!(
                "Closing url_encode output before finish after {} batches",
                self.batches
            );
        }
        self.state = State::Closed;

        self.downstream.close().change_context(Error::Downstream)
    }

    fn ensure_open(&self) -> error_stack::Result<(), Error> {
        match self.state {
            State::Open => Ok(()),
            State::Finished => error_stack::bail!(Error::InputFinished),
            State::Closed => error_stack::bail!(Error::InputClosed),
        }
    }
}

impl<S: BatchSink> BatchSink for UrlEncodeOutput<S> {
    fn add(&mut self, batch: Batch) -> error_stack::Result<(), urlenc_batch::Error> {
        self.add_batch(batch)
            .change_context(urlenc_batch::Error::Sink)
    }

    fn finish(&mut self) -> error_stack::Result<(), urlenc_batch::Error> {
        self.finish_input()
            .change_context(urlenc_batch::Error::Sink)
    }

    fn close(&mut self) -> error_stack::Result<(), urlenc_batch::Error> {
        self.close_input()
            .change_context(urlenc_batch::Error::Sink)
    }
}
