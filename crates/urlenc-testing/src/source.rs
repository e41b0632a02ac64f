use std::collections::VecDeque;

use urlenc_batch::{Batch, BatchSource, Error};

/// A source yielding a fixed list of batches in order.
#[derive(Debug, Default)]
pub struct VecSource {
    batches: VecDeque<Batch>,
}

impl VecSource {
    pub fn new(batches: Vec<Batch>) -> Self {
        Self {
            batches: batches.into(),
        }
    }
}

impl BatchSource for VecSource {
    fn next_batch(&mut self) -> error_stack::Result<Option<Batch>, Error> {
        Ok(self.batches.pop_front())
    }
}
