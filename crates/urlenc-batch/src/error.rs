#[derive(derive_more::Display, Debug)]
pub enum Error {
    #[display(fmt = "internal error: {}", _0)]
    Internal(String),
    #[display(fmt = "failed in batch sink")]
    Sink,
}

impl error_stack::Context for Error {}

impl Error {
    pub fn internal_msg(msg: String) -> Self {
        Error::Internal(msg)
    }
}
