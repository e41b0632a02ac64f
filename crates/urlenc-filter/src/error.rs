use arrow_schema::DataType;

#[derive(derive_more::Display, Debug)]
pub enum Error {
    #[display(fmt = "invalid url_encode configuration")]
    InvalidConfig,
    #[display(fmt = "column '{name}' does not exist in the input schema")]
    ColumnNotFound { name: String },
    #[display(fmt = "column '{name}' must be a string to be encoded, but was {actual}")]
    TypeMismatch { name: String, actual: DataType },
    #[display(fmt = "column name '{name}' appears more than once in the input schema")]
    DuplicateColumn { name: String },
    #[display(fmt = "batch does not match the schema of the url_encode task: {_0}")]
    SchemaMismatch(String),
    #[display(fmt = "encoded values of column {index} do not fit its string type")]
    EncodedTooLarge { index: usize },
    #[display(fmt = "input already finished")]
    InputFinished,
    #[display(fmt = "input already closed")]
    InputClosed,
    #[display(fmt = "failed in downstream sink")]
    Downstream,
}

impl error_stack::Context for Error {}

impl Error {
    /// Return true for errors detected while resolving the configuration.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidConfig
                | Error::ColumnNotFound { .. }
                | Error::TypeMismatch { .. }
                | Error::DuplicateColumn { .. }
        )
    }
}
