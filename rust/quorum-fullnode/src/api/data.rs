use anyhow::Result;

/// A helper to express the serialization of query parameters to some
/// consistent result type
pub trait AsQuery {
    /// Get the value of this trait implementor as a [Result<Option<String>>]
    fn as_query(&self) -> Result<Option<String>>;
}

impl AsQuery for () {
    fn as_query(&self) -> Result<Option<String>> {
        Ok(None)
    }
}
