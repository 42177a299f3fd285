/// A successful call: the decoded resource plus the raw bodies on the wire.
#[derive(Debug, Clone)]
pub struct Exchange<T> {
    pub resource: T,
    /// `None` for calls without a request body.
    pub request: Option<String>,
    pub response: String,
}
