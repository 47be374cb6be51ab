use encoding_rs::Encoding;

/// What the readers do with a record whose sequence and quality lengths differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Log the malformed record and continue with the next one.
    Skip,
    /// Yield the mismatch to the caller (strict).
    Return,
}

#[derive(Debug, Clone)]
pub struct ReaderOptions {
    pub error_policy: ErrorPolicy,
    /// Text encoding of byte input. A byte-order mark overrides it.
    pub encoding: &'static Encoding,
}

impl ReaderOptions {
    pub fn with_error_policy(mut self, error_policy: ErrorPolicy) -> Self {
        self.error_policy = error_policy;
        self
    }

    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            error_policy: ErrorPolicy::Skip,
            encoding: encoding_rs::UTF_8,
        }
    }
}
