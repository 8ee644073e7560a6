/// Video identifier and optional start time extracted from a shared link.
///
/// An empty `identifier` means the link was not recognized; callers treat it
/// as "cleaning failed" and pass the original text through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoReference {
    pub identifier: String,
    /// Start offset in seconds, digits only.
    pub timestamp: Option<String>,
}

impl VideoReference {
    pub fn new(identifier: impl Into<String>, timestamp: Option<String>) -> Self {
        Self {
            identifier: identifier.into(),
            timestamp,
        }
    }

    /// The reference produced when no identifier matched.
    pub fn unrecognized() -> Self {
        Self::default()
    }

    pub fn is_recognized(&self) -> bool {
        !self.identifier.is_empty()
    }
}
