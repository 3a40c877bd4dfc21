use bytes::Bytes;
use mime::Mime;

/// A file received as part of a request, already buffered in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    client_filename: Option<String>,
    media_type: Option<Mime>,
    content: Bytes,
}

impl UploadedFile {
    pub fn new(content: impl Into<Bytes>) -> Self {
        Self { client_filename: None, media_type: None, content: content.into() }
    }

    #[must_use]
    pub fn with_client_filename(mut self, filename: impl Into<String>) -> Self {
        self.client_filename = Some(filename.into());
        self
    }

    #[must_use]
    pub fn with_media_type(mut self, media_type: Mime) -> Self {
        self.media_type = Some(media_type);
        self
    }

    /// The file name sent by the client. Never trust it as a path.
    pub fn client_filename(&self) -> Option<&str> {
        self.client_filename.as_deref()
    }

    pub fn media_type(&self) -> Option<&Mime> {
        self.media_type.as_ref()
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}
