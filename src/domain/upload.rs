/// A file attached to one request. Lives only for the duration of that
/// request; the content is held fully in memory.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content: Vec<u8>,
}

impl UploadedFile {
    pub fn new(filename: String, content: Vec<u8>) -> Self {
        Self { filename, content }
    }
}
