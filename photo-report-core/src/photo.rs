//! Photo entries and ingestion primitives
//!
//! A [`PhotoEntry`] is one ingested image: its identity within the session,
//! the original file name, the data-URL encoding of the file contents and a
//! freely editable caption. Entries are created by the session during
//! ingestion and only their caption is mutable afterwards.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::fmt;
use std::path::Path;

/// Maximum number of photos one report may hold.
pub const MAX_PHOTOS: usize = 50;

/// Maximum size of a single photo file: 10 MB.
pub const MAX_PHOTO_BYTES: u64 = 10 * 1024 * 1024;

/// Identity of a photo within one report session.
///
/// Ids are assigned monotonically starting at 1 and are never reused, even
/// after the photo is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhotoId(u32);

impl PhotoId {
    pub fn new(raw: u32) -> Self {
        PhotoId(raw)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One ingested image plus its caption and identity.
#[derive(Debug, Clone)]
pub struct PhotoEntry {
    id: PhotoId,
    name: String,
    image: String,
    caption: String,
}

impl PhotoEntry {
    pub(crate) fn new(id: PhotoId, name: String, image: String) -> Self {
        Self {
            id,
            name,
            image,
            caption: String::new(),
        }
    }

    pub fn id(&self) -> PhotoId {
        self.id
    }

    /// Original file name, informational only.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Data-URL encoding of the file contents.
    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub(crate) fn set_caption(&mut self, caption: &str) {
        caption.clone_into(&mut self.caption);
    }
}

/// Guess the image MIME type from a file extension.
///
/// Returns `None` for anything that is not an image type; such files are
/// skipped silently during ingestion. The accepted set matches what the
/// report renderer embeds: png, jpg/jpeg, webp and gif.
pub fn image_mime_for(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

/// Encode raw file contents as a `data:` URL suitable for embedding and
/// transmission.
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", BASE64.encode(bytes))
}
