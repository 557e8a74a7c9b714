use std::collections::HashSet;
use std::io::{Cursor, Write};

use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::Image;

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("duplicate archive entry {name:?}")]
    DuplicateEntry { name: String },
    #[error("zip write failed: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Serializes the image set into a single in-memory zip, one entry per
/// image, named by `Image::name`. Entries are stored uncompressed; image
/// payloads are already compressed formats.
pub fn build_archive(images: Vec<Image>) -> Result<Vec<u8>, ArchiveError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Stored);

    // The zip writer itself accepts colliding names, so the collision
    // check lives here.
    let mut seen = HashSet::new();
    for image in images {
        if !seen.insert(image.name.clone()) {
            return Err(ArchiveError::DuplicateEntry { name: image.name });
        }
        writer.start_file(image.name.as_str(), options)?;
        writer.write_all(&image.content)?;
    }

    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}
