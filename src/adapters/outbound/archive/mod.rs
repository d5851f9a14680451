/// Archive adapters - ZIP-family and tarball implementations of the
/// ArchiveReader port
pub mod tar_reader;
pub mod zip_reader;

pub use tar_reader::TarArchiveReader;
pub use zip_reader::ZipArchiveReader;

use crate::ports::outbound::ArchiveReader;
use crate::shared::error::NoticeError;
use crate::shared::security::{validate_file_size, validate_regular_file, MAX_ARCHIVE_SIZE};
use crate::shared::Result;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Open an archive and pick the reader for its format.
///
/// The format comes from the leading magic bytes (ZIP local-file or
/// empty-archive signature, gzip magic) with a `.tar`/ustar fallback
/// for uncompressed tarballs, so a mislabelled extension cannot route
/// a file to the wrong decoder.
pub fn open_archive(path: &Path) -> Result<Box<dyn ArchiveReader>> {
    validate_regular_file(path, "archive")?;
    let metadata = std::fs::metadata(path).map_err(|e| NoticeError::ArchiveUnreadable {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;
    validate_file_size(metadata.len(), path, MAX_ARCHIVE_SIZE)?;

    let mut head = [0u8; 4];
    let read = File::open(path)
        .and_then(|mut f| f.read(&mut head))
        .map_err(|e| NoticeError::ArchiveUnreadable {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

    if read >= 4 && (head.starts_with(b"PK\x03\x04") || head.starts_with(b"PK\x05\x06")) {
        return Ok(Box::new(ZipArchiveReader::open(path)?));
    }
    if read >= 2 && head.starts_with(b"\x1f\x8b") {
        return Ok(Box::new(TarArchiveReader::open(path, true)?));
    }
    if is_plain_tar(path, metadata.len()) {
        return Ok(Box::new(TarArchiveReader::open(path, false)?));
    }

    Err(NoticeError::ArchiveUnreadable {
        path: path.to_path_buf(),
        details: "Unrecognized archive format".to_string(),
    }
    .into())
}

/// Plain tar has no leading magic; check the ustar tag at offset 257,
/// accepting a bare `.tar` extension for pre-POSIX archives.
fn is_plain_tar(path: &Path, size: u64) -> bool {
    if size >= 262 {
        let mut tag = [0u8; 5];
        let ok = File::open(path)
            .and_then(|mut f| {
                use std::io::Seek;
                f.seek(std::io::SeekFrom::Start(257))?;
                f.read_exact(&mut tag)
            })
            .is_ok();
        if ok && &tag == b"ustar" {
            return true;
        }
    }
    path.extension().is_some_and(|e| e.eq_ignore_ascii_case("tar"))
}
