use crate::ports::outbound::{ArchiveEntry, ArchiveReader};
use crate::shared::error::NoticeError;
use crate::shared::security::MAX_ENTRY_SIZE;
use crate::shared::Result;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tar::Archive;

/// TarArchiveReader adapter for tarballs (.tar, .tar.gz, .tgz)
///
/// This adapter implements the ArchiveReader port over a streaming tar
/// walk; tar has no central directory, so every header is visited but
/// only entries the predicate selects are read into memory.
pub struct TarArchiveReader {
    path: PathBuf,
    gzipped: bool,
}

impl TarArchiveReader {
    pub fn open(path: &Path, gzipped: bool) -> Result<Self> {
        // Streaming consumes the reader, so the file is reopened per
        // read_matching call rather than held here.
        if !path.is_file() {
            return Err(NoticeError::ArchiveUnreadable {
                path: path.to_path_buf(),
                details: "Not a regular file".to_string(),
            }
            .into());
        }
        Ok(Self {
            path: path.to_path_buf(),
            gzipped,
        })
    }

    fn reader(&self) -> Result<Box<dyn Read>> {
        let file = File::open(&self.path).map_err(|e| NoticeError::ArchiveUnreadable {
            path: self.path.clone(),
            details: e.to_string(),
        })?;
        if self.gzipped {
            Ok(Box::new(GzDecoder::new(file)))
        } else {
            Ok(Box::new(file))
        }
    }
}

impl ArchiveReader for TarArchiveReader {
    fn read_matching(
        &mut self,
        wanted: &dyn Fn(&str) -> bool,
    ) -> Result<(Vec<ArchiveEntry>, Vec<String>)> {
        let mut archive = Archive::new(self.reader()?);
        let mut entries = Vec::new();
        let mut unreadable = Vec::new();

        let iter = archive
            .entries()
            .map_err(|e| NoticeError::ArchiveUnreadable {
                path: self.path.clone(),
                details: e.to_string(),
            })?;

        for entry in iter {
            let mut entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    // A broken header means the rest of the stream
                    // cannot be located either
                    return Err(NoticeError::ArchiveUnreadable {
                        path: self.path.clone(),
                        details: e.to_string(),
                    }
                    .into());
                }
            };

            let name = match entry.path() {
                Ok(path) => path.to_string_lossy().replace('\\', "/"),
                Err(_) => {
                    unreadable.push("<unparsable entry path>".to_string());
                    continue;
                }
            };
            if !wanted(&name) {
                continue;
            }
            if !entry.header().entry_type().is_file() {
                continue;
            }
            if entry.size() > MAX_ENTRY_SIZE {
                unreadable.push(name);
                continue;
            }

            let mut bytes = Vec::with_capacity(entry.size() as usize);
            match entry.by_ref().take(MAX_ENTRY_SIZE + 1).read_to_end(&mut bytes) {
                Ok(_) if bytes.len() as u64 <= MAX_ENTRY_SIZE => {
                    entries.push(ArchiveEntry { path: name, bytes });
                }
                _ => unreadable.push(name),
            }
        }

        Ok((entries, unreadable))
    }
}
