use crate::ports::outbound::{ArchiveEntry, ArchiveReader};
use crate::shared::error::NoticeError;
use crate::shared::security::MAX_ENTRY_SIZE;
use crate::shared::Result;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// ZipArchiveReader adapter for the ZIP family
/// (.zip, .jar, .war, .whl)
///
/// This adapter implements the ArchiveReader port over the central
/// directory, so only entries the predicate selects are decompressed.
pub struct ZipArchiveReader {
    path: PathBuf,
    archive: ZipArchive<File>,
}

impl ZipArchiveReader {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| NoticeError::ArchiveUnreadable {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;
        let archive = ZipArchive::new(file).map_err(|e| NoticeError::ArchiveUnreadable {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            archive,
        })
    }
}

impl ArchiveReader for ZipArchiveReader {
    fn read_matching(
        &mut self,
        wanted: &dyn Fn(&str) -> bool,
    ) -> Result<(Vec<ArchiveEntry>, Vec<String>)> {
        let mut entries = Vec::new();
        let mut unreadable = Vec::new();

        for index in 0..self.archive.len() {
            let name = match self.archive.name_for_index(index) {
                Some(name) => name.to_string(),
                None => continue,
            };
            if !wanted(&name) {
                continue;
            }

            let mut entry = match self.archive.by_index(index) {
                Ok(entry) => entry,
                Err(_) => {
                    unreadable.push(name);
                    continue;
                }
            };
            if !entry.is_file() {
                continue;
            }
            if entry.size() > MAX_ENTRY_SIZE {
                unreadable.push(name);
                continue;
            }

            // take() caps what a lying size field can expand into
            let mut bytes = Vec::with_capacity(entry.size() as usize);
            match entry
                .by_ref()
                .take(MAX_ENTRY_SIZE + 1)
                .read_to_end(&mut bytes)
            {
                Ok(_) if bytes.len() as u64 <= MAX_ENTRY_SIZE => {
                    entries.push(ArchiveEntry { path: name, bytes });
                }
                _ => unreadable.push(name),
            }
        }

        if entries.is_empty() && !unreadable.is_empty() && unreadable.len() == self.archive.len() {
            return Err(NoticeError::ArchiveUnreadable {
                path: self.path.clone(),
                details: "No entry in the archive could be decompressed".to_string(),
            }
            .into());
        }

        Ok((entries, unreadable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
        let file = File::create(path).unwrap();
        let mut writer = ZipWriter::new(file);
        for (name, content) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(content).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn test_reads_only_matching_entries() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.whl");
        write_zip(
            &path,
            &[
                ("app-1.0.dist-info/METADATA", b"Name: app\nVersion: 1.0\n"),
                ("app/main.py", b"print('hi')\n"),
            ],
        );

        let mut reader = ZipArchiveReader::open(&path).unwrap();
        let (entries, unreadable) = reader
            .read_matching(&|name| name.ends_with("METADATA"))
            .unwrap();

        assert!(unreadable.is_empty());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, "app-1.0.dist-info/METADATA");
        assert!(entries[0].bytes.starts_with(b"Name: app"));
    }

    #[test]
    fn test_no_matches_is_empty_not_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("src.zip");
        write_zip(&path, &[("readme.md", b"hello")]);

        let mut reader = ZipArchiveReader::open(&path).unwrap();
        let (entries, unreadable) = reader.read_matching(&|_| false).unwrap();
        assert!(entries.is_empty());
        assert!(unreadable.is_empty());
    }

    #[test]
    fn test_open_rejects_non_zip_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fake.zip");
        std::fs::write(&path, b"this is not a zip file").unwrap();

        let result = ZipArchiveReader::open(&path);
        assert!(result.is_err());
        assert!(format!("{}", result.err().unwrap()).contains("Failed to open archive"));
    }
}
