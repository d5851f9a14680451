use crate::shared::Result;

/// One archive entry whose content was read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Entry path inside the archive, with `/` separators
    pub path: String,
    /// Decompressed entry content
    pub bytes: Vec<u8>,
}

/// ArchiveReader port for enumerating archive contents without
/// extracting the archive to disk.
///
/// The caller supplies a predicate over entry paths; only matching
/// entries have their bytes decompressed and returned. Implementations
/// enforce a per-entry decompressed size cap, so a crafted archive
/// cannot expand into unbounded memory.
pub trait ArchiveReader {
    /// Read every entry whose path the predicate accepts.
    ///
    /// Entries that fail to decompress are skipped with their paths
    /// recorded in the second return value; a failure to walk the
    /// archive structure itself is an error.
    fn read_matching(
        &mut self,
        wanted: &dyn Fn(&str) -> bool,
    ) -> Result<(Vec<ArchiveEntry>, Vec<String>)>;
}
