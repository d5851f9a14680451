use crate::shared::error::NoticeError;
use crate::shared::security::{validate_file_size, validate_regular_file, MAX_MANIFEST_SIZE};
use crate::shared::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Archive suffixes the classifier routes to archive mode.
const ARCHIVE_SUFFIXES: &[&str] = &[".jar", ".war", ".whl", ".zip", ".tar", ".gz", ".tgz"];

/// What kind of input the pipeline was pointed at.
///
/// Classification happens once, up front; everything downstream
/// dispatches on this descriptor instead of re-probing the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputDescriptor {
    /// A source tree to walk for manifest files
    Directory { path: PathBuf, recursive: bool },
    /// A package archive to scan without extracting
    Archive { path: PathBuf },
    /// A file with one package identifier per line
    IdentifierList { path: PathBuf },
    /// A single pkg: identifier
    Identifier { value: String },
}

impl InputDescriptor {
    /// Classify a raw input argument.
    ///
    /// Routing order: a `pkg:` string that is not an existing path is a
    /// single identifier; an existing directory is a tree scan; an
    /// existing file routes on its suffix (archive extensions, then
    /// `.txt`/`.list`), and any other file is sniffed - content
    /// starting with `pkg:` is a single identifier, anything else is
    /// treated as an identifier list.
    ///
    /// # Errors
    /// `InputNotFound` if the argument is a nonexistent path,
    /// `UnsupportedInput` if the path is neither a directory nor a
    /// regular file.
    pub fn classify(input: &str, recursive: bool) -> Result<Self> {
        let path = Path::new(input);

        if !path.exists() {
            if input.starts_with("pkg:") {
                return Ok(InputDescriptor::Identifier {
                    value: input.to_string(),
                });
            }
            return Err(NoticeError::InputNotFound {
                path: path.to_path_buf(),
                suggestion: "Pass a project directory, a package archive, an identifier list file, or a pkg: identifier".to_string(),
            }
            .into());
        }

        if path.is_dir() {
            return Ok(InputDescriptor::Directory {
                path: path.to_path_buf(),
                recursive,
            });
        }

        if !path.is_file() {
            return Err(NoticeError::UnsupportedInput {
                path: path.to_path_buf(),
                reason: "Not a regular file or directory".to_string(),
            }
            .into());
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if ARCHIVE_SUFFIXES.iter().any(|s| file_name.ends_with(s)) {
            return Ok(InputDescriptor::Archive {
                path: path.to_path_buf(),
            });
        }

        if file_name.ends_with(".txt") || file_name.ends_with(".list") {
            return Ok(InputDescriptor::IdentifierList {
                path: path.to_path_buf(),
            });
        }

        // Unrecognized suffix: sniff the content. A file holding one
        // pkg: identifier is processed as that identifier; anything
        // else gets a chance as an identifier list.
        validate_regular_file(path, "input file")?;
        let metadata = fs::symlink_metadata(path)
            .map_err(|e| anyhow::anyhow!("Failed to read input metadata: {}", e))?;
        validate_file_size(metadata.len(), path, MAX_MANIFEST_SIZE)?;
        let content = fs::read_to_string(path).map_err(|e| NoticeError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

        if content.trim_start().starts_with("pkg:") && content.trim().lines().count() == 1 {
            Ok(InputDescriptor::Identifier {
                value: content.trim().to_string(),
            })
        } else {
            Ok(InputDescriptor::IdentifierList {
                path: path.to_path_buf(),
            })
        }
    }

    /// Human-readable description used in the document metadata block.
    pub fn description(&self) -> String {
        match self {
            InputDescriptor::Directory { path, recursive } => {
                if *recursive {
                    format!("directory {} (recursive)", path.display())
                } else {
                    format!("directory {}", path.display())
                }
            }
            InputDescriptor::Archive { path } => format!("archive {}", path.display()),
            InputDescriptor::IdentifierList { path } => {
                format!("identifier list {}", path.display())
            }
            InputDescriptor::Identifier { value } => format!("identifier {}", value),
        }
    }
}
