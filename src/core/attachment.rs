//! # Attachments
//!
//! Files and URLs queued to accompany the next message.
//!
//! Validation is local and synchronous. A rejected attachment never reaches
//! the pending list and never touches the network.

use std::fmt;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use log::{debug, info};

/// MIME types the service accepts.
pub const ALLOWED_FILE_TYPES: [&str; 8] = [
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "text/plain",
    "application/pdf",
    "application/json",
    "text/csv",
];

/// Upper bound on a single file, inclusive.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct FileAttachment {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Attachment {
    File(FileAttachment),
    Url(String),
}

impl Attachment {
    /// Text shown in the attachment strip.
    pub fn label(&self) -> &str {
        match self {
            Attachment::File(file) => &file.name,
            Attachment::Url(url) => url,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Attachment::File(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttachmentError {
    UnsupportedType(String),
    TooLarge,
    InvalidUrl,
    Unreadable { name: String, reason: String },
}

impl fmt::Display for AttachmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttachmentError::UnsupportedType(mime) => write!(f, "Unsupported file type: {mime}"),
            AttachmentError::TooLarge => write!(f, "File size must be less than 10MB"),
            AttachmentError::InvalidUrl => write!(f, "Please enter a valid URL"),
            AttachmentError::Unreadable { name, reason } => {
                write!(f, "Could not read {name}: {reason}")
            }
        }
    }
}

impl std::error::Error for AttachmentError {}

/// Type is checked before size.
pub fn validate_file(mime_type: &str, size: u64) -> Result<(), AttachmentError> {
    if !ALLOWED_FILE_TYPES.contains(&mime_type) {
        return Err(AttachmentError::UnsupportedType(mime_type.to_string()));
    }
    if size > MAX_FILE_SIZE {
        return Err(AttachmentError::TooLarge);
    }
    Ok(())
}

/// Accepts any string that parses as an absolute URL.
pub fn validate_url(url: &str) -> Result<(), AttachmentError> {
    url::Url::parse(url)
        .map(|_| ())
        .map_err(|_| AttachmentError::InvalidUrl)
}

/// Guesses a MIME type from the file extension.
///
/// Unknown extensions become `application/<ext>` so a rejection names what
/// was offered; files without an extension are `application/octet-stream`.
pub fn detect_mime_type(path: &Path) -> String {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return "application/octet-stream".to_string();
    };
    let ext = ext.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "txt" | "text" => "text/plain",
        "pdf" => "application/pdf",
        "json" => "application/json",
        "csv" => "text/csv",
        other => return format!("application/{other}"),
    };
    mime.to_string()
}

/// Validates a file on disk and reads it.
///
/// Type and size are checked from metadata before any bytes are read, and
/// the size again on what was actually read.
pub fn load_file(path: &Path) -> Result<FileAttachment, AttachmentError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let unreadable = |e: std::io::Error| AttachmentError::Unreadable {
        name: name.clone(),
        reason: e.to_string(),
    };

    let metadata = fs::metadata(path).map_err(unreadable)?;
    if !metadata.is_file() {
        return Err(AttachmentError::Unreadable {
            name,
            reason: "not a regular file".to_string(),
        });
    }

    let mime_type = detect_mime_type(path);
    validate_file(&mime_type, metadata.len())?;

    let file = File::open(path).map_err(unreadable)?;
    let data = read_capped(file).map_err(unreadable)?;
    validate_file(&mime_type, data.len() as u64)?;
    info!("Loaded attachment {} ({}, {} bytes)", name, mime_type, data.len());

    Ok(FileAttachment {
        name,
        mime_type,
        size: data.len() as u64,
        data,
    })
}

/// Reads at most one byte past [`MAX_FILE_SIZE`], enough to tell an
/// oversized file apart without buffering all of it.
fn read_capped(reader: impl Read) -> std::io::Result<Vec<u8>> {
    let mut data = Vec::new();
    reader.take(MAX_FILE_SIZE + 1).read_to_end(&mut data)?;
    Ok(data)
}

/// Interprets a terminal paste as a file drop.
///
/// Terminals paste dropped files as their paths, shell-quoted or
/// backslash-escaped and optionally `file://` prefixed. Returns `None`
/// unless every token names an existing file, so ordinary pasted text is
/// left alone.
pub fn parse_dropped_paths(text: &str) -> Option<Vec<PathBuf>> {
    let tokens = split_shell_words(text.trim());
    if tokens.is_empty() {
        return None;
    }

    let paths: Vec<PathBuf> = tokens
        .into_iter()
        .map(|t| PathBuf::from(t.strip_prefix("file://").unwrap_or(&t)))
        .collect();

    if paths.iter().all(|p| p.is_file()) {
        debug!("Paste recognised as {} dropped file(s)", paths.len());
        Some(paths)
    } else {
        None
    }
}

fn split_shell_words(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => current.push(c),
            (None, '\'' | '"') => quote = Some(c),
            (None, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            (None, c) if c.is_whitespace() => {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
            }
            (None, c) => current.push(c),
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Attachments waiting for the next send.
#[derive(Debug, Default, Clone)]
pub struct PendingAttachments {
    items: Vec<Attachment>,
}

impl PendingAttachments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, attachment: Attachment) {
        self.items.push(attachment);
    }

    /// Out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) -> Option<Attachment> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[Attachment] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
