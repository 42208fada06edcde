//! MD5 file hasher with bounded-buffer streaming.
//!
//! # Overview
//!
//! [`Hasher`] computes the MD5 digest of a file's full content. The file is
//! read through a fixed-size buffer, so memory use does not grow with file
//! size. [`Hasher::full_hash_with`] lets a caller keep one buffer alive
//! across many files. MD5 is used as an equality check, not as a security
//! boundary.
//!
//! # Example
//!
//! ```no_run
//! use dupefinder::scanner::{hash_to_hex, Hasher};
//! use std::path::Path;
//!
//! let hasher = Hasher::new();
//! let digest = hasher.full_hash(Path::new("Cargo.toml")).unwrap();
//! println!("{}", hash_to_hex(&digest));
//! ```

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use md5::{Digest as _, Md5};

use super::HashError;

/// A 16-byte MD5 content digest.
pub type Digest = [u8; 16];

/// Default read window: 5 MiB.
pub const DEFAULT_BUFFER_SIZE: usize = 5 * 1024 * 1024;

/// Largest accepted read window: 256 MiB.
pub const MAX_BUFFER_SIZE: usize = 256 * 1024 * 1024;

/// Streaming content hasher.
#[derive(Debug, Clone)]
pub struct Hasher {
    buffer_size: usize,
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher {
    /// Create a hasher with the default 5 MiB read window.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Set the read window size in bytes, clamped to
    /// `1..=`[`MAX_BUFFER_SIZE`].
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.clamp(1, MAX_BUFFER_SIZE);
        self
    }

    /// The configured read window size in bytes.
    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Hash the full content of the file at `path`.
    ///
    /// Allocates a fresh read buffer; use [`Hasher::full_hash_with`] when
    /// hashing many files.
    ///
    /// # Errors
    ///
    /// - [`HashError::InvalidArgument`] if `path` is empty
    /// - [`HashError::NotFound`] if the file does not exist
    /// - [`HashError::PermissionDenied`] if the file cannot be opened
    /// - [`HashError::Io`] for any other open or read failure
    pub fn full_hash(&self, path: &Path) -> Result<Digest, HashError> {
        let mut buffer = Vec::new();
        self.full_hash_with(path, &mut buffer)
    }

    /// Hash the file at `path`, reading through `buffer`.
    ///
    /// `buffer` is resized to the configured window on first use and can be
    /// passed again for the next file without reallocating.
    ///
    /// # Errors
    ///
    /// Same as [`Hasher::full_hash`].
    pub fn full_hash_with(&self, path: &Path, buffer: &mut Vec<u8>) -> Result<Digest, HashError> {
        if path.as_os_str().is_empty() {
            return Err(HashError::InvalidArgument);
        }

        let mut file = File::open(path).map_err(|e| map_io_error(path, e))?;
        buffer.resize(self.buffer_size, 0);
        let mut hasher = Md5::new();

        loop {
            let read = match file.read(buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(map_io_error(path, e)),
            };
            hasher.update(&buffer[..read]);
        }

        let mut digest = [0u8; 16];
        digest.copy_from_slice(&hasher.finalize());
        log::trace!("Hashed {}: {}", path.display(), hash_to_hex(&digest));
        Ok(digest)
    }
}

fn map_io_error(path: &Path, error: std::io::Error) -> HashError {
    match error.kind() {
        ErrorKind::NotFound => HashError::NotFound(path.to_path_buf()),
        ErrorKind::PermissionDenied => HashError::PermissionDenied(path.to_path_buf()),
        _ => HashError::Io {
            path: path.to_path_buf(),
            source: error,
        },
    }
}

/// Render a digest as 32 lowercase hex characters.
#[must_use]
pub fn hash_to_hex(digest: &Digest) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// Parse 32 hex characters (either case) back into a digest.
#[must_use]
pub fn hex_to_hash(hex: &str) -> Option<Digest> {
    if hex.len() != 32 || !hex.is_ascii() {
        return None;
    }

    let mut digest = [0u8; 16];
    for (i, byte) in digest.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok()?;
    }
    Some(digest)
}
