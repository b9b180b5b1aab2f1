//! Bounded content sampling.
//!
//! Classification only ever looks at the first [`CONTENT_SAMPLE_SIZE`]
//! bytes of a file, so huge artifacts cost the same as small ones.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Maximum number of bytes read for content inspection.
pub const CONTENT_SAMPLE_SIZE: usize = 50_000;

/// Reads up to [`CONTENT_SAMPLE_SIZE`] bytes of `path` as text.
///
/// A multi-byte UTF-8 sequence cut by the size limit is dropped; any other
/// invalid byte sequence is replaced with `U+FFFD`.
///
/// # Errors
///
/// Returns the underlying I/O error when the path does not exist, is not a
/// regular readable file, or the read fails.
pub fn read_sample(path: &Path) -> io::Result<String> {
    let file = File::open(path)?;
    let mut bytes = Vec::new();
    file.take(CONTENT_SAMPLE_SIZE as u64).read_to_end(&mut bytes)?;
    Ok(decode_sample(bytes))
}

fn decode_sample(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            let utf8 = err.utf8_error();
            let bytes = err.as_bytes();
            // error_len() is None only for a sequence truncated at the end.
            if utf8.error_len().is_none() {
                String::from_utf8_lossy(&bytes[..utf8.valid_up_to()]).into_owned()
            } else {
                String::from_utf8_lossy(bytes).into_owned()
            }
        }
    }
}
