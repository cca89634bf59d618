//! Program-Image Loader.
//!
//! This module loads flat big-endian program images into the memory store. It
//! performs:
//! 1. **File Reading:** Reads the raw image bytes from disk.
//! 2. **Word Placement:** Issues word-granular stores starting at address 0,
//!    preserving the image's big-endian byte order.

use std::fs;
use std::path::Path;

use crate::common::constants::WORD_BYTES;
use crate::common::data::MemSize;
use crate::common::error::SimError;
use crate::mem::MemoryStore;

/// Reads a program image from disk.
///
/// # Arguments
///
/// * `path` - Path to the image file.
///
/// # Returns
///
/// The raw bytes of the file.
///
/// # Errors
///
/// Returns [`SimError::Image`] when the file cannot be read.
pub fn read_image<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, SimError> {
    Ok(fs::read(path)?)
}

/// Loads a raw big-endian word stream into memory at address 0.
///
/// The image bytes are consumed four at a time; a trailing partial word is
/// zero-padded.
///
/// # Arguments
///
/// * `mem` - The memory store to load into.
/// * `bytes` - The raw image bytes.
///
/// # Returns
///
/// The number of words written.
///
/// # Errors
///
/// Returns [`SimError::MemoryRange`] when the image does not fit in the
/// store.
pub fn load_words(mem: &mut MemoryStore, bytes: &[u8]) -> Result<u32, SimError> {
    let mut addr = 0u32;
    for chunk in bytes.chunks(WORD_BYTES as usize) {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        mem.set(addr, MemSize::Word, u32::from_be_bytes(word))?;
        addr += WORD_BYTES;
    }
    Ok(addr / WORD_BYTES)
}
