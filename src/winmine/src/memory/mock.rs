//! Mock Memory Source
//!
//! An in-memory address space for decoder, overlay and autoplay tests.

use super::MemorySource;
use crate::{Error, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

/// A writable mock of the game's address space
pub struct MockMemorySource {
    /// Raw memory (contiguous, starting at base_address)
    data: Mutex<Vec<u8>>,
    /// Base virtual address for the data
    pub base_address: usize,
    /// When set, every read fails as if the process had exited
    fail_reads: AtomicBool,
}

impl MockMemorySource {
    /// Create a new mock with data at given base address
    pub fn new(data: Vec<u8>, base_address: usize) -> Self {
        Self {
            data: Mutex::new(data),
            base_address,
            fail_reads: AtomicBool::new(false),
        }
    }

    /// A zero-filled mock of `size` bytes
    pub fn zeroed(size: usize, base_address: usize) -> Self {
        Self::new(vec![0; size], base_address)
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Store bytes without going through the trait
    pub fn poke(&self, address: usize, bytes: &[u8]) {
        let offset = address - self.base_address;
        self.lock()[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    pub fn poke_i32(&self, address: usize, value: i32) {
        self.poke(address, &value.to_le_bytes());
    }

    pub fn peek(&self, address: usize, size: usize) -> Vec<u8> {
        let offset = address - self.base_address;
        self.lock()[offset..offset + size].to_vec()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.data.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn range(&self, address: usize, size: usize, len: usize) -> Option<std::ops::Range<usize>> {
        let offset = address.checked_sub(self.base_address)?;
        let end = offset.checked_add(size)?;
        (end <= len).then_some(offset..end)
    }
}

impl MemorySource for MockMemorySource {
    fn read_bytes(&self, address: usize, size: usize) -> Result<Vec<u8>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Error::MemoryRead {
                address,
                size,
                reason: "process exited".to_string(),
            });
        }

        let data = self.lock();
        let range = self
            .range(address, size, data.len())
            .ok_or_else(|| Error::MemoryRead {
                address,
                size,
                reason: format!("outside mock data of {} bytes", data.len()),
            })?;
        Ok(data[range].to_vec())
    }

    fn write_bytes(&self, address: usize, bytes: &[u8]) -> Result<()> {
        let mut data = self.lock();
        let len = data.len();
        let range = self
            .range(address, bytes.len(), len)
            .ok_or_else(|| Error::MemoryWrite {
                address,
                size: bytes.len(),
                reason: format!("outside mock data of {} bytes", len),
            })?;
        data[range].copy_from_slice(bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_source_read_bytes() {
        let source = MockMemorySource::new(vec![0x41, 0x42, 0x43, 0x44], 0x1000);

        assert_eq!(source.read_bytes(0x1000, 4).unwrap(), vec![0x41, 0x42, 0x43, 0x44]);
        assert_eq!(source.read_bytes(0x1001, 2).unwrap(), vec![0x42, 0x43]);
    }

    #[test]
    fn test_mock_source_read_i32() {
        let source = MockMemorySource::new(vec![0xFE, 0xFF, 0xFF, 0xFF, 0x09, 0, 0, 0], 0x1000);

        assert_eq!(source.read_i32(0x1000).unwrap(), -2);
        assert_eq!(source.read_i32(0x1004).unwrap(), 9);
    }

    #[test]
    fn test_mock_source_write_i32() {
        let source = MockMemorySource::zeroed(8, 0x1000);
        source.write_i32(0x1004, 0x01020304).unwrap();

        assert_eq!(source.peek(0x1004, 4), vec![0x04, 0x03, 0x02, 0x01]);
        assert_eq!(source.read_i32(0x1004).unwrap(), 0x01020304);
    }

    #[test]
    fn test_mock_source_out_of_bounds() {
        let source = MockMemorySource::zeroed(4, 0x1000);

        assert!(source.read_bytes(0x1002, 10).is_err());
        assert!(source.read_bytes(0x500, 4).is_err());
        assert!(source.write_bytes(0x1003, &[1, 2]).is_err());
    }

    #[test]
    fn test_mock_source_fail_reads() {
        let source = MockMemorySource::zeroed(4, 0x1000);
        source.set_fail_reads(true);
        let err = source.read_bytes(0x1000, 4).unwrap_err();
        assert!(err.is_transient());

        source.set_fail_reads(false);
        assert!(source.read_bytes(0x1000, 4).is_ok());
    }
}
