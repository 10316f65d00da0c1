//! Memory Source Trait
//!
//! Core abstraction for reading and patching game memory.

use crate::Result;
use byteorder::{ByteOrder, LE};
use std::sync::Arc;

/// Byte-level access to the game's address space
pub trait MemorySource: Send + Sync {
    /// Read bytes from a virtual address
    fn read_bytes(&self, address: usize, size: usize) -> Result<Vec<u8>>;

    /// Write bytes to a virtual address
    fn write_bytes(&self, address: usize, data: &[u8]) -> Result<()>;

    /// Read a little-endian i32
    fn read_i32(&self, address: usize) -> Result<i32> {
        let bytes = self.read_bytes(address, 4)?;
        Ok(LE::read_i32(&bytes))
    }

    /// Write a little-endian i32
    fn write_i32(&self, address: usize, value: i32) -> Result<()> {
        let mut bytes = [0u8; 4];
        LE::write_i32(&mut bytes, value);
        self.write_bytes(address, &bytes)
    }
}

impl<T: MemorySource + ?Sized> MemorySource for Arc<T> {
    fn read_bytes(&self, address: usize, size: usize) -> Result<Vec<u8>> {
        (**self).read_bytes(address, size)
    }

    fn write_bytes(&self, address: usize, data: &[u8]) -> Result<()> {
        (**self).write_bytes(address, data)
    }
}

impl<T: MemorySource + ?Sized> MemorySource for &T {
    fn read_bytes(&self, address: usize, size: usize) -> Result<Vec<u8>> {
        (**self).read_bytes(address, size)
    }

    fn write_bytes(&self, address: usize, data: &[u8]) -> Result<()> {
        (**self).write_bytes(address, data)
    }
}
