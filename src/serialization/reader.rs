//! Bounded cursor over a borrowed payload buffer
//!
//! Every read checks the remaining length first, so a short buffer surfaces
//! as `CodecError::UnexpectedEof` and never as a slice panic.

use crate::error::{CodecError, Result};

#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> WireReader<'a> {
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        WireReader { data, offset: 0 }
    }

    /// Bytes consumed so far
    #[inline]
    pub fn position(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    #[inline]
    fn ensure(&self, needed: usize) -> Result<()> {
        let remaining = self.remaining();
        if needed > remaining {
            return Err(CodecError::UnexpectedEof { needed, remaining });
        }
        Ok(())
    }

    /// Look at the byte `ahead` positions past the cursor without consuming it
    pub fn peek_at(&self, ahead: usize) -> Result<u8> {
        self.ensure(ahead + 1)?;
        Ok(self.data[self.offset + ahead])
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let byte = self.peek_at(0)?;
        self.offset += 1;
        Ok(byte)
    }

    /// Consume `len` bytes, borrowing them from the underlying buffer
    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        self.ensure(len)?;
        let data: &'a [u8] = self.data;
        let slice = &data[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_slice(N)?);
        Ok(out)
    }

    pub fn read_u16_le(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32_le(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_i32_le(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    pub fn read_u64_le(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    pub fn read_i64_le(&mut self) -> Result<i64> {
        Ok(i64::from_le_bytes(self.read_array()?))
    }
}
