//! Little-endian block reader over a borrowed asset buffer.
//!
//! Assets are trees of blocks: `type: u8`, `length: u32`, then `length` bytes
//! of payload. A child block is a reader over exactly its payload, so a
//! record can never read past its own end; trailing bytes inside a block are
//! left to the caller to ignore.

use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{DeserializeError, Result};

/// Block type codes used above the property level.
pub mod block_types {
    pub const COMPONENT: u8 = 1;
    pub const ANIMATION: u8 = 8;
}

const BLOCK_HEADER_LEN: usize = 5;

fn truncated(what: &'static str, needed: usize, remaining: usize) -> DeserializeError {
    DeserializeError::Truncated {
        what,
        needed,
        remaining,
    }
}

#[derive(Debug, Clone)]
pub struct BlockReader<'a> {
    block_type: u8,
    cursor: Cursor<&'a [u8]>,
}

impl<'a> BlockReader<'a> {
    /// Root reader over a whole buffer (block type 0).
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_type(0, data)
    }

    pub fn with_type(block_type: u8, data: &'a [u8]) -> Self {
        Self {
            block_type,
            cursor: Cursor::new(data),
        }
    }

    #[inline]
    pub fn block_type(&self) -> u8 {
        self.block_type
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.cursor.position() as usize
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.cursor.get_ref().len().saturating_sub(self.position())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn ensure(&self, what: &'static str, needed: usize) -> Result<()> {
        let remaining = self.remaining();
        if remaining < needed {
            return Err(truncated(what, needed, remaining));
        }
        Ok(())
    }

    pub fn read_u8(&mut self, what: &'static str) -> Result<u8> {
        self.ensure(what, 1)?;
        self.cursor.read_u8().map_err(|_| truncated(what, 1, 0))
    }

    pub fn read_bool(&mut self, what: &'static str) -> Result<bool> {
        Ok(self.read_u8(what)? != 0)
    }

    pub fn read_u16(&mut self, what: &'static str) -> Result<u16> {
        self.ensure(what, 2)?;
        self.cursor
            .read_u16::<LittleEndian>()
            .map_err(|_| truncated(what, 2, 0))
    }

    pub fn read_u32(&mut self, what: &'static str) -> Result<u32> {
        self.ensure(what, 4)?;
        self.cursor
            .read_u32::<LittleEndian>()
            .map_err(|_| truncated(what, 4, 0))
    }

    pub fn read_i32(&mut self, what: &'static str) -> Result<i32> {
        self.ensure(what, 4)?;
        self.cursor
            .read_i32::<LittleEndian>()
            .map_err(|_| truncated(what, 4, 0))
    }

    pub fn read_f32(&mut self, what: &'static str) -> Result<f32> {
        self.ensure(what, 4)?;
        self.cursor
            .read_f32::<LittleEndian>()
            .map_err(|_| truncated(what, 4, 0))
    }

    /// Reads `N` consecutive floats. The length is checked up front so a short
    /// buffer fails without consuming anything.
    pub fn read_f32_array<const N: usize>(&mut self, what: &'static str) -> Result<[f32; N]> {
        self.ensure(what, 4 * N)?;
        let mut out = [0.0f32; N];
        self.cursor
            .read_f32_into::<LittleEndian>(&mut out)
            .map_err(|_| truncated(what, 4 * N, 0))?;
        Ok(out)
    }

    /// Reads a `u32` length-prefixed UTF-8 string of at most `max_len` bytes.
    pub fn read_string(&mut self, what: &'static str, max_len: usize) -> Result<String> {
        let len = self.read_u32(what)? as usize;
        if len > max_len {
            return Err(DeserializeError::LimitExceeded {
                what,
                count: len,
                limit: max_len,
            });
        }
        let bytes = self.take(what, len)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| DeserializeError::InvalidUtf8)
    }

    fn take(&mut self, what: &'static str, len: usize) -> Result<&'a [u8]> {
        self.ensure(what, len)?;
        let data: &'a [u8] = *self.cursor.get_ref();
        let start = self.position();
        let bytes = &data[start..start + len];
        self.cursor.set_position((start + len) as u64);
        Ok(bytes)
    }

    /// Next child block, or `None` once this reader is exhausted.
    pub fn read_block(&mut self) -> Result<Option<BlockReader<'a>>> {
        if self.is_empty() {
            return Ok(None);
        }
        self.ensure("block header", BLOCK_HEADER_LEN)?;
        let block_type = self.read_u8("block type")?;
        let len = self.read_u32("block length")? as usize;
        let payload = self.take("block payload", len)?;
        Ok(Some(BlockReader::with_type(block_type, payload)))
    }

    /// Next child block, which must exist and carry `expected` as its type.
    pub fn expect_block(&mut self, expected: u8) -> Result<BlockReader<'a>> {
        let remaining = self.remaining();
        let block = self
            .read_block()?
            .ok_or_else(|| truncated("block header", BLOCK_HEADER_LEN, remaining))?;
        if block.block_type() != expected {
            return Err(DeserializeError::UnexpectedBlock {
                expected,
                found: block.block_type(),
            });
        }
        Ok(block)
    }
}
