// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Fixed-width numeric buffers returned by sensor data stores.

use std::io::Write;

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};

use crate::core::{Pc5Error, Result};

use super::metadata::DType;

/// An owned, typed array of numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayBuffer {
    /// Unsigned 8-bit values (reflectivity)
    U8(Vec<u8>),
    /// Unsigned 16-bit values
    U16(Vec<u16>),
    /// Unsigned 32-bit values (range in millimeters)
    U32(Vec<u32>),
    /// Unsigned 64-bit values (timestamps in nanoseconds)
    U64(Vec<u64>),
    /// 32-bit floats (calibration vectors)
    F32(Vec<f32>),
    /// 64-bit floats
    F64(Vec<f64>),
}

macro_rules! map_values {
    ($buf:expr, $v:ident => $e:expr) => {
        match $buf {
            ArrayBuffer::U8($v) => $e,
            ArrayBuffer::U16($v) => $e,
            ArrayBuffer::U32($v) => $e,
            ArrayBuffer::U64($v) => $e,
            ArrayBuffer::F32($v) => $e,
            ArrayBuffer::F64($v) => $e,
        }
    };
}

impl ArrayBuffer {
    /// Element type of this buffer.
    pub fn dtype(&self) -> DType {
        match self {
            ArrayBuffer::U8(_) => DType::U8,
            ArrayBuffer::U16(_) => DType::U16,
            ArrayBuffer::U32(_) => DType::U32,
            ArrayBuffer::U64(_) => DType::U64,
            ArrayBuffer::F32(_) => DType::F32,
            ArrayBuffer::F64(_) => DType::F64,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        map_values!(self, v => v.len())
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy out the elements in `start..end`.
    pub fn slice(&self, start: usize, end: usize) -> Result<ArrayBuffer> {
        if start > end || end > self.len() {
            return Err(Pc5Error::format(
                "ArrayBuffer",
                format!("slice {start}..{end} out of bounds for length {}", self.len()),
            ));
        }
        Ok(match self {
            ArrayBuffer::U8(v) => ArrayBuffer::U8(v[start..end].to_vec()),
            ArrayBuffer::U16(v) => ArrayBuffer::U16(v[start..end].to_vec()),
            ArrayBuffer::U32(v) => ArrayBuffer::U32(v[start..end].to_vec()),
            ArrayBuffer::U64(v) => ArrayBuffer::U64(v[start..end].to_vec()),
            ArrayBuffer::F32(v) => ArrayBuffer::F32(v[start..end].to_vec()),
            ArrayBuffer::F64(v) => ArrayBuffer::F64(v[start..end].to_vec()),
        })
    }

    /// Widen every element to `f64`.
    pub fn to_f64(&self) -> Vec<f64> {
        map_values!(self, v => v.iter().map(|&x| x as f64).collect())
    }

    /// Convert every element to `f32`.
    pub fn to_f32(&self) -> Vec<f32> {
        map_values!(self, v => v.iter().map(|&x| x as f32).collect())
    }

    /// Widen integer elements to `u64`. Float buffers are rejected.
    pub fn to_u64(&self) -> Result<Vec<u64>> {
        match self {
            ArrayBuffer::U8(v) => Ok(v.iter().map(|&x| x as u64).collect()),
            ArrayBuffer::U16(v) => Ok(v.iter().map(|&x| x as u64).collect()),
            ArrayBuffer::U32(v) => Ok(v.iter().map(|&x| x as u64).collect()),
            ArrayBuffer::U64(v) => Ok(v.clone()),
            ArrayBuffer::F32(_) | ArrayBuffer::F64(_) => Err(Pc5Error::format(
                "ArrayBuffer",
                format!("expected an integer array, found {}", self.dtype()),
            )),
        }
    }

    /// Decode little-endian bytes into a buffer of the given type.
    pub fn decode_le(dtype: DType, bytes: &[u8]) -> Result<ArrayBuffer> {
        if bytes.len() % dtype.size() != 0 {
            return Err(Pc5Error::format(
                "ArrayBuffer",
                format!(
                    "{} bytes is not a whole number of {dtype} elements",
                    bytes.len()
                ),
            ));
        }
        let n = bytes.len() / dtype.size();
        Ok(match dtype {
            DType::U8 => ArrayBuffer::U8(bytes.to_vec()),
            DType::U16 => {
                let mut out = vec![0u16; n];
                LittleEndian::read_u16_into(bytes, &mut out);
                ArrayBuffer::U16(out)
            }
            DType::U32 => {
                let mut out = vec![0u32; n];
                LittleEndian::read_u32_into(bytes, &mut out);
                ArrayBuffer::U32(out)
            }
            DType::U64 => {
                let mut out = vec![0u64; n];
                LittleEndian::read_u64_into(bytes, &mut out);
                ArrayBuffer::U64(out)
            }
            DType::F32 => {
                let mut out = vec![0f32; n];
                LittleEndian::read_f32_into(bytes, &mut out);
                ArrayBuffer::F32(out)
            }
            DType::F64 => {
                let mut out = vec![0f64; n];
                LittleEndian::read_f64_into(bytes, &mut out);
                ArrayBuffer::F64(out)
            }
        })
    }

    /// Write the elements as little-endian bytes.
    pub fn write_le<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        match self {
            ArrayBuffer::U8(v) => w.write_all(v)?,
            ArrayBuffer::U16(v) => {
                for &x in v {
                    w.write_u16::<LittleEndian>(x)?;
                }
            }
            ArrayBuffer::U32(v) => {
                for &x in v {
                    w.write_u32::<LittleEndian>(x)?;
                }
            }
            ArrayBuffer::U64(v) => {
                for &x in v {
                    w.write_u64::<LittleEndian>(x)?;
                }
            }
            ArrayBuffer::F32(v) => {
                for &x in v {
                    w.write_f32::<LittleEndian>(x)?;
                }
            }
            ArrayBuffer::F64(v) => {
                for &x in v {
                    w.write_f64::<LittleEndian>(x)?;
                }
            }
        }
        Ok(())
    }
}
