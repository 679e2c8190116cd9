//! Little-endian primitive readers and writers at byte offsets in a buffer.
//!
//! Every function checks the bounds of the access and returns [ParseError::OutOfBounds]
//! instead of panicking on truncated data.
use std::io::Cursor;

use binrw::{BinReaderExt, BinWriterExt};
use byteorder::{ByteOrder, LittleEndian};

use crate::{Matrix4x4, ParseError};

/// Returns the `size` bytes starting at `offset`.
pub fn slice(buffer: &[u8], offset: usize, size: usize) -> Result<&[u8], ParseError> {
    let len = buffer.len();
    offset
        .checked_add(size)
        .filter(|end| *end <= len)
        .map(|end| &buffer[offset..end])
        .ok_or(ParseError::OutOfBounds { offset, size, len })
}

/// Returns the `size` bytes starting at `offset` for writing.
pub fn slice_mut(buffer: &mut [u8], offset: usize, size: usize) -> Result<&mut [u8], ParseError> {
    let len = buffer.len();
    match offset.checked_add(size) {
        Some(end) if end <= len => Ok(&mut buffer[offset..end]),
        _ => Err(ParseError::OutOfBounds { offset, size, len }),
    }
}

pub fn read_u8(buffer: &[u8], offset: usize) -> Result<u8, ParseError> {
    Ok(slice(buffer, offset, 1)?[0])
}

pub fn read_i16(buffer: &[u8], offset: usize) -> Result<i16, ParseError> {
    Ok(LittleEndian::read_i16(slice(buffer, offset, 2)?))
}

pub fn read_u16(buffer: &[u8], offset: usize) -> Result<u16, ParseError> {
    Ok(LittleEndian::read_u16(slice(buffer, offset, 2)?))
}

pub fn read_i32(buffer: &[u8], offset: usize) -> Result<i32, ParseError> {
    Ok(LittleEndian::read_i32(slice(buffer, offset, 4)?))
}

pub fn read_u32(buffer: &[u8], offset: usize) -> Result<u32, ParseError> {
    Ok(LittleEndian::read_u32(slice(buffer, offset, 4)?))
}

pub fn read_f32(buffer: &[u8], offset: usize) -> Result<f32, ParseError> {
    Ok(LittleEndian::read_f32(slice(buffer, offset, 4)?))
}

/// Reads 16 consecutive floats as a matrix in row-major order.
pub fn read_matrix4(buffer: &[u8], offset: usize) -> Result<Matrix4x4, ParseError> {
    Ok(Cursor::new(slice(buffer, offset, 64)?).read_le()?)
}

pub fn write_u8(buffer: &mut [u8], offset: usize, value: u8) -> Result<(), ParseError> {
    slice_mut(buffer, offset, 1)?[0] = value;
    Ok(())
}

pub fn write_i16(buffer: &mut [u8], offset: usize, value: i16) -> Result<(), ParseError> {
    LittleEndian::write_i16(slice_mut(buffer, offset, 2)?, value);
    Ok(())
}

pub fn write_u16(buffer: &mut [u8], offset: usize, value: u16) -> Result<(), ParseError> {
    LittleEndian::write_u16(slice_mut(buffer, offset, 2)?, value);
    Ok(())
}

pub fn write_i32(buffer: &mut [u8], offset: usize, value: i32) -> Result<(), ParseError> {
    LittleEndian::write_i32(slice_mut(buffer, offset, 4)?, value);
    Ok(())
}

pub fn write_u32(buffer: &mut [u8], offset: usize, value: u32) -> Result<(), ParseError> {
    LittleEndian::write_u32(slice_mut(buffer, offset, 4)?, value);
    Ok(())
}

pub fn write_f32(buffer: &mut [u8], offset: usize, value: f32) -> Result<(), ParseError> {
    LittleEndian::write_f32(slice_mut(buffer, offset, 4)?, value);
    Ok(())
}

/// Writes the matrix as 16 consecutive floats in row-major order.
pub fn write_matrix4(buffer: &mut [u8], offset: usize, value: &Matrix4x4) -> Result<(), ParseError> {
    Cursor::new(slice_mut(buffer, offset, 64)?).write_le(value)?;
    Ok(())
}
