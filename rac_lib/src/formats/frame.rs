//! A single pose sample of an [Animation](crate::formats::anim::Animation).
use std::io::{Read, Seek, SeekFrom};

use binrw::{BinRead, BinReaderExt, BinWrite};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ParseError;

/// The size in bytes of the header preceding the frame data.
pub const FRAME_HEADER_SIZE: usize = 0x10;

/// The size in bytes of each unit of [frame_length](struct.Frame.html#structfield.frame_length).
pub const FRAME_DATA_STRIDE: usize = 0x10;

/// One frame of bone transforms.
///
/// The layout of the frame data is not fully researched,
/// so the bytes following the header are preserved as is in [data](#structfield.data).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(BinRead, BinWrite, Debug, PartialEq, Clone, Default)]
#[brw(little)]
pub struct Frame {
    pub speed: f32,
    pub frame_index: u16,
    /// The length of [data](#structfield.data) in units of 16 bytes.
    pub frame_length: u16,
    pub sec0_pointer: u16,
    pub sec0_count: u16,
    pub translation_pointer: u16,
    pub translation_count: u16,
    /// The undecoded frame data containing `frame_length * 16` bytes.
    #[br(count = usize::from(frame_length) * FRAME_DATA_STRIDE)]
    #[cfg_attr(feature = "serde", serde(with = "serde_bytes"))]
    pub data: Vec<u8>,
}

impl Frame {
    /// Reads the frame starting at the absolute `offset` in `reader`.
    pub fn read<R: Read + Seek>(reader: &mut R, offset: u64) -> Result<Self, ParseError> {
        reader.seek(SeekFrom::Start(offset))?;
        Ok(reader.read_le::<Frame>()?)
    }

    /// The expected length in bytes of [data](#structfield.data) based on [frame_length](#structfield.frame_length).
    pub fn data_size(&self) -> usize {
        usize::from(self.frame_length) * FRAME_DATA_STRIDE
    }

    /// The total size in bytes of the header and data.
    pub fn size_in_bytes(&self) -> usize {
        FRAME_HEADER_SIZE + self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex_bytes;
    use binrw::BinWriterExt;
    use std::io::Cursor;

    #[test]
    fn read_frame() {
        let buffer = hex_bytes(
            "FFFFFFFF
             0000003F 0300 0200 1000 0400 2000 0500
             00010203 04050607 08090A0B 0C0D0E0F
             10111213 14151617 18191A1B 1C1D1E1F
             EEEEEEEE",
        );
        let frame = Frame::read(&mut Cursor::new(&buffer), 4).unwrap();
        assert_eq!(0.5, frame.speed);
        assert_eq!(3, frame.frame_index);
        assert_eq!(2, frame.frame_length);
        assert_eq!(0x10, frame.sec0_pointer);
        assert_eq!(4, frame.sec0_count);
        assert_eq!(0x20, frame.translation_pointer);
        assert_eq!(5, frame.translation_count);
        assert_eq!(32, frame.data.len());
        assert_eq!(frame.data_size(), frame.data.len());
        assert_eq!(0x1F, frame.data[31]);
        assert_eq!(48, frame.size_in_bytes());
    }

    #[test]
    fn read_frame_empty_data() {
        let buffer = hex_bytes("0000803F 0000 0000 0000 0000 0000 0000");
        let frame = Frame::read(&mut Cursor::new(&buffer), 0).unwrap();
        assert!(frame.data.is_empty());
    }

    #[test]
    fn read_frame_truncated_data() {
        let buffer = hex_bytes("0000803F 0000 0100 0000 0000 0000 0000 00000000");
        let result = Frame::read(&mut Cursor::new(&buffer), 0);
        assert!(matches!(result, Err(ParseError::BinRead(_))));
    }

    #[test]
    fn write_frame() {
        let buffer = hex_bytes(
            "0000003F 0300 0100 1000 0400 2000 0500
             00010203 04050607 08090A0B 0C0D0E0F",
        );
        let frame = Frame::read(&mut Cursor::new(&buffer), 0).unwrap();

        let mut writer = Cursor::new(Vec::new());
        writer.write_le(&frame).unwrap();
        assert_eq!(buffer, writer.into_inner());
    }
}
