//! Skeletal animations for moby models.
//!
//! An [Animation] is a header followed by a table of frame pointers.
//! The pointers are relative to the start of the model rather than the animation,
//! so reading an animation requires both the model offset and the animation offset.
use std::io::{Read, Seek, SeekFrom, Write};

use binrw::{BinRead, BinReaderExt, BinWrite, BinWriterExt};
use log::debug;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::formats::frame::{Frame, FRAME_HEADER_SIZE};
use crate::ParseError;

/// The size in bytes of the header preceding the frame pointer table.
pub const ANIMATION_HEADER_SIZE: usize = 0x1C;

/// Frames are aligned to this many bytes when writing.
const FRAME_ALIGNMENT: u64 = 0x10;

#[derive(BinRead, BinWrite, Debug, PartialEq, Clone, Default)]
#[brw(little)]
struct AnimationHeader {
    unk1: f32,
    unk2: f32,
    unk3: f32,
    unk4: f32,
    frame_count: u8,
    unk5: u8,
    unk6: u8,
    unk7: u8,
    null: u32,
    speed: f32,
}

/// An ordered sequence of [Frame] poses.
///
/// The header values aren't fully researched and are preserved as is.
/// The frame count is not stored separately and is always the length of [frames](#structfield.frames).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Animation {
    pub unk1: f32,
    pub unk2: f32,
    pub unk3: f32,
    pub unk4: f32,
    pub unk5: u8,
    pub unk6: u8,
    pub unk7: u8,
    pub null: u32,
    pub speed: f32,
    pub frames: Vec<Frame>,
}

/// Errors while writing an [Animation].
#[derive(Error, Debug)]
pub enum AnimationError {
    /// The frame count is stored in a single byte.
    #[error("Animations can have at most 255 frames, but found {} frames.", count)]
    TooManyFrames { count: usize },

    /// The frame data does not match the length in the frame header.
    #[error(
        "Frame {} has {} bytes of data but a frame length of {} requires {} bytes.",
        index,
        actual,
        frame_length,
        expected
    )]
    PayloadLength {
        index: usize,
        frame_length: u16,
        expected: usize,
        actual: usize,
    },

    /// A frame pointer does not fit in 32 bits relative to the model offset.
    #[error("Frame {} at offset {:#x} cannot be addressed from model offset {:#x}.", index, offset, model_offset)]
    InvalidPointer {
        index: usize,
        offset: u64,
        model_offset: u64,
    },

    /// An error occurred while writing data to a buffer.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// An error occurred while encoding data.
    #[error(transparent)]
    BinWrite(#[from] binrw::Error),
}

impl Animation {
    /// Reads the animation at the absolute `animation_offset` in `reader`.
    /// Frame pointers are interpreted relative to the absolute `model_offset`.
    ///
    /// A model slot with no animation stores an offset of `0`,
    /// so any `animation_offset <= 0` returns an empty animation instead of an error.
    pub fn read<R: Read + Seek>(
        reader: &mut R,
        model_offset: u32,
        animation_offset: i32,
    ) -> Result<Self, ParseError> {
        if animation_offset <= 0 {
            return Ok(Self::default());
        }

        reader.seek(SeekFrom::Start(animation_offset as u64))?;
        let header: AnimationHeader = reader.read_le()?;

        let pointers = (0..header.frame_count)
            .map(|_| reader.read_le::<u32>())
            .collect::<Result<Vec<_>, _>>()?;

        let frames = pointers
            .iter()
            .map(|p| Frame::read(reader, u64::from(model_offset) + u64::from(*p)))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "Read animation at {:#x} with {} frames",
            animation_offset,
            frames.len()
        );

        Ok(Self {
            unk1: header.unk1,
            unk2: header.unk2,
            unk3: header.unk3,
            unk4: header.unk4,
            unk5: header.unk5,
            unk6: header.unk6,
            unk7: header.unk7,
            null: header.null,
            speed: header.speed,
            frames,
        })
    }

    /// Writes the animation at the current position of `writer` and returns the animation offset.
    ///
    /// The frames are written contiguously after the pointer table with each frame aligned to 16 bytes.
    /// The frame pointers are calculated relative to the absolute `model_offset`,
    /// which must not be past the current position.
    pub fn write<W: Write + Seek>(
        &self,
        writer: &mut W,
        model_offset: u64,
    ) -> Result<u64, AnimationError> {
        let frame_count = u8::try_from(self.frames.len()).map_err(|_| {
            AnimationError::TooManyFrames {
                count: self.frames.len(),
            }
        })?;

        for (index, frame) in self.frames.iter().enumerate() {
            if frame.data.len() != frame.data_size() {
                return Err(AnimationError::PayloadLength {
                    index,
                    frame_length: frame.frame_length,
                    expected: frame.data_size(),
                    actual: frame.data.len(),
                });
            }
        }

        let animation_offset = writer.stream_position()?;
        let table_end =
            animation_offset + (ANIMATION_HEADER_SIZE + self.frames.len() * 4) as u64;

        let mut frame_offset = align(table_end, FRAME_ALIGNMENT);
        let mut frame_offsets = Vec::with_capacity(self.frames.len());
        for frame in &self.frames {
            frame_offsets.push(frame_offset);
            frame_offset = align(
                frame_offset + (FRAME_HEADER_SIZE + frame.data.len()) as u64,
                FRAME_ALIGNMENT,
            );
        }

        let pointers = frame_offsets
            .iter()
            .enumerate()
            .map(|(index, offset)| {
                offset
                    .checked_sub(model_offset)
                    .and_then(|p| u32::try_from(p).ok())
                    .ok_or(AnimationError::InvalidPointer {
                        index,
                        offset: *offset,
                        model_offset,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let header = AnimationHeader {
            unk1: self.unk1,
            unk2: self.unk2,
            unk3: self.unk3,
            unk4: self.unk4,
            frame_count,
            unk5: self.unk5,
            unk6: self.unk6,
            unk7: self.unk7,
            null: self.null,
            speed: self.speed,
        };
        writer.write_le(&header)?;
        for pointer in &pointers {
            writer.write_le(pointer)?;
        }

        for (frame, offset) in self.frames.iter().zip(frame_offsets) {
            write_padding(writer, offset)?;
            writer.write_le(frame)?;
        }
        write_padding(writer, frame_offset)?;

        debug!(
            "Wrote animation at {:#x} with {} frames",
            animation_offset,
            self.frames.len()
        );

        Ok(animation_offset)
    }

    /// The number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` if the animation has no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

fn align(offset: u64, alignment: u64) -> u64 {
    offset.div_ceil(alignment) * alignment
}

// Pads with zeros up to the absolute position `end`.
fn write_padding<W: Write + Seek>(writer: &mut W, end: u64) -> std::io::Result<()> {
    let position = writer.stream_position()?;
    if end > position {
        writer.write_all(&vec![0u8; (end - position) as usize])?;
    }
    Ok(())
}
