//! Sound cues embedded in moby models.
use std::io::Cursor;

use binrw::{BinRead, BinReaderExt, BinWrite, BinWriterExt};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{ParseError, Record};

/// A sound played by a model, usually triggered from an animation.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(BinRead, BinWrite, Debug, PartialEq, Clone, Copy, Default)]
#[brw(little)]
pub struct ModelSound {
    pub unk1: i32,
    /// The distance at which the sound can no longer be heard.
    pub distance: f32,
    pub master_volume: i32,
    pub volume: i32,
    pub distortion: i32,
    pub distortion2: i32,
    pub unk2: i16,
    /// The index of the sound in the level's sound list.
    pub list_index: i16,
    pub unk3: i32,
}

impl Record for ModelSound {
    const SIZE: usize = 0x20;

    fn read_record(bytes: &[u8]) -> Result<Self, ParseError> {
        Ok(Cursor::new(bytes).read_le()?)
    }

    fn write_record(&self, bytes: &mut [u8]) -> Result<(), ParseError> {
        Cursor::new(bytes).write_le(self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{hex_bytes, read_records, records_to_bytes, write_records};
    use pretty_assertions::assert_eq;

    #[test]
    fn read_model_sound() {
        let block = hex_bytes(
            "01000000 0000A040 64000000 32000000
             FFFFFFFF 02000000 0300 0700 EFBEADDE",
        );
        let sound = ModelSound::read_record(&block).unwrap();
        assert_eq!(
            ModelSound {
                unk1: 1,
                distance: 5.0,
                master_volume: 100,
                volume: 50,
                distortion: -1,
                distortion2: 2,
                unk2: 3,
                list_index: 7,
                unk3: 0xDEADBEEFu32 as i32,
            },
            sound
        );
    }

    #[test]
    fn model_sound_round_trip() {
        let block = hex_bytes(
            "01000000 0000A040 64000000 32000000
             FFFFFFFF 02000000 0300 0700 EFBEADDE
             00000000 00002041 7F000000 7F000000
             00000000 00000000 FFFF 0000 00000000",
        );
        let sounds = read_records::<ModelSound>(&block, 0, 2).unwrap();
        assert_eq!(10.0, sounds[1].distance);
        assert_eq!(-1, sounds[1].unk2);
        assert_eq!(block, records_to_bytes(&sounds).unwrap());
    }

    #[test]
    fn write_model_sound_at_offset() {
        let mut block = vec![0xAAu8; 0x28];
        let sound = ModelSound {
            distance: 5.0,
            list_index: 2,
            ..Default::default()
        };
        write_records(&mut block, 4, &[sound]).unwrap();

        assert_eq!(
            hex_bytes(
                "AAAAAAAA 00000000 0000A040 00000000 00000000
                 00000000 00000000 0000 0200 00000000 AAAAAAAA"
            ),
            block
        );
    }

    #[test]
    fn read_model_sound_truncated() {
        let block = vec![0u8; 0x1F];
        let result = read_records::<ModelSound>(&block, 0, 1);
        assert!(matches!(result, Err(ParseError::OutOfBounds { .. })));
    }
}
