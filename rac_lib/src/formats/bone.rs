//! Bone records stored in a model's skeleton blocks.
//! Both [BoneData] and [BoneMatrix] are stored as arrays with one element per bone.
use std::io::Cursor;

use binrw::{BinRead, BinReaderExt, BinWrite, BinWriterExt};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::binary::{read_i16, read_matrix4, write_i16, write_matrix4};
use crate::{Matrix4x4, ParseError, Record};

/// Four unresearched floats stored for each bone.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(BinRead, BinWrite, Debug, PartialEq, Clone, Copy, Default)]
#[brw(little)]
pub struct BoneData {
    pub unk1: f32,
    pub unk2: f32,
    pub unk3: f32,
    pub unk4: f32,
}

impl Record for BoneData {
    const SIZE: usize = 0x10;

    fn read_record(bytes: &[u8]) -> Result<Self, ParseError> {
        Ok(Cursor::new(bytes).read_le()?)
    }

    fn write_record(&self, bytes: &mut [u8]) -> Result<(), ParseError> {
        Cursor::new(bytes).write_le(self)?;
        Ok(())
    }
}

/// A bone's transform and a 16-bit tag.
///
/// The tag is stored in the upper two bytes of the final matrix element at offset 0x3E,
/// so the stored value of the homogeneous coefficient is meaningless.
/// Reading replaces that coefficient with `1.0` and transposes the matrix
/// so the translation is in the last column.
///
/// Writing stores [transform](#structfield.transform) as is without transposing it back.
/// Reading and writing a record is only byte-identical when the stored matrix is symmetric
/// and the lower two bytes of the final element are zero.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct BoneMatrix {
    pub transform: Matrix4x4,
    pub tag: i16,
}

impl Record for BoneMatrix {
    const SIZE: usize = 0x40;

    fn read_record(bytes: &[u8]) -> Result<Self, ParseError> {
        let mut transform = read_matrix4(bytes, 0x00)?;
        let tag = read_i16(bytes, 0x3E)?;
        transform.row4.w = 1.0;
        Ok(Self {
            transform: transform.transpose(),
            tag,
        })
    }

    fn write_record(&self, bytes: &mut [u8]) -> Result<(), ParseError> {
        write_matrix4(bytes, 0x00, &self.transform)?;
        write_i16(bytes, 0x3E, self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{hex_bytes, read_records, records_to_bytes, Vector4};
    use hexlit::hex;

    #[test]
    fn read_bone_data() {
        let block = hex!("0000803F 000000C0 0000003F 00000000");
        let value = BoneData::read_record(&block).unwrap();
        assert_eq!(
            BoneData {
                unk1: 1.0,
                unk2: -2.0,
                unk3: 0.5,
                unk4: 0.0
            },
            value
        );
    }

    #[test]
    fn bone_data_round_trip() {
        let block = hex_bytes(
            "0000803F 000000C0 0000003F 00000000
             0000A040 00004040 CDCCCC3D 000080BF",
        );
        let values = read_records::<BoneData>(&block, 0, 2).unwrap();
        assert_eq!(5.0, values[1].unk1);
        assert_eq!(block, records_to_bytes(&values).unwrap());
    }

    #[test]
    fn bone_data_offset() {
        let block = hex_bytes("FFFFFFFF 0000803F 00000040 00004040 00008040");
        let values = read_records::<BoneData>(&block, 4, 1).unwrap();
        assert_eq!(4.0, values[0].unk4);
    }

    #[test]
    fn read_bone_matrix_transposes() {
        let block = hex_bytes(
            "0000803F 00000000 00000000 00000000
             00000000 0000803F 00000000 00000000
             00000000 00000000 0000803F 00000000
             0000803F 00000040 00004040 00000500",
        );
        let value = BoneMatrix::read_record(&block).unwrap();
        assert_eq!(5, value.tag);
        assert_eq!(Vector4::new(1.0, 0.0, 0.0, 1.0), value.transform.row1);
        assert_eq!(Vector4::new(0.0, 1.0, 0.0, 2.0), value.transform.row2);
        assert_eq!(Vector4::new(0.0, 0.0, 1.0, 3.0), value.transform.row3);
        assert_eq!(Vector4::new(0.0, 0.0, 0.0, 1.0), value.transform.row4);
    }

    #[test]
    fn read_bone_matrix_negative_tag() {
        let mut block = vec![0u8; 0x40];
        block[0x3E..].copy_from_slice(&hex!("FEFF"));
        let value = BoneMatrix::read_record(&block).unwrap();
        assert_eq!(-2, value.tag);
        assert_eq!(1.0, value.transform.row4.w);
    }

    #[test]
    fn bone_matrix_round_trip_is_not_identical() {
        let block = hex_bytes(
            "0000803F 00000000 00000000 00000000
             00000000 0000803F 00000000 00000000
             00000000 00000000 0000803F 00000000
             0000803F 00000040 00004040 00000500",
        );
        let values = read_records::<BoneMatrix>(&block, 0, 1).unwrap();

        // The translation is written back to the last column instead of the last row.
        let expected = hex_bytes(
            "0000803F 00000000 00000000 0000803F
             00000000 0000803F 00000000 00000040
             00000000 00000000 0000803F 00004040
             00000000 00000000 00000000 00000500",
        );
        let written = records_to_bytes(&values).unwrap();
        assert_ne!(block, written);
        assert_eq!(expected, written);
    }

    #[test]
    fn bone_matrix_round_trip_symmetric() {
        let block = hex_bytes(
            "0000803F 00000000 00000000 00000000
             00000000 00000040 00000000 00000000
             00000000 00000000 00004040 00000000
             00000000 00000000 00000000 00000700",
        );
        let values = read_records::<BoneMatrix>(&block, 0, 1).unwrap();
        assert_eq!(block, records_to_bytes(&values).unwrap());
    }
}
