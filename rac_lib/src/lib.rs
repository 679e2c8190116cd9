//! # rac_lib
//!
//! rac_lib is a library for reading and writing the model and animation blocks used by the PS2 Ratchet & Clank games.
//!
//! The game files are flat dumps with data stored at fixed offsets.
//! There is no header describing the layout, so every read takes the offset of the data and
//! the offsets are usually found in some other table earlier in the file.
//! The types in each of the format modules represent the bytes of a single record or block.
//! Unless noted in the type's documentation, reading and writing a record without any modifications
//! produces the same bytes as the original.
//!
//! ## Records
//! Most model data is stored as arrays of fixed size records such as [BoneData](formats::bone::BoneData)
//! or [ModelSound](formats::sound::ModelSound). These types implement [Record] and can be read in bulk with [read_records].
/*!
```rust
use rac_lib::formats::sound::ModelSound;
use rac_lib::{read_records, records_to_bytes};

# fn main() -> Result<(), rac_lib::ParseError> {
let block = vec![0u8; 64];
let sounds = read_records::<ModelSound>(&block, 0, 2)?;
assert_eq!(2, sounds.len());
assert_eq!(block, records_to_bytes(&sounds)?);
# Ok(())
# }
```
 */
//!
//! ## Animations
//! Animations are stored as a header followed by a table of frame pointers relative to the start of the model.
//! See [Animation](formats::anim::Animation) for details.
pub mod binary;
pub mod formats;
mod vectors;

pub use vectors::{Matrix4x4, Vector4};

use std::fmt;
use std::io::{Read, Seek, SeekFrom};
use std::str::FromStr;

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors while reading or writing binary data.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The data at `offset` extends past the end of the buffer.
    #[error(
        "Reading {} bytes at offset {:#x} is out of bounds for a buffer of length {:#x}.",
        size,
        offset,
        len
    )]
    OutOfBounds { offset: usize, size: usize, len: usize },

    /// An error occurred while reading from or seeking the underlying stream.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// An error occurred while decoding a record.
    #[error(transparent)]
    BinRead(#[from] binrw::Error),
}

/// The supported games.
/// Each game uses slightly different layouts for level data.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameType {
    RaC1,
    RaC2,
    RaC3,
    Deadlocked,
}

/// The size in bytes of a single moby instance for each [GameType] in declaration order.
const MOBY_SIZES: [usize; 4] = [0x78, 0x80, 0x80, 0x74];

const GAME_KEYS: [&str; 4] = ["rc1", "rc2", "rc3", "dl"];

impl GameType {
    /// All games in release order.
    pub const ALL: [GameType; 4] = [
        GameType::RaC1,
        GameType::RaC2,
        GameType::RaC3,
        GameType::Deadlocked,
    ];

    fn index(self) -> usize {
        match self {
            GameType::RaC1 => 0,
            GameType::RaC2 => 1,
            GameType::RaC3 => 2,
            GameType::Deadlocked => 3,
        }
    }

    /// The size in bytes of each moby element in the level's moby table.
    /**
    ```rust
    use rac_lib::GameType;

    assert_eq!(0x78, GameType::RaC1.moby_size());
    assert_eq!(0x74, GameType::Deadlocked.moby_size());
    ```
    */
    pub fn moby_size(self) -> usize {
        MOBY_SIZES[self.index()]
    }

    /// The short lowercase name used in configuration and file names like "rc2".
    pub fn key(self) -> &'static str {
        GAME_KEYS[self.index()]
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The key did not match any [GameType::key].
#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unrecognized game {0:?}. Expected one of rc1, rc2, rc3, dl.")]
pub struct UnknownGameError(pub String);

impl FromStr for GameType {
    type Err = UnknownGameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        GameType::ALL
            .iter()
            .copied()
            .find(|g| g.key() == key)
            .ok_or_else(|| UnknownGameError(s.to_string()))
    }
}

/// A record with a fixed size in bytes stored in arrays with no padding between elements.
pub trait Record: Sized {
    /// The stride in bytes between successive records.
    const SIZE: usize;

    /// Decodes the record from `bytes`, which contains exactly [Record::SIZE] bytes.
    fn read_record(bytes: &[u8]) -> Result<Self, ParseError>;

    /// Encodes the record into `bytes`, which contains exactly [Record::SIZE] bytes.
    fn write_record(&self, bytes: &mut [u8]) -> Result<(), ParseError>;
}

/// Reads `count` consecutive records starting at `offset` in `block`.
pub fn read_records<T: Record>(
    block: &[u8],
    offset: usize,
    count: usize,
) -> Result<Vec<T>, ParseError> {
    (0..count)
        .map(|i| {
            let start = offset + i * T::SIZE;
            T::read_record(binary::slice(block, start, T::SIZE)?)
        })
        .collect()
}

/// Writes `records` consecutively starting at `offset` in `block`.
/// The block is not resized, so it must already be large enough to hold every record.
pub fn write_records<T: Record>(
    block: &mut [u8],
    offset: usize,
    records: &[T],
) -> Result<(), ParseError> {
    for (i, record) in records.iter().enumerate() {
        let start = offset + i * T::SIZE;
        record.write_record(binary::slice_mut(block, start, T::SIZE)?)?;
    }
    Ok(())
}

/// Creates a new block containing the encoded `records`.
pub fn records_to_bytes<T: Record>(records: &[T]) -> Result<Vec<u8>, ParseError> {
    let mut block = vec![0u8; records.len() * T::SIZE];
    write_records(&mut block, 0, records)?;
    Ok(block)
}

/// Reads `len` bytes starting at `offset` from `reader`.
/// The reader's position is left at the end of the block.
pub fn read_block<R: Read + Seek>(
    reader: &mut R,
    offset: u64,
    len: usize,
) -> Result<Vec<u8>, ParseError> {
    reader.seek(SeekFrom::Start(offset))?;
    let mut block = vec![0u8; len];
    reader.read_exact(&mut block)?;
    Ok(block)
}

#[cfg(test)]
pub(crate) fn hex_bytes(hex: &str) -> Vec<u8> {
    // Remove any whitespace used to make the tests more readable.
    let no_whitespace: String = hex.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(no_whitespace).unwrap()
}
