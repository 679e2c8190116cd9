//! The supported binary record and block layouts.
//! All offsets in the documentation are relative to the start of the record.

pub mod anim;
pub mod bone;
pub mod frame;
pub mod sound;
