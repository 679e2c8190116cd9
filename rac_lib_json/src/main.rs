use clap::{Parser, Subcommand, ValueEnum};
use log::{error, info};
use rac_lib::formats::anim::Animation;
use rac_lib::formats::bone::{BoneData, BoneMatrix};
use rac_lib::formats::sound::ModelSound;
use rac_lib::{read_records, records_to_bytes, Record};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// The distance from the model to an encoded animation.
/// An animation at the model offset would read back as an empty slot when the model offset is 0.
const ANIMATION_START: u64 = 0x10;

/// Convert records in Ratchet & Clank level data to and from JSON.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read the animation at the given offsets.
    Anim {
        input: PathBuf,
        /// The absolute offset of the model used for frame pointers
        #[arg(long, value_parser = parse_number::<u32>)]
        model_offset: u32,
        /// The absolute offset of the animation header
        #[arg(long, value_parser = parse_number::<i32>)]
        animation_offset: i32,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Read an array of records at the given offset.
    Records {
        #[arg(value_enum)]
        kind: RecordKind,
        input: PathBuf,
        #[arg(long, value_parser = parse_number::<usize>)]
        offset: usize,
        #[arg(long, value_parser = parse_number::<usize>)]
        count: usize,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write the JSON from a previous command back to binary.
    ///
    /// Animations are written 0x10 bytes after the model offset.
    /// Read them back with `anim --model-offset <model offset> --animation-offset <model offset + 0x10>`.
    Encode {
        #[arg(value_enum)]
        kind: EncodeKind,
        input: PathBuf,
        /// The offset of the model relative to the start of the output for animation frame pointers
        #[arg(long, default_value = "0", value_parser = parse_number::<u64>)]
        model_offset: u64,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum RecordKind {
    Bones,
    BoneMatrices,
    Sounds,
}

#[derive(Clone, Copy, ValueEnum)]
enum EncodeKind {
    Anim,
    Bones,
    BoneMatrices,
    Sounds,
}

fn parse_number<T>(s: &str) -> Result<T, String>
where
    T: TryFrom<i64>,
{
    let value = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => i64::from_str_radix(hex, 16),
        None => s.parse::<i64>(),
    }
    .map_err(|e| format!("{s:?} is not a valid number: {e}"))?;
    T::try_from(value).map_err(|_| format!("{s:?} is out of range"))
}

fn read_data_write_json<T: Serialize, F: Fn(&[u8]) -> Result<T, Box<dyn Error>>>(
    input_path: &Path,
    output_path: Option<PathBuf>,
    read_t: F,
) -> Result<(), Box<dyn Error>> {
    // Modify the input if no output is specified to allow dragging a file onto the executable.
    let json_output_path = output_path.unwrap_or_else(|| append_extension(input_path, "json"));

    let parse_start_time = Instant::now();
    let bytes = std::fs::read(input_path)?;
    let data = read_t(&bytes)?;
    info!("Parse: {:?}", parse_start_time.elapsed());

    let json = serde_json::to_string_pretty(&data)?;
    std::fs::write(json_output_path, json)?;
    Ok(())
}

fn read_json_write_data<T: DeserializeOwned, F: Fn(&T) -> Result<Vec<u8>, Box<dyn Error>>>(
    input_path: &Path,
    output_path: Option<PathBuf>,
    write_t: F,
) -> Result<(), Box<dyn Error>> {
    let output_path = output_path.unwrap_or_else(|| input_path.with_extension("bin"));

    let json = std::fs::read_to_string(input_path)?;
    let data = serde_json::from_str::<T>(&json)?;

    let export_time = Instant::now();
    let bytes = write_t(&data)?;
    std::fs::write(output_path, bytes)?;
    info!("Export: {:?}", export_time.elapsed());
    Ok(())
}

fn append_extension(path: &Path, extension: &str) -> PathBuf {
    let mut path = path.as_os_str().to_owned();
    path.push(".");
    path.push(extension);
    path.into()
}

fn records_json<T: Record + Serialize>(
    input: &Path,
    output: Option<PathBuf>,
    offset: usize,
    count: usize,
) -> Result<(), Box<dyn Error>> {
    read_data_write_json(input, output, |bytes| {
        Ok(read_records::<T>(bytes, offset, count)?)
    })
}

fn json_records<T: Record + DeserializeOwned>(
    input: &Path,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn Error>> {
    read_json_write_data(input, output, |records: &Vec<T>| {
        Ok(records_to_bytes(records)?)
    })
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Command::Anim {
            input,
            model_offset,
            animation_offset,
            output,
        } => read_data_write_json(&input, output, |bytes| {
            Ok(Animation::read(
                &mut Cursor::new(bytes),
                model_offset,
                animation_offset,
            )?)
        }),
        Command::Records {
            kind,
            input,
            offset,
            count,
            output,
        } => match kind {
            RecordKind::Bones => records_json::<BoneData>(&input, output, offset, count),
            RecordKind::BoneMatrices => {
                records_json::<BoneMatrix>(&input, output, offset, count)
            }
            RecordKind::Sounds => records_json::<ModelSound>(&input, output, offset, count),
        },
        Command::Encode {
            kind,
            input,
            model_offset,
            output,
        } => match kind {
            EncodeKind::Anim => read_json_write_data(&input, output, |anim: &Animation| {
                // Pad with zeros up to the animation so pointers can be relative to the model.
                let mut writer = Cursor::new(Vec::new());
                writer.set_position(model_offset + ANIMATION_START);
                let animation_offset = anim.write(&mut writer, model_offset)?;
                info!(
                    "Wrote animation at {:#x} for model at {:#x}",
                    animation_offset, model_offset
                );
                Ok(writer.into_inner())
            }),
            EncodeKind::Bones => json_records::<BoneData>(&input, output),
            EncodeKind::BoneMatrices => json_records::<BoneMatrix>(&input, output),
            EncodeKind::Sounds => json_records::<ModelSound>(&input, output),
        },
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rac_lib::formats::frame::Frame;
    use tempfile::TempDir;

    fn records(dir: &TempDir, kind: RecordKind, block: &[u8], offset: usize, count: usize) -> PathBuf {
        let input = dir.path().join("block.bin");
        let json = dir.path().join("records.json");
        std::fs::write(&input, block).unwrap();
        run(Cli {
            command: Command::Records {
                kind,
                input,
                offset,
                count,
                output: Some(json.clone()),
            },
        })
        .unwrap();
        json
    }

    fn encode(dir: &TempDir, kind: EncodeKind, json: PathBuf, model_offset: u64) -> Vec<u8> {
        let output = dir.path().join("encoded.bin");
        run(Cli {
            command: Command::Encode {
                kind,
                input: json,
                model_offset,
                output: Some(output.clone()),
            },
        })
        .unwrap();
        std::fs::read(output).unwrap()
    }

    fn f32_bytes(values: &[f32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    fn animation() -> Animation {
        Animation {
            unk1: 1.0,
            unk5: 2,
            speed: 0.5,
            frames: vec![
                Frame {
                    speed: 1.0,
                    frame_index: 0,
                    frame_length: 1,
                    sec0_pointer: 0x10,
                    sec0_count: 1,
                    translation_pointer: 0,
                    translation_count: 0,
                    data: (0u8..16).collect(),
                },
                Frame {
                    speed: 1.0,
                    frame_index: 1,
                    frame_length: 0,
                    sec0_pointer: 0,
                    sec0_count: 0,
                    translation_pointer: 0,
                    translation_count: 0,
                    data: Vec::new(),
                },
            ],
            ..Default::default()
        }
    }

    fn decode_animation(dir: &TempDir, bytes: &[u8], model_offset: u32, animation_offset: i32) -> Animation {
        let input = dir.path().join("anim.bin");
        let json = dir.path().join("anim.bin.json");
        std::fs::write(&input, bytes).unwrap();
        run(Cli {
            command: Command::Anim {
                input,
                model_offset,
                animation_offset,
                output: None,
            },
        })
        .unwrap();
        serde_json::from_str(&std::fs::read_to_string(json).unwrap()).unwrap()
    }

    fn encode_animation(dir: &TempDir, animation: &Animation, model_offset: u64) -> Vec<u8> {
        let json = dir.path().join("anim.json");
        std::fs::write(&json, serde_json::to_string(animation).unwrap()).unwrap();
        encode(dir, EncodeKind::Anim, json, model_offset)
    }

    #[test]
    fn bones_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut block = vec![0xEEu8; 4];
        block.extend(f32_bytes(&[1.0, -2.0, 0.5, 0.0, 3.0, 4.0, 5.0, 6.0]));

        let json = records(&dir, RecordKind::Bones, &block, 4, 2);
        assert_eq!(block[4..].to_vec(), encode(&dir, EncodeKind::Bones, json, 0));
    }

    #[test]
    fn sounds_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut block = Vec::new();
        for i in 0..2i32 {
            block.extend(i.to_le_bytes());
            block.extend(5.0f32.to_le_bytes());
            for value in [100i32, 80, 0, 1] {
                block.extend((value + i).to_le_bytes());
            }
            block.extend((-1i16).to_le_bytes());
            block.extend((i as i16).to_le_bytes());
            block.extend(0i32.to_le_bytes());
        }
        assert_eq!(0x40, block.len());

        let json = records(&dir, RecordKind::Sounds, &block, 0, 2);
        assert_eq!(block, encode(&dir, EncodeKind::Sounds, json, 0));
    }

    #[test]
    fn bone_matrices_json_transposed() {
        let dir = tempfile::tempdir().unwrap();
        // The tag 7 occupies the upper bytes of the last element.
        let mut block = f32_bytes(&[
            1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0,
        ]);
        block.extend([0x00, 0x00, 0x07, 0x00]);

        let json = records(&dir, RecordKind::BoneMatrices, &block, 0, 1);
        let matrices: Vec<BoneMatrix> =
            serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
        assert_eq!(7, matrices[0].tag);

        // The matrix is written in its transposed form.
        let mut expected = f32_bytes(&[
            1.0, 5.0, 9.0, 13.0, 2.0, 6.0, 10.0, 14.0, 3.0, 7.0, 11.0, 15.0, 4.0, 8.0, 12.0,
        ]);
        expected.extend([0x00, 0x00, 0x07, 0x00]);
        assert_eq!(expected, encode(&dir, EncodeKind::BoneMatrices, json, 0));
    }

    #[test]
    fn anim_json_round_trip_default_offset() {
        let dir = tempfile::tempdir().unwrap();
        let animation = animation();

        let bytes = encode_animation(&dir, &animation, 0);
        assert_eq!(
            animation,
            decode_animation(&dir, &bytes, 0, ANIMATION_START as i32)
        );
    }

    #[test]
    fn anim_json_round_trip_model_offset() {
        let dir = tempfile::tempdir().unwrap();
        let animation = animation();

        let bytes = encode_animation(&dir, &animation, 0x40);
        // The output is zero padded up to the animation.
        assert!(bytes[..0x50].iter().all(|b| *b == 0));
        assert_eq!(&0.5f32.to_le_bytes()[..], &bytes[0x50 + 0x18..0x50 + 0x1C]);
        assert_eq!(animation, decode_animation(&dir, &bytes, 0x40, 0x50));

        // Encoding the decoded JSON produces the same file.
        let json = dir.path().join("anim.bin.json");
        assert_eq!(bytes, encode(&dir, EncodeKind::Anim, json, 0x40));
    }

    #[test]
    fn parse_numbers() {
        assert_eq!(Ok(16u32), parse_number::<u32>("0x10"));
        assert_eq!(Ok(16usize), parse_number::<usize>("16"));
        assert_eq!(Ok(-4i32), parse_number::<i32>("-4"));
        assert!(parse_number::<u32>("-4").is_err());
        assert!(parse_number::<u32>("abc").is_err());
    }

    #[test]
    fn output_path_appends_json() {
        assert_eq!(
            PathBuf::from("level/engine.ps3.json"),
            append_extension(Path::new("level/engine.ps3"), "json")
        );
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
