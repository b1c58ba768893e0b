//! Command-line argument surface (spec §6):
//!
//! ```text
//! pngveil -i <input_path> [-e <string> | -d <output_filename>] [-o <output_dir>] [-help]
//! ```
//!
//! `-e` takes the literal payload text to embed; `-d` switches to decode
//! mode and optionally names the output file. Decode is the default mode
//! when neither is given, matching the original CLI.

use std::path::PathBuf;

use clap::Parser;

use crate::error::{Error, Result};

#[derive(Parser, Debug)]
#[command(name = "pngveil", about = "LSB steganographic codec for PNG images", version)]
pub struct Cli {
    /// The PNG to encode into, or decode from.
    #[arg(short = 'i', long = "input", value_name = "PATH")]
    pub input: PathBuf,

    /// Payload text to embed. Presence switches mode to encode.
    #[arg(short = 'e', long = "encode", value_name = "STRING")]
    pub encode: Option<String>,

    /// Switches mode to decode and optionally names the output file.
    /// `-d` alone is equivalent to the default mode with a default filename.
    #[arg(short = 'd', long = "decode", value_name = "FILENAME", num_args = 0..=1, default_missing_value = "")]
    pub decode: Option<String>,

    /// Directory to write the output into. Defaults to the current directory.
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

pub enum Mode {
    Encode { payload: String },
    Decode { output_filename: Option<String> },
}

impl Cli {
    pub fn mode(&self) -> Result<Mode> {
        match (&self.encode, &self.decode) {
            (Some(_), Some(_)) => Err(Error::InvalidArgument(
                "-e and -d are mutually exclusive".into(),
            )),
            (Some(payload), None) => Ok(Mode::Encode { payload: payload.clone() }),
            (None, Some(filename)) => Ok(Mode::Decode {
                output_filename: if filename.is_empty() { None } else { Some(filename.clone()) },
            }),
            (None, None) => Ok(Mode::Decode { output_filename: None }),
        }
    }

    fn default_filename(&self, extension: &str) -> PathBuf {
        let stem = self.input.file_stem().unwrap_or_default();
        PathBuf::from(stem).with_extension(extension)
    }

    /// Resolves the final output path: the mode's filename (explicit or
    /// defaulted) joined onto `-o`'s directory, if given.
    pub fn resolve_output(&self, mode: &Mode) -> PathBuf {
        let filename = match mode {
            Mode::Encode { .. } => self.default_filename("png"),
            Mode::Decode { output_filename: Some(name) } => PathBuf::from(name),
            Mode::Decode { output_filename: None } => self.default_filename("txt"),
        };
        match &self.output_dir {
            Some(dir) => dir.join(filename),
            None => filename,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(input: &str, encode: Option<&str>, decode: Option<&str>, output_dir: Option<&str>) -> Cli {
        Cli {
            input: PathBuf::from(input),
            encode: encode.map(String::from),
            decode: decode.map(String::from),
            output_dir: output_dir.map(PathBuf::from),
        }
    }

    #[test]
    fn defaults_to_decode_mode() {
        let c = cli("carrier.png", None, None, None);
        assert!(matches!(c.mode().unwrap(), Mode::Decode { output_filename: None }));
    }

    #[test]
    fn encode_output_defaults_to_png_basename() {
        let c = cli("cover.jpg", Some("secret"), None, None);
        let mode = c.mode().unwrap();
        assert_eq!(c.resolve_output(&mode), PathBuf::from("cover.png"));
    }

    #[test]
    fn decode_output_defaults_to_txt_basename() {
        let c = cli("carrier.png", None, None, None);
        let mode = c.mode().unwrap();
        assert_eq!(c.resolve_output(&mode), PathBuf::from("carrier.txt"));
    }

    #[test]
    fn explicit_decode_filename_overrides_default() {
        let c = cli("carrier.png", None, Some("message.bin"), None);
        let mode = c.mode().unwrap();
        assert_eq!(c.resolve_output(&mode), PathBuf::from("message.bin"));
    }

    #[test]
    fn output_dir_is_joined_onto_the_filename() {
        let c = cli("carrier.png", None, None, Some("out"));
        let mode = c.mode().unwrap();
        assert_eq!(c.resolve_output(&mode), PathBuf::from("out/carrier.txt"));
    }

    #[test]
    fn rejects_both_encode_and_decode() {
        let c = cli("a.png", Some("x"), Some("y.txt"), None);
        assert!(matches!(c.mode(), Err(Error::InvalidArgument(_))));
    }
}
