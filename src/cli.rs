// src/cli.rs
//
// Command-line definition. Every optional flag defaults to the release-rule
// value in `options::DEFAULTS`, so `--help` shows exactly what will be used.

use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::options::{non_empty, EncodingConfig, DEFAULTS};

const AFTER_HELP: &str = "\
Two-letter short forms:
  -ve VAL  same as --video-encoder VAL
  -ae VAL  same as --audio-encoder VAL
  -vb VAL  same as --vbr VAL
  -cb VAL  same as --cbr VAL
  -ts VAL  same as --time-start VAL
  -td VAL  same as --time-duration VAL

Exit status:
  ffmpeg's exit status is returned unchanged (128+N if it was killed by signal N).
  Codes set by ffmpeg-tv itself, never by ffmpeg:
    2    invalid arguments; ffmpeg was not started
    127  ffmpeg was not found
    126  ffmpeg could not be executed (permission denied)
    1    any other failure to start ffmpeg";

#[derive(Parser, Debug)]
#[command(
    name = "ffmpeg-tv",
    version,
    about = "FFmpeg TV: encode video following the TV release standards",
    long_about = "Builds an ffmpeg command from TV release defaults plus any overrides, \
                  prints it and runs it. Pass an empty value (e.g. --tune \"\") to drop a flag.",
    after_help = AFTER_HELP,
    infer_long_args = true
)]
pub struct Cli {
    /// input video
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// output video
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// scale
    #[arg(
        short = 's',
        long,
        value_name = "VAL",
        allow_hyphen_values = true,
        default_value = DEFAULTS.scale
    )]
    pub scale: Option<String>,

    /// video encoder [short: -ve]
    #[arg(
        long,
        value_name = "VAL",
        allow_hyphen_values = true,
        default_value = DEFAULTS.video_encoder
    )]
    pub video_encoder: Option<String>,

    /// constant rate factor (crf)
    #[arg(
        short = 'c',
        long,
        value_name = "VAL",
        allow_hyphen_values = true,
        default_value = DEFAULTS.crf
    )]
    pub crf: Option<String>,

    /// preset
    #[arg(
        short = 'p',
        long,
        value_name = "VAL",
        allow_hyphen_values = true,
        default_value = DEFAULTS.preset
    )]
    pub preset: Option<String>,

    /// level
    #[arg(
        short = 'l',
        long,
        value_name = "VAL",
        allow_hyphen_values = true,
        default_value = DEFAULTS.level
    )]
    pub level: Option<String>,

    /// resizer
    #[arg(
        short = 'r',
        long,
        value_name = "VAL",
        allow_hyphen_values = true,
        default_value = DEFAULTS.resizer
    )]
    pub resizer: Option<String>,

    /// tune
    #[arg(
        short = 't',
        long,
        value_name = "VAL",
        allow_hyphen_values = true,
        default_value = DEFAULTS.tune
    )]
    pub tune: Option<String>,

    /// audio encoder [short: -ae]
    #[arg(
        long,
        value_name = "VAL",
        allow_hyphen_values = true,
        default_value = DEFAULTS.audio_encoder
    )]
    pub audio_encoder: Option<String>,

    /// variable bitrate (vbr) [short: -vb]
    #[arg(
        long,
        value_name = "VAL",
        allow_hyphen_values = true,
        default_value = DEFAULTS.vbr
    )]
    pub vbr: Option<String>,

    /// constant bitrate (cbr) [short: -cb]
    #[arg(
        long,
        value_name = "VAL",
        allow_hyphen_values = true,
        default_value = DEFAULTS.cbr
    )]
    pub cbr: Option<String>,

    /// map
    #[arg(
        short = 'm',
        long,
        value_name = "VAL",
        allow_hyphen_values = true,
        default_value = DEFAULTS.map
    )]
    pub map: Option<String>,

    /// time start, in seconds or as a timestamp [short: -ts]
    #[arg(
        long,
        value_name = "VAL",
        allow_hyphen_values = true,
        default_value = DEFAULTS.time_start
    )]
    pub time_start: Option<String>,

    /// time duration, in seconds [short: -td]
    #[arg(
        long,
        value_name = "VAL",
        allow_hyphen_values = true,
        default_value = DEFAULTS.time_duration
    )]
    pub time_duration: Option<String>,
}

/// Two-letter single-dash spellings and the long flag each one stands for.
/// clap only knows single-character shorts, so these are rewritten up front.
const SHORT_ALIASES: [(&str, &str); 6] = [
    ("-ve", "--video-encoder"),
    ("-ae", "--audio-encoder"),
    ("-vb", "--vbr"),
    ("-cb", "--cbr"),
    ("-ts", "--time-start"),
    ("-td", "--time-duration"),
];

/// Rewrites `-ve VAL` / `-ve=VAL` style tokens into their long forms.
///
/// The first token (the binary name) and anything after `--` are left alone.
pub fn expand_short_aliases<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut iter = args.into_iter().map(Into::into);
    let mut expanded: Vec<OsString> = iter.next().into_iter().collect();
    let mut after_separator = false;

    for arg in iter {
        if after_separator {
            expanded.push(arg);
            continue;
        }
        let rewritten = match arg.to_str() {
            Some("--") => {
                after_separator = true;
                None
            }
            Some(token) => expand_token(token),
            None => None,
        };
        expanded.push(rewritten.map(OsString::from).unwrap_or(arg));
    }
    expanded
}

fn expand_token(token: &str) -> Option<String> {
    SHORT_ALIASES.iter().find_map(|(short, long)| {
        if token == *short {
            Some(long.to_string())
        } else {
            token
                .strip_prefix(short)
                .and_then(|rest| rest.strip_prefix('='))
                .map(|value| format!("{}={}", long, value))
        }
    })
}

impl Cli {
    /// Parses the process arguments, exiting with usage on failure.
    pub fn from_env() -> Self {
        Cli::parse_from(expand_short_aliases(std::env::args_os()))
    }

    /// Merged config; empty overrides count as unset.
    pub fn into_config(self) -> EncodingConfig {
        EncodingConfig {
            input: self.input,
            output: self.output,
            scale: non_empty(self.scale),
            video_encoder: non_empty(self.video_encoder),
            crf: non_empty(self.crf),
            preset: non_empty(self.preset),
            level: non_empty(self.level),
            resizer: non_empty(self.resizer),
            tune: non_empty(self.tune),
            audio_encoder: non_empty(self.audio_encoder),
            vbr: non_empty(self.vbr),
            cbr: non_empty(self.cbr),
            map: non_empty(self.map),
            time_start: non_empty(self.time_start),
            time_duration: non_empty(self.time_duration),
        }
    }
}
