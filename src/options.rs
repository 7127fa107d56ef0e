use std::path::PathBuf;

/// Program invoked for every encode.
pub const FFMPEG_PROGRAM: &str = "ffmpeg";

/// Release-rule defaults applied when the user gives no override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingDefaults {
    /// `<width>:<height>`; -1 keeps the aspect ratio.
    pub scale: Option<&'static str>,
    /// x264 8-bit is mandatory.
    pub video_encoder: Option<&'static str>,
    /// Allowed range is 18-23.
    pub crf: Option<&'static str>,
    /// Nothing faster than slow.
    pub preset: Option<&'static str>,
    pub level: Option<&'static str>,
    /// Sharp resizers only.
    pub resizer: Option<&'static str>,
    /// film, grain or animation.
    pub tune: Option<&'static str>,
    pub audio_encoder: Option<&'static str>,
    /// 1 (lowest) to 5 (highest).
    pub vbr: Option<&'static str>,
    pub cbr: Option<&'static str>,
    /// 0 = every input stream.
    pub map: Option<&'static str>,
    pub time_start: Option<&'static str>,
    pub time_duration: Option<&'static str>,
}

pub const DEFAULTS: EncodingDefaults = EncodingDefaults {
    scale: Some("-1:-1"),
    video_encoder: Some("libx264"),
    crf: Some("19"),
    preset: Some("slow"),
    level: Some("4.1"),
    resizer: Some("lanczos"),
    tune: Some("film"),
    audio_encoder: Some("aac"),
    vbr: Some("5"),
    cbr: None,
    map: Some("0"),
    time_start: None,
    time_duration: None,
};

/// Everything needed to build one ffmpeg invocation.
///
/// `None` on an optional field means the matching flag is left off the command
/// line entirely. Paths stay OS strings so they reach ffmpeg byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub scale: Option<String>,
    pub video_encoder: Option<String>,
    pub crf: Option<String>,
    pub preset: Option<String>,
    pub level: Option<String>,
    pub resizer: Option<String>,
    pub tune: Option<String>,
    pub audio_encoder: Option<String>,
    pub vbr: Option<String>,
    pub cbr: Option<String>,
    pub map: Option<String>,
    pub time_start: Option<String>,
    pub time_duration: Option<String>,
}

impl EncodingConfig {
    /// Config for `input` -> `output` with every default from [`DEFAULTS`].
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        let d = DEFAULTS;
        let own = |v: Option<&'static str>| v.map(str::to_string);
        EncodingConfig {
            input: input.into(),
            output: output.into(),
            scale: own(d.scale),
            video_encoder: own(d.video_encoder),
            crf: own(d.crf),
            preset: own(d.preset),
            level: own(d.level),
            resizer: own(d.resizer),
            tune: own(d.tune),
            audio_encoder: own(d.audio_encoder),
            vbr: own(d.vbr),
            cbr: own(d.cbr),
            map: own(d.map),
            time_start: own(d.time_start),
            time_duration: own(d.time_duration),
        }
    }

    /// Config for `input` -> `output` with every optional field unset.
    pub fn bare(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        EncodingConfig {
            input: input.into(),
            output: output.into(),
            scale: None,
            video_encoder: None,
            crf: None,
            preset: None,
            level: None,
            resizer: None,
            tune: None,
            audio_encoder: None,
            vbr: None,
            cbr: None,
            map: None,
            time_start: None,
            time_duration: None,
        }
    }
}

/// Treats an empty override as "unset", which is how a default gets switched off.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
