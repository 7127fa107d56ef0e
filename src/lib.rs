pub mod cli;
pub mod error;
pub mod options;
pub mod transcoder;

pub use error::{Result, TranscodeError};
pub use options::{EncodingConfig, DEFAULTS};
pub use transcoder::{build_ffmpeg_args, run};
