use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranscodeError {
    #[error("Refusing to run an empty command")]
    EmptyCommand,

    #[error("Failed to execute {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write command line: {0}")]
    Output(#[source] io::Error),
}

impl TranscodeError {
    /// Exit status to report when the child never ran (shell conventions).
    pub fn exit_code(&self) -> i32 {
        match self {
            TranscodeError::Spawn { source, .. } => match source.kind() {
                io::ErrorKind::NotFound => 127,
                io::ErrorKind::PermissionDenied => 126,
                _ => 1,
            },
            TranscodeError::EmptyCommand | TranscodeError::Output(_) => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, TranscodeError>;
