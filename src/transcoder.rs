// src/transcoder.rs
use std::ffi::OsString;
use std::io::{self, Write};
use std::process::{Command, ExitStatus};
use log::{debug, error, info, trace};

use crate::error::{Result, TranscodeError};
use crate::options::{EncodingConfig, FFMPEG_PROGRAM};

/// Builds the full ffmpeg argv, program name first and output path last.
///
/// Optional fields are emitted in a fixed order and only when set; the values
/// themselves are passed through untouched.
pub fn build_ffmpeg_args(config: &EncodingConfig) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        FFMPEG_PROGRAM.into(),
        "-i".into(),
        config.input.clone().into_os_string(),
    ];

    let scale_filter = config.scale.as_ref().map(|s| format!("scale={}", s));
    let optional: [(&str, Option<&String>); 13] = [
        ("-filter:v", scale_filter.as_ref()),
        ("-c:v", config.video_encoder.as_ref()),
        ("-crf", config.crf.as_ref()),
        ("-preset", config.preset.as_ref()),
        ("-level", config.level.as_ref()),
        ("-sws_flags", config.resizer.as_ref()),
        ("-tune", config.tune.as_ref()),
        ("-c:a", config.audio_encoder.as_ref()),
        ("-vbr", config.vbr.as_ref()),
        ("-b:a", config.cbr.as_ref()),
        ("-map", config.map.as_ref()),
        ("-ss", config.time_start.as_ref()),
        ("-t", config.time_duration.as_ref()),
    ];

    for (flag, value) in optional {
        if let Some(value) = value {
            args.push(flag.into());
            args.push(value.into());
        }
    }

    args.push(config.output.clone().into_os_string());
    trace!("Built ffmpeg args: {:?}", args);
    args
}

/// The line shown to the user before the command runs.
///
/// Tokens that are not valid UTF-8 are shown lossily; the argv handed to the
/// child is never rebuilt from this line.
pub fn render_command(args: &[OsString]) -> String {
    let tokens: Vec<_> = args.iter().map(|a| a.to_string_lossy()).collect();
    format!("> {}", tokens.join(" "))
}

/// Prints the command to stdout, runs it with inherited stdio and returns the
/// child's exit code.
pub fn run(args: &[OsString]) -> Result<i32> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    run_with_writer(args, &mut handle)
}

/// Same as [`run`], writing the command line to `out` instead of stdout.
pub fn run_with_writer<W: Write>(args: &[OsString], out: &mut W) -> Result<i32> {
    let (program, rest) = args.split_first().ok_or(TranscodeError::EmptyCommand)?;
    let program_name = program.to_string_lossy();

    writeln!(out, "{}", render_command(args)).map_err(TranscodeError::Output)?;
    // Flush before the child starts writing to the same terminal
    out.flush().map_err(TranscodeError::Output)?;

    debug!("Spawning {} with {} arguments", program_name, rest.len());
    let status_res = Command::new(program).args(rest).status();

    match status_res {
        Ok(status) => {
            let code = exit_code(status);
            if status.success() {
                info!("{} finished successfully", program_name);
            } else {
                info!(
                    "{} exited with status: {} (forwarding {})",
                    program_name, status, code
                );
            }
            Ok(code)
        }
        Err(e) => {
            error!("Failed to execute {}: {}", program_name, e);
            Err(TranscodeError::Spawn {
                program: program_name.into_owned(),
                source: e,
            })
        }
    }
}

fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}
