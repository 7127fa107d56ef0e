use assert_cmd::Command;
use predicates::str::{contains, starts_with};
use std::error::Error;
use std::path::Path;

fn ffmpeg_tv_cmd() -> Command {
    Command::cargo_bin("ffmpeg-tv").expect("Failed to find ffmpeg-tv binary")
}

// Writes an `ffmpeg` stand-in into `dir` that records its argv (one per line)
// next to itself and exits with `exit_code`.
#[cfg(unix)]
fn install_fake_ffmpeg(dir: &Path, exit_code: i32) -> Result<(), Box<dyn Error>> {
    use std::os::unix::fs::PermissionsExt;

    let record = dir.join("argv.txt");
    let script = format!(
        "#!/bin/sh\nfor a in \"$@\"; do printf '%s\\n' \"$a\"; done > '{}'\nexit {}\n",
        record.display(),
        exit_code
    );
    let path = dir.join("ffmpeg");
    std::fs::write(&path, script)?;
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))?;
    Ok(())
}

#[cfg(unix)]
fn recorded_argv(dir: &Path) -> Result<Vec<String>, Box<dyn Error>> {
    let text = std::fs::read_to_string(dir.join("argv.txt"))?;
    Ok(text.lines().map(str::to_string).collect())
}

#[cfg(unix)]
#[test]
fn default_run_prints_and_executes_reference_command() -> Result<(), Box<dyn Error>> {
    let bin_dir = tempfile::tempdir()?;
    install_fake_ffmpeg(bin_dir.path(), 0)?;

    let expected = "ffmpeg -i IN -filter:v scale=-1:-1 -c:v libx264 -crf 19 -preset slow \
                    -level 4.1 -sws_flags lanczos -tune film -c:a aac -vbr 5 -map 0 OUT";

    ffmpeg_tv_cmd()
        .env("PATH", bin_dir.path())
        .args(["IN", "OUT"])
        .assert()
        .success()
        .stdout(format!("> {}\n", expected));

    // What was shown is exactly what was run
    let shown: Vec<&str> = expected.split_whitespace().skip(1).collect();
    assert_eq!(recorded_argv(bin_dir.path())?, shown);
    Ok(())
}

#[cfg(unix)]
#[test]
fn exit_code_is_forwarded() -> Result<(), Box<dyn Error>> {
    let bin_dir = tempfile::tempdir()?;
    install_fake_ffmpeg(bin_dir.path(), 7)?;

    ffmpeg_tv_cmd()
        .env("PATH", bin_dir.path())
        .args(["in.mkv", "out.mkv"])
        .assert()
        .code(7)
        .stdout(starts_with("> ffmpeg -i in.mkv"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn overrides_and_trimming_reach_ffmpeg() -> Result<(), Box<dyn Error>> {
    let bin_dir = tempfile::tempdir()?;
    install_fake_ffmpeg(bin_dir.path(), 0)?;

    ffmpeg_tv_cmd()
        .env("PATH", bin_dir.path())
        .args([
            "in.flv",
            "out.mkv",
            "-s",
            "1920:1080",
            "-cb",
            "192k",
            "-ts",
            "30",
            "-td",
            "10",
            "--tune",
            "",
        ])
        .assert()
        .success()
        .stdout(contains("-vbr 5 -b:a 192k -map 0 -ss 30 -t 10 out.mkv"));

    let argv = recorded_argv(bin_dir.path())?;
    assert!(argv.contains(&"scale=1920:1080".to_string()));
    assert!(!argv.contains(&"-tune".to_string()));
    assert_eq!(argv.last().map(String::as_str), Some("out.mkv"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn non_utf8_input_path_reaches_ffmpeg_unchanged() -> Result<(), Box<dyn Error>> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let bin_dir = tempfile::tempdir()?;
    install_fake_ffmpeg(bin_dir.path(), 0)?;
    let input = OsStr::from_bytes(b"caf\xe9.mkv");

    ffmpeg_tv_cmd()
        .env("PATH", bin_dir.path())
        .arg(input)
        .arg("out.mkv")
        .assert()
        .success()
        .stdout(starts_with("> ffmpeg -i caf\u{FFFD}.mkv "));

    let recorded = std::fs::read(bin_dir.path().join("argv.txt"))?;
    let second_line = recorded.split(|b| *b == b'\n').nth(1);
    assert_eq!(second_line, Some(&b"caf\xe9.mkv"[..]));
    Ok(())
}

#[cfg(unix)]
#[test]
fn abbreviated_long_flags_are_accepted() -> Result<(), Box<dyn Error>> {
    let bin_dir = tempfile::tempdir()?;
    install_fake_ffmpeg(bin_dir.path(), 0)?;

    ffmpeg_tv_cmd()
        .env("PATH", bin_dir.path())
        .args(["in.mkv", "out.mkv", "--vid", "libx265", "--time-d", "10"])
        .assert()
        .success()
        .stdout(contains("-c:v libx265 "))
        .stdout(contains("-t 10 out.mkv"));
    Ok(())
}

#[test]
fn missing_ffmpeg_fails_with_not_found_code() -> Result<(), Box<dyn Error>> {
    let empty_dir = tempfile::tempdir()?;

    ffmpeg_tv_cmd()
        .env("PATH", empty_dir.path())
        .env("RUST_LOG", "error")
        .args(["in.mkv", "out.mkv"])
        .assert()
        .code(127)
        .stdout(starts_with("> ffmpeg -i in.mkv"))
        .stderr(contains("Failed to execute ffmpeg"));
    Ok(())
}

#[test]
fn missing_positional_fails_before_spawning() -> Result<(), Box<dyn Error>> {
    ffmpeg_tv_cmd()
        .arg("only-input.mkv")
        .assert()
        .failure()
        .stdout("")
        .stderr(contains("Usage"));
    Ok(())
}

#[test]
fn help_lists_resolved_defaults() -> Result<(), Box<dyn Error>> {
    ffmpeg_tv_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("[default: libx264]"))
        .stdout(contains("[default: 19]"))
        .stdout(contains("--time-duration"))
        .stdout(contains("-td VAL  same as --time-duration VAL"))
        .stdout(contains("127  ffmpeg was not found"));
    Ok(())
}
