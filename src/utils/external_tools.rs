use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::process::{Command, Stdio};

/// Checks that `program` can be started. Only a missing executable is an
/// error; aligners print usage and exit non-zero when called without input.
pub fn check_tool(program: &str, hint: &str) -> Result<()> {
    match Command::new(program)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
    {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(e).context(format!(
            "{} not found. {} and ensure it's in your PATH or set its path in config.toml",
            program, hint
        )),
        Err(e) => Err(e).context(format!("Could not run {}", program)),
    }
}

pub fn check_progressive_mauve(path: &str) -> Result<()> {
    check_tool(
        path,
        "Please install progressiveMauve (http://darlinglab.org/mauve/)",
    )
}

pub fn check_x2fa(path: &str) -> Result<()> {
    check_tool(path, "Please install the x2fa.py XMFA to FASTA converter")
}
