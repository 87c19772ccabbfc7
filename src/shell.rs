//! Shell-command availability probes.
//!
//! Setup and validation steps outside the engine need to know whether a
//! command can be run on this machine. The probes here run under
//! `/bin/bash -c` with output discarded and report plain availability.

use std::process::{Command, Stdio};

use tracing::debug;

/// Join a command and its arguments into a single shell line.
pub fn command_string(command: &str, args: &[&str]) -> String {
    if args.is_empty() {
        command.to_string()
    } else {
        format!("{} {}", command, args.join(" "))
    }
}

/// Returns true if the command runs successfully.
///
/// The command's output is discarded; only the exit status matters.
pub fn run_validation_command(command: &str, args: &[&str]) -> bool {
    let cmd = command_string(command, args);
    debug!("running validation command: {cmd}");
    Command::new("/bin/bash")
        .arg("-c")
        .arg(&cmd)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Check if a binary is available in PATH.
pub fn binary_available(name: &str) -> bool {
    run_validation_command("command", &["-v", name])
}
