use std::process::Command;

/// Create a new appsig CLI command
pub fn appsig() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_appsig"));
    // Keep the output deterministic regardless of the caller's environment
    cmd.env_remove("APPSIG_PACKAGE").env("RUST_LOG", "warn");
    cmd
}
