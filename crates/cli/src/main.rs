//! The `nsshub` executable.
//!
//! Argument parsing, configuration, and every subcommand live in
//! `nsshub-server`; this binary only hands control to it.

fn main() -> anyhow::Result<()> {
    nsshub_server::run()
}
