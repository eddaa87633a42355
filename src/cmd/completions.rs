//! Completions command implementation
//!
//! Handles the `ipa-diff completions` command which generates
//! shell completion scripts for bash, zsh, fish, etc.

use clap::{Arg, ArgAction, Command};
use clap_complete::{generate, Shell};
use std::io::Write;

/// Command tree used for completion scripts
///
/// Mirrors the derive-based `Cli` in the binary, which the library cannot see.
pub fn completion_command() -> Command {
    Command::new("ipa-diff")
        .version(env!("CARGO_PKG_VERSION"))
        .about("IPA package size comparison")
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .help("Disable colored output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("compare")
                .about("Compare two packages")
                .arg(Arg::new("old").value_name("OLD"))
                .arg(Arg::new("new").value_name("NEW"))
                .arg(Arg::new("json").long("json").action(ArgAction::SetTrue))
                .arg(Arg::new("open").long("open").action(ArgAction::SetTrue))
                .arg(Arg::new("no-write").long("no-write").action(ArgAction::SetTrue))
                .arg(
                    Arg::new("output-dir")
                        .long("output-dir")
                        .short('o')
                        .value_name("DIR"),
                ),
        )
        .subcommand(
            Command::new("init")
                .about("Write a default .ipa-diff.toml")
                .arg(Arg::new("force").long("force").short('f').action(ArgAction::SetTrue)),
        )
        .subcommand(Command::new("completions").about("Generate shell completions"))
}

/// Write the completion script for `shell` to `out`
pub fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = completion_command();
    generate(shell, &mut cmd, "ipa-diff", out);
}

/// Generate shell completion scripts
///
/// Outputs completion script for the specified shell to stdout.
/// Users can redirect this to their shell's completion directory.
///
/// # Examples
///
/// ```bash
/// # Bash
/// ipa-diff completions bash > /etc/bash_completion.d/ipa-diff
///
/// # Zsh
/// ipa-diff completions zsh > ~/.zfunc/_ipa-diff
///
/// # Fish
/// ipa-diff completions fish > ~/.config/fish/completions/ipa-diff.fish
/// ```
pub fn cmd_completions(shell: Shell) {
    write_completions(shell, &mut std::io::stdout());
}
