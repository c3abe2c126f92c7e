//! Regenerate `src/scripts.rs` from the `--help` output of each check
//!
//! Run from the repo root after `cargo build`:
//!
//! ```plain
//! cargo run -p make-docs > src/scripts.rs
//! ```

use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{self, Command};

struct Check {
    name: &'static str,
    about: &'static str,
}

const PREAMBLE: &str = "Documentation about the various scripts contained herein\n";

const CHECKS: &[Check] = &[Check {
    name: "check-mysql-connections",
    about: "Needs network or socket access to a MySQL-compatible server.",
}];

fn main() {
    let bin_dir = env::var_os("CARGO_TARGET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("target"))
        .join("debug");

    let mut helps = Vec::with_capacity(CHECKS.len());
    for check in CHECKS {
        match help_text(&bin_dir, check.name) {
            Ok(help) => helps.push(help),
            Err(e) => {
                eprintln!("Couldn't get help for {}: {}", check.name, e);
                process::exit(1);
            }
        }
    }
    print!("{}", render(CHECKS, &helps));
}

fn help_text(bin_dir: &Path, name: &str) -> io::Result<String> {
    let output = Command::new(bin_dir.join(name)).arg("--help").output()?;
    String::from_utf8(output.stdout).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn render(checks: &[Check], helps: &[String]) -> String {
    let mut out = cp(PREAMBLE.split('\n'));
    out.push('\n');
    out.push_str(&cp(checks.iter().map(|c| format!("- [{0}](#{0})", c.name))));
    out.push('\n');
    for (check, help) in checks.iter().zip(helps) {
        out.push_str(&format!(
            "//!\n//! # {0}\n//!\n//! {1}\n//!\n//! ```plain\n//! $ {0} --help\n",
            check.name, check.about
        ));
        out.push_str(&cp(help.split('\n')));
        out.push_str("\n//! ```\n");
    }
    out
}

/// Comment each line in the iterator
fn cp<S: AsRef<str>, I: Iterator<Item = S>>(s: I) -> String {
    s.map(|s| format!("//! {}", s.as_ref()))
        .map(|s| s.trim().into())
        .collect::<Vec<String>>()
        .join("\n")
}
