//! `tagpack-unpack` - decode a tagpack envelope (stdin) to JSON (stdout).
//!
//! Usage:
//!   tagpack-unpack [--compact]

use std::io::{self, Read, Write};
use std::process;

use tagpack::cli::unpack;

fn main() {
    let pretty = !std::env::args().skip(1).any(|arg| arg == "--compact");

    let mut buf = Vec::new();
    if let Err(e) = io::stdin().read_to_end(&mut buf) {
        eprintln!("{e}");
        process::exit(1);
    }

    match unpack(&buf, pretty) {
        Ok(json) => {
            if let Err(e) = writeln!(io::stdout(), "{json}") {
                eprintln!("{e}");
                process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    }
}
