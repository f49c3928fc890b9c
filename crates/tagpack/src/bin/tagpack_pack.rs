//! `tagpack-pack` - encode JSON (stdin) to a tagpack envelope (stdout).
//!
//! Usage:
//!   tagpack-pack

use std::io::{self, Read, Write};
use std::process;

use tagpack::cli::pack;

fn main() {
    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        process::exit(1);
    }

    match pack(buf.trim()) {
        Ok(bytes) => {
            if let Err(e) = io::stdout().write_all(&bytes) {
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
