//! # Generate Key Utility
//!
//! Prints a freshly generated random secret, base64url-encoded, for use as
//! `JWT_SECRET`.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --package gen-key --bin gen_key -- --len 64
//! ```

use clap::Parser;
use lib_utils::b64u_encode;
use rand::rngs::OsRng;
use rand::RngCore;

/// Shortest key the tool will produce; matches the auth config minimum.
const MIN_KEY_LEN: usize = 32;

#[derive(Parser)]
#[command(name = "gen_key")]
#[command(about = "Generate a random signing secret for JWT_SECRET")]
struct Cli {
    /// Number of random bytes
    #[arg(long, default_value_t = 64, value_parser = parse_len)]
    len: usize,
}

fn parse_len(raw: &str) -> Result<usize, String> {
    let len: usize = raw.parse().map_err(|_| format!("not a number: {raw}"))?;
    if len < MIN_KEY_LEN {
        return Err(format!("must be at least {MIN_KEY_LEN} bytes"));
    }
    Ok(len)
}

fn generate_key(len: usize) -> String {
    let mut key = vec![0u8; len];
    OsRng.fill_bytes(&mut key);
    b64u_encode(key)
}

fn main() {
    let cli = Cli::parse();

    println!("{}", generate_key(cli.len));
}
