//! # Auth CLI
//!
//! Operator tool for the credential primitives: hash and check passwords,
//! issue, verify, and inspect tokens from a shell.
//!
//! ## Usage
//!
//! ```bash
//! echo -n 'hunter2' | cargo run -p auth-cli --bin auth_cli -- hash-pwd
//! cargo run -p auth-cli --bin auth_cli -- issue -c sub=u1 -c admin=true --ttl 3600
//! cargo run -p auth-cli --bin auth_cli -- verify <token>
//! ```
//!
//! Token commands need `JWT_SECRET` (and optionally `JWT_TTL_SECS`) in the
//! environment or a `.env` file. Passwords are read from stdin when not given
//! as an argument, so they stay out of shell history.

mod commands;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use lib_auth::ClaimValue;
use tracing::{debug, warn};

#[derive(Parser)]
#[command(name = "auth_cli")]
#[command(about = "Hash passwords and issue or verify signed tokens")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Hash a password into `<hex-salt>$<hex-key>`
    HashPwd {
        /// Password (read from stdin when omitted)
        password: Option<String>,
    },

    /// Check a password against a stored hash
    VerifyPwd {
        /// Stored `<hex-salt>$<hex-key>` string
        stored: String,

        /// Password (read from stdin when omitted)
        password: Option<String>,
    },

    /// Issue a signed token
    Issue {
        /// Claim as `key=value`; repeatable
        #[arg(long = "claim", short = 'c', value_parser = commands::parse_claim)]
        claims: Vec<(String, ClaimValue)>,

        /// Lifetime in seconds (defaults to JWT_TTL_SECS)
        #[arg(long, allow_negative_numbers = true)]
        ttl: Option<i64>,
    },

    /// Verify a token and print its claims
    Verify {
        /// Token string
        token: String,
    },

    /// Print a token's claims without checking signature or expiry
    Inspect {
        /// Token string
        token: String,
    },
}

fn main() -> ExitCode {
    // Before tracing, so LOG_LEVEL from .env applies.
    let dotenv = lib_core::config::load_dotenv();
    if let Err(err) = lib_core::init_tracing("warn") {
        eprintln!("{err}");
    }
    match dotenv {
        Ok(Some(path)) => debug!("loaded environment from {}", path.display()),
        Ok(None) => {}
        Err(err) => warn!("{err}"),
    }

    let cli = Cli::parse();

    match commands::run(cli.command) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            err.log();
            eprintln!("error: {}", err.user_message());
            ExitCode::from(err.exit_code())
        }
    }
}
