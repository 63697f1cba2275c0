//! Anti-klepto CLI
//!
//! Generate host nonces, commit to them, and check that a signing device mixed the host
//! nonce into the nonce of the signature it returned.
//!
//! ```sh
//! antiklepto nonce
//! antiklepto commit --variant tagged --host-nonce <hex>
//! antiklepto verify --variant tagged --host-nonce <hex> --signer-commitment <hex> --signature <hex>
//! ```
//!
//! `verify` exits with `0` if the signature used the host nonce, `1` if it did not, and `2` if
//! any input is malformed.

use antiklepto_cryptography::antiklepto::Variant;
use antiklepto_utils::from_hex_formatted;
use clap::{Arg, ArgMatches, Command};
use std::process::ExitCode;
use tracing::{error, Level};

mod commands;

/// Returns the version of the crate.
pub const fn crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

const LOG_LEVEL_FLAG: &str = "log-level";
const VARIANT_FLAG: &str = "variant";
const HOST_NONCE_FLAG: &str = "host-nonce";
const SIGNER_COMMITMENT_FLAG: &str = "signer-commitment";
const SIGNATURE_FLAG: &str = "signature";

fn parse_hex(value: &str) -> Result<Vec<u8>, String> {
    from_hex_formatted(value).ok_or_else(|| format!("invalid hex: {value}"))
}

fn variant_arg() -> Arg {
    Arg::new(VARIANT_FLAG)
        .long(VARIANT_FLAG)
        .required(true)
        .help("Protocol variant spoken by the signer (tagged or legacy)")
        .value_parser(clap::value_parser!(Variant))
}

fn hex_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .required(true)
        .help(help)
        .value_parser(parse_hex)
}

fn cli() -> Command {
    Command::new("antiklepto")
        .version(crate_version())
        .about("Verify that a signing device mixed host randomness into its ECDSA nonce.")
        .arg(
            Arg::new(LOG_LEVEL_FLAG)
                .long(LOG_LEVEL_FLAG)
                .global(true)
                .default_value("info")
                .help("Maximum level of log messages (trace, debug, info, warn, error)")
                .value_parser(clap::value_parser!(Level)),
        )
        .subcommand_required(true)
        .subcommand(Command::new(commands::NONCE_CMD).about("Generate a random 32-byte host nonce."))
        .subcommand(
            Command::new(commands::COMMIT_CMD)
                .about("Compute the commitment to a host nonce to send to the signer.")
                .arg(variant_arg())
                .arg(hex_arg(HOST_NONCE_FLAG, "Host nonce (32 bytes, hex)")),
        )
        .subcommand(
            Command::new(commands::VERIFY_CMD)
                .about("Verify that a signature's nonce incorporates the host nonce.")
                .arg(variant_arg())
                .arg(hex_arg(HOST_NONCE_FLAG, "Host nonce (32 bytes, hex)"))
                .arg(hex_arg(
                    SIGNER_COMMITMENT_FLAG,
                    "Signer nonce commitment (33 bytes compressed for tagged, 65 bytes uncompressed for legacy, hex)",
                ))
                .arg(hex_arg(SIGNATURE_FLAG, "Compact signature r || s (64 bytes, hex)")),
        )
}

/// Returns the decoded value of a hex argument marked `required(true)`.
fn bytes<'a>(matches: &'a ArgMatches, name: &str) -> &'a [u8] {
    matches
        .get_one::<Vec<u8>>(name)
        .expect("clap enforces required hex arguments")
}

/// Returns the variant of a subcommand (the argument is `required(true)`).
fn variant(matches: &ArgMatches) -> Variant {
    *matches
        .get_one::<Variant>(VARIANT_FLAG)
        .expect("clap enforces the variant argument")
}

/// Entrypoint for the anti-klepto CLI
fn main() -> ExitCode {
    let matches = cli().get_matches();

    // Create logger
    let level = matches
        .get_one::<Level>(LOG_LEVEL_FLAG)
        .copied()
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    // Parse subcommands
    match matches.subcommand() {
        Some((commands::NONCE_CMD, _)) => {
            println!("{}", commands::nonce(&mut rand::thread_rng()));
            ExitCode::SUCCESS
        }
        Some((commands::COMMIT_CMD, matches)) => {
            match commands::commit(variant(matches), bytes(matches, HOST_NONCE_FLAG)) {
                Ok(host_commitment) => {
                    println!("{host_commitment}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    error!(error=?e, "failed to commit to host nonce");
                    ExitCode::from(commands::exit_status(&e))
                }
            }
        }
        Some((commands::VERIFY_CMD, matches)) => {
            match commands::verify(
                variant(matches),
                bytes(matches, HOST_NONCE_FLAG),
                bytes(matches, SIGNER_COMMITMENT_FLAG),
                bytes(matches, SIGNATURE_FLAG),
            ) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => ExitCode::from(commands::exit_status(&e)),
            }
        }
        Some((cmd, _)) => {
            error!(cmd, "invalid subcommand");
            ExitCode::from(commands::EXIT_MALFORMED_INPUT)
        }
        None => {
            error!("no subcommand provided");
            ExitCode::from(commands::EXIT_MALFORMED_INPUT)
        }
    }
}
