//! `transparency-check`: loads the Transparency grammar and reports whether
//! the runtime accepts it.
use std::error::Error;
use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match tree_sitter_transparency::verify() {
        Ok(language) => {
            println!(
                "{} grammar loaded: ABI {}, {} node kinds, {} parse states",
                tree_sitter_transparency::GRAMMAR_NAME,
                language.abi_version(),
                language.node_kind_count(),
                language.parse_state_count(),
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            match err.source() {
                Some(cause) => eprintln!("{err}: {cause}"),
                None => eprintln!("{err}"),
            }
            ExitCode::FAILURE
        }
    }
}
