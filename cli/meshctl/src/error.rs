//! Error display for the CLI.

use colored::Colorize;
use meshscope_configdump::ConfigDumpError;

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), message(err));

    if let Some(dump_err) = err.downcast_ref::<ConfigDumpError>() {
        if let Some(hint) = hint(dump_err) {
            eprintln!("\n{}", hint.yellow());
        }
    }
}

/// The error and its causes on one line, each cause once.
fn message(err: &anyhow::Error) -> String {
    format!("{err:#}")
}

fn hint(err: &ConfigDumpError) -> Option<&'static str> {
    match err {
        ConfigDumpError::Prime(_) => Some(
            "Hint: Input must be a binary-encoded envoy.admin.v3.ConfigDump (not JSON).",
        ),
        ConfigDumpError::Retrieval(_) => {
            Some("Hint: The dump has no listener section. Was it captured with resource filtering?")
        }
        ConfigDumpError::NoListeners => {
            Some("Hint: The proxy has no active or static listeners yet.")
        }
        _ => None,
    }
}
