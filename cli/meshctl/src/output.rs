//! Output format selection.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Address/port/type summary table.
    #[default]
    #[value(alias = "table")]
    #[serde(alias = "table")]
    Short,
    /// Full listeners as JSON.
    Json,
}

impl OutputFormat {
    /// Parse a format name, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(value, true).ok()
    }
}
