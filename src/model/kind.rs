//! Input file kinds accepted by the extractors.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Declared or sniffed kind of an input file.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum FileKind {
    /// XML BOM export (`DETAILS/RECORD` or `Component` elements)
    #[value(name = "bom-xml")]
    BomXml,
    /// Positional comma-separated BOM
    Csv,
    /// Whitespace-separated `NET node...` netlist
    #[value(name = "netlist-text")]
    NetlistText,
}

impl FileKind {
    /// Canonical kebab-case name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::BomXml => "bom-xml",
            Self::Csv => "csv",
            Self::NetlistText => "netlist-text",
        }
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FileKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bom-xml" | "xml" => Ok(Self::BomXml),
            "csv" => Ok(Self::Csv),
            "netlist-text" | "netlist" | "net" => Ok(Self::NetlistText),
            other => Err(format!(
                "unknown file kind '{other}' (expected bom-xml, csv or netlist-text)"
            )),
        }
    }
}
