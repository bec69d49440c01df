//! Component record and tracked field definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// One BOM line item, keyed by its reference designator.
///
/// Missing attributes default to `""` (strings) or `0` (quantity); the
/// extractors never produce `Option`s so downstream comparison is plain
/// value equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComponentRecord {
    /// Reference designator (e.g. `R1`, `C42`). Case-sensitive.
    pub reference: String,
    /// Manufacturer or internal part number
    pub part_number: String,
    /// Quantity; unparseable source values become 0
    pub quantity: u32,
    /// Package / footprint name
    pub footprint: String,
    pub description: String,
    pub manufacturer: String,
    /// Raw value text (e.g. `10k`), display only
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,
    /// Assembly option code, display only
    #[serde(skip_serializing_if = "String::is_empty")]
    pub option: String,
    /// Library part name, display only
    #[serde(skip_serializing_if = "String::is_empty")]
    pub part_name: String,
    /// File that produced this record (diagnostics only)
    #[serde(skip_serializing_if = "String::is_empty")]
    pub source_file: String,
}

impl ComponentRecord {
    /// Create a record with only a reference designator set.
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_part_number(mut self, part_number: impl Into<String>) -> Self {
        self.part_number = part_number.into();
        self
    }

    #[must_use]
    pub const fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    #[must_use]
    pub fn with_footprint(mut self, footprint: impl Into<String>) -> Self {
        self.footprint = footprint.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = manufacturer.into();
        self
    }

    #[must_use]
    pub fn with_source_file(mut self, source_file: impl Into<String>) -> Self {
        self.source_file = source_file.into();
        self
    }

    /// Whether the record has a usable reference designator.
    #[must_use]
    pub fn has_reference(&self) -> bool {
        !self.reference.is_empty()
    }

    /// Display text of a tracked field.
    #[must_use]
    pub fn field_text(&self, field: TrackedField) -> Cow<'_, str> {
        match field {
            TrackedField::PartNumber => Cow::Borrowed(&self.part_number),
            TrackedField::Quantity => Cow::Owned(self.quantity.to_string()),
            TrackedField::Footprint => Cow::Borrowed(&self.footprint),
            TrackedField::Description => Cow::Borrowed(&self.description),
            TrackedField::Manufacturer => Cow::Borrowed(&self.manufacturer),
        }
    }

    /// Exact comparison of one tracked field. No case folding or trimming.
    #[must_use]
    pub fn field_differs(&self, other: &Self, field: TrackedField) -> bool {
        match field {
            TrackedField::PartNumber => self.part_number != other.part_number,
            TrackedField::Quantity => self.quantity != other.quantity,
            TrackedField::Footprint => self.footprint != other.footprint,
            TrackedField::Description => self.description != other.description,
            TrackedField::Manufacturer => self.manufacturer != other.manufacturer,
        }
    }

    /// Whether any tracked field differs from `other`.
    #[must_use]
    pub fn differs_from(&self, other: &Self) -> bool {
        TrackedField::ALL
            .iter()
            .any(|&field| self.field_differs(other, field))
    }
}

/// The fixed set of fields compared between matched records.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub enum TrackedField {
    PartNumber,
    Quantity,
    Footprint,
    Description,
    Manufacturer,
}

impl TrackedField {
    /// All tracked fields in comparison and display order.
    pub const ALL: [Self; 5] = [
        Self::PartNumber,
        Self::Quantity,
        Self::Footprint,
        Self::Description,
        Self::Manufacturer,
    ];

    /// Canonical (serialized) field name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PartNumber => "partNumber",
            Self::Quantity => "quantity",
            Self::Footprint => "footprint",
            Self::Description => "description",
            Self::Manufacturer => "manufacturer",
        }
    }

    /// Column heading used by reports.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::PartNumber => "Part Number",
            Self::Quantity => "Quantity",
            Self::Footprint => "Package",
            Self::Description => "Description",
            Self::Manufacturer => "Manufacturer",
        }
    }
}

impl std::fmt::Display for TrackedField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse a quantity the way every extractor does: trimmed unsigned decimal,
/// anything else is 0.
#[must_use]
pub fn parse_quantity(raw: &str) -> u32 {
    raw.trim().parse::<u32>().unwrap_or(0)
}
