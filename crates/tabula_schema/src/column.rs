//! Column descriptors, types and lookup providers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// The semantic type of a column. Drives both display formatting and the
/// form control chosen for editing.
///
/// `Surrogate` is typically a foreign-key-like reference; `LabelItem` and
/// `TextItem` are convenience types for enumerated or looked-up values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnType {
    String,
    Text,
    Integer,
    Float,
    Boolean,
    Date,
    Surrogate,
    LabelItem,
    TextItem,
}

impl ColumnType {
    /// Whether values of this type are `{value, label}` / `{value, text}`
    /// pairs backed by a lookup.
    pub fn is_lookup(self) -> bool {
        matches!(
            self,
            ColumnType::Surrogate | ColumnType::LabelItem | ColumnType::TextItem
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            ColumnType::String => "string",
            ColumnType::Text => "text",
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Boolean => "boolean",
            ColumnType::Date => "date",
            ColumnType::Surrogate => "surrogate",
            ColumnType::LabelItem => "labelItem",
            ColumnType::TextItem => "textItem",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One option record produced by a lookup provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupOption {
    pub value: String,
    /// Display text for the option. Rendered into the `label` sub-field for
    /// surrogate/labelItem columns and the `text` sub-field for textItem.
    pub label: String,
}

impl LookupOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A zero-argument lookup provider for surrogate/labelItem/textItem columns.
///
/// Called synchronously at render and edit time, never cached; repeated
/// renders repeat the call.
#[derive(Clone)]
pub struct Lookup(Arc<dyn Fn() -> Vec<LookupOption> + Send + Sync>);

impl Lookup {
    pub fn new(provider: impl Fn() -> Vec<LookupOption> + Send + Sync + 'static) -> Self {
        Self(Arc::new(provider))
    }

    /// Adapt a static option list (what a JSON fixture supplies).
    pub fn fixed(options: Vec<LookupOption>) -> Self {
        Self::new(move || options.clone())
    }

    pub fn options(&self) -> Vec<LookupOption> {
        (self.0)()
    }
}

impl fmt::Debug for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Lookup(..)")
    }
}

/// Declarative metadata for one field of a table.
#[derive(Debug, Clone)]
pub struct ColumnDescriptor {
    /// Field name, unique within its table.
    pub name: String,
    /// Header/label text; defaults to `name` when unset.
    pub display_name: Option<String>,
    pub column_type: ColumnType,
    /// When true, the underlying persistence requires a value; an empty
    /// value blocks submit.
    pub required: bool,
    pub primary_key: bool,
    /// Display-only rounding for float columns. `None` means no rounding.
    pub decimals: Option<u32>,
    /// Shown in the edit form but not editable.
    pub form_read_only: bool,
    /// Present iff `column_type.is_lookup()`; enforced by catalog validation.
    pub lookup: Option<Lookup>,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            column_type,
            required: false,
            primary_key: false,
            decimals: None,
            form_read_only: false,
            lookup: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = Some(decimals);
        self
    }

    pub fn read_only(mut self) -> Self {
        self.form_read_only = true;
        self
    }

    pub fn with_lookup(mut self, lookup: Lookup) -> Self {
        self.lookup = Some(lookup);
        self
    }

    /// Header text: `display_name` when provided, otherwise `name`.
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    /// Current lookup options, or an empty list for non-lookup columns.
    pub fn lookup_options(&self) -> Vec<LookupOption> {
        self.lookup.as_ref().map(Lookup::options).unwrap_or_default()
    }
}

/// Structural equality for the refresh policy. Lookup providers are opaque
/// closures and compare by presence only.
impl PartialEq for ColumnDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.display_name == other.display_name
            && self.column_type == other.column_type
            && self.required == other.required
            && self.primary_key == other.primary_key
            && self.decimals == other.decimals
            && self.form_read_only == other.form_read_only
            && self.lookup.is_some() == other.lookup.is_some()
    }
}
