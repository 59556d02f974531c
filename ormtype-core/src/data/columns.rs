use serde::{Deserialize, Serialize};

/// A single database-backed property of a model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub name: String,
    /// Canonical database type (`integer`, `uuid`, `timestamp`, ...)
    pub db_type: String,
    pub cast_type: Option<String>,
    pub nullable: bool,
    pub default: Option<String>,
    pub hidden: bool,
    pub fillable: bool,
    pub primary_key: bool,
    pub timestamp: bool,
    /// Explicit type override; always wins over every other source.
    pub forced_type: Option<String>,
    /// Rendered after the columns under the mutators section.
    pub appended: bool,
}

impl ColumnDefinition {
    pub fn new(name: impl Into<String>, db_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            db_type: db_type.into(),
            ..Default::default()
        }
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn cast(mut self, cast: impl Into<String>) -> Self {
        self.cast_type = Some(cast.into());
        self
    }

    pub fn forced(mut self, ts_type: impl Into<String>) -> Self {
        self.forced_type = Some(ts_type.into());
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn fillable(mut self, fillable: bool) -> Self {
        self.fillable = fillable;
        self
    }

    pub fn primary_key(mut self, primary_key: bool) -> Self {
        self.primary_key = primary_key;
        self
    }

    pub fn timestamp(mut self, timestamp: bool) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// How an accessor was declared on the source model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessorStyle {
    /// `getFooAttribute()` style
    #[default]
    Traditional,
    /// `foo(): Attribute` style
    Attribute,
}

impl AccessorStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessorStyle::Traditional => "traditional",
            AccessorStyle::Attribute => "attribute",
        }
    }
}

/// A computed property exposed by the model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccessorDefinition {
    pub name: String,
    pub style: AccessorStyle,
    pub return_type: Option<String>,
    pub nullable: bool,
    /// Qualified name of the enum the accessor returns, if any.
    pub enum_class: Option<String>,
    pub forced_type: Option<String>,
}

impl AccessorDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn returns(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn style(mut self, style: AccessorStyle) -> Self {
        self.style = style;
        self
    }

    pub fn enum_class(mut self, class: impl Into<String>) -> Self {
        self.enum_class = Some(class.into());
        self
    }

    pub fn forced(mut self, ts_type: impl Into<String>) -> Self {
        self.forced_type = Some(ts_type.into());
        self
    }
}
