use serde::Serialize;

/// Which "no value" text a missing field renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Placeholder {
    Unknown,
    NoData,
    NoRecords,
}

/// A rendering-ready value: either what the provider reported or an explicit
/// placeholder resolved per locale at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Known(String),
    Missing(Placeholder),
}

impl Field {
    /// Builds a field from a raw provider value; blank text keeps `fallback`.
    #[must_use]
    pub fn from_text(value: impl Into<String>, fallback: Placeholder) -> Self {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            Self::Missing(fallback)
        } else if trimmed.len() == value.len() {
            Self::Known(value)
        } else {
            Self::Known(trimmed.to_string())
        }
    }

    #[must_use]
    pub fn known(&self) -> Option<&str> {
        match self {
            Self::Known(value) => Some(value),
            Self::Missing(_) => None,
        }
    }

    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing(_))
    }
}

/// Canonical lookup result every provider adapter produces.
///
/// Every text field is always present; a fresh record starts with each one
/// at its placeholder and adapters fill in what their source supplies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehicleRecord {
    pub vendor: Field,
    pub model: Field,
    pub year: Field,
    pub engine: Field,
    pub color: Field,
    pub mileage: Field,
    pub accidents: Field,
    pub owners_count: Field,
    pub is_stolen: bool,
    pub photo_url: Option<String>,
    pub source: String,
}

impl VehicleRecord {
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            vendor: Field::Missing(Placeholder::Unknown),
            model: Field::Missing(Placeholder::Unknown),
            year: Field::Missing(Placeholder::NoData),
            engine: Field::Missing(Placeholder::NoData),
            color: Field::Missing(Placeholder::NoData),
            mileage: Field::Missing(Placeholder::NoRecords),
            accidents: Field::Missing(Placeholder::NoRecords),
            owners_count: Field::Missing(Placeholder::NoData),
            is_stolen: false,
            photo_url: None,
            source: source.into(),
        }
    }

    pub fn set_vendor(&mut self, value: impl Into<String>) {
        self.vendor = Field::from_text(value, Placeholder::Unknown);
    }

    pub fn set_model(&mut self, value: impl Into<String>) {
        self.model = Field::from_text(value, Placeholder::Unknown);
    }

    pub fn set_year(&mut self, value: impl Into<String>) {
        self.year = Field::from_text(value, Placeholder::NoData);
    }

    pub fn set_engine(&mut self, value: impl Into<String>) {
        self.engine = Field::from_text(value, Placeholder::NoData);
    }

    pub fn set_color(&mut self, value: impl Into<String>) {
        self.color = Field::from_text(value, Placeholder::NoData);
    }

    pub fn set_mileage(&mut self, value: impl Into<String>) {
        self.mileage = Field::from_text(value, Placeholder::NoRecords);
    }

    pub fn set_accidents(&mut self, value: impl Into<String>) {
        self.accidents = Field::from_text(value, Placeholder::NoRecords);
    }

    pub fn set_owners_count(&mut self, value: impl Into<String>) {
        self.owners_count = Field::from_text(value, Placeholder::NoData);
    }

    /// Whether the provider filled in anything beyond the placeholders.
    #[must_use]
    pub fn has_data(&self) -> bool {
        let fields = [
            &self.vendor,
            &self.model,
            &self.year,
            &self.engine,
            &self.color,
            &self.mileage,
            &self.accidents,
            &self.owners_count,
        ];
        self.is_stolen || self.photo_url.is_some() || fields.iter().any(|f| !f.is_missing())
    }

    /// Empty URLs are treated as "no photo".
    pub fn set_photo_url(&mut self, value: Option<String>) {
        self.photo_url = value.filter(|url| !url.trim().is_empty());
    }
}
