use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Hour-of-day selector value; `All` is the blank selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HourFilter {
    #[default]
    All,
    Hour(u8),
}

impl HourFilter {
    /// Selector options: the `All` sentinel, then hours 0..23.
    pub fn options() -> Vec<HourFilter> {
        std::iter::once(HourFilter::All)
            .chain((0..24).map(HourFilter::Hour))
            .collect()
    }

    /// Blank or unparseable input maps to `All`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<u8>() {
            Ok(hour) if hour < 24 => HourFilter::Hour(hour),
            _ => HourFilter::All,
        }
    }
}

impl fmt::Display for HourFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HourFilter::All => f.write_str("All"),
            HourFilter::Hour(hour) => write!(f, "{}", hour),
        }
    }
}

/// Values captured from the filter form on Run. Never used to shape data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSnapshot {
    pub from: Option<String>,
    pub to: Option<String>,
    pub hour: HourFilter,
    pub min_fare: Option<f64>,
    pub max_fare: Option<f64>,
}

impl FilterSnapshot {
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }
}

/// Seam to the filter widgets.
pub trait FormAdapter {
    fn read_filters(&self) -> FilterSnapshot;
    fn clear_filters(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    From,
    To,
    Hour,
    MinFare,
    MaxFare,
}

/// Key-value form holding the raw text of each filter widget.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormFields {
    values: BTreeMap<FilterField, String>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(values: BTreeMap<FilterField, String>) -> Self {
        Self { values }
    }

    pub fn set(&mut self, field: FilterField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn get(&self, field: FilterField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    fn text(&self, field: FilterField) -> Option<String> {
        let raw = self.get(field).trim();
        if raw.is_empty() {
            None
        } else {
            Some(raw.to_string())
        }
    }

    fn number(&self, field: FilterField) -> Option<f64> {
        self.get(field).trim().parse().ok()
    }
}

impl FormAdapter for FormFields {
    fn read_filters(&self) -> FilterSnapshot {
        FilterSnapshot {
            from: self.text(FilterField::From),
            to: self.text(FilterField::To),
            hour: HourFilter::parse(self.get(FilterField::Hour)),
            min_fare: self.number(FilterField::MinFare),
            max_fare: self.number(FilterField::MaxFare),
        }
    }

    fn clear_filters(&mut self) {
        self.values.clear();
    }
}
