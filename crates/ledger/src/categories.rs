//! Locale-keyed category label tables.
//!
//! The category field is free text at the data layer; the UI picks from this
//! bounded set. Lookup is a plain keyed table resolved once per request and
//! threaded as a parameter. There is no process-wide current-language state.

use serde::{Deserialize, Serialize};

use crate::LedgerError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ja,
    En,
}

impl Locale {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ja => "ja",
            Self::En => "en",
        }
    }
}

impl TryFrom<&str> for Locale {
    type Error = LedgerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "ja" => Ok(Self::Ja),
            "en" => Ok(Self::En),
            other => Err(LedgerError::InvalidField(format!(
                "unsupported locale: {other}"
            ))),
        }
    }
}

/// The fixed shape every locale must fill in completely.
#[derive(Debug, Serialize)]
pub struct CategoryLabels {
    pub rent: &'static str,
    pub utilities: &'static str,
    pub supplies: &'static str,
    pub event: &'static str,
    pub repair: &'static str,
    pub other: &'static str,
}

static JA: CategoryLabels = CategoryLabels {
    rent: "家賃・共益費",
    utilities: "光熱費",
    supplies: "消耗品",
    event: "イベント",
    repair: "修繕",
    other: "その他",
};

static EN: CategoryLabels = CategoryLabels {
    rent: "Rent & common fee",
    utilities: "Utilities",
    supplies: "Supplies",
    event: "Events",
    repair: "Repairs",
    other: "Other",
};

pub fn labels(locale: Locale) -> &'static CategoryLabels {
    match locale {
        Locale::Ja => &JA,
        Locale::En => &EN,
    }
}
