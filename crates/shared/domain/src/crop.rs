use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{AsRefStr, Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

/// The crops the fitted models know about.
///
/// Discriminants are the class indices used at training time; the set is closed and
/// ordered, so `index()` is a bijection onto `0..COUNT`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumCount,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[repr(u8)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CropLabel {
    Rice = 0,
    Maize = 1,
    Chickpea = 2,
    KidneyBeans = 3,
    PigeonPeas = 4,
    MothBeans = 5,
    MungBean = 6,
    BlackGram = 7,
    Lentil = 8,
    Pomegranate = 9,
    Banana = 10,
    Mango = 11,
    Grapes = 12,
    Watermelon = 13,
    Muskmelon = 14,
    Apple = 15,
    Orange = 16,
    Papaya = 17,
    Coconut = 18,
    Cotton = 19,
    Jute = 20,
    Coffee = 21,
}

impl CropLabel {
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lower-case wire name (`"kidneybeans"`).
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// A caller-supplied crop name, trimmed and lower-cased.
///
/// It may name a crop outside [`CropLabel`]; resolving it is the label codec's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CropQuery(String);

impl CropQuery {
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CropQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Upper-cases the first character and lower-cases the rest.
#[must_use]
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}
