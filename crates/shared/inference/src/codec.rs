//! Bijective table between crop names and class indices.

use agri_domain::constants::UNKNOWN_CROP;
use agri_domain::crop::CropLabel;
use fxhash::FxHashMap;
use strum::IntoEnumIterator;

/// Index used for crop names the table does not contain.
pub const FALLBACK_INDEX: usize = 0;

/// Immutable lookup table built once at startup and shared by both pipelines.
#[derive(Debug, Clone)]
pub struct LabelCodec {
    by_index: Vec<CropLabel>,
    by_name: FxHashMap<&'static str, CropLabel>,
}

/// Result of decoding a raw class index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    Known(CropLabel),
    Unknown(i64),
}

impl Decoded {
    /// Lower-case crop name, or `"Unknown Crop"`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Known(label) => label.name(),
            Self::Unknown(_) => UNKNOWN_CROP,
        }
    }
}

/// Result of encoding a crop name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoded {
    Known(CropLabel),
    /// The name is not in the table; it encodes as [`FALLBACK_INDEX`].
    Fallback,
}

impl Encoded {
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Known(label) => label.index(),
            Self::Fallback => FALLBACK_INDEX,
        }
    }

    #[must_use]
    pub const fn is_known(self) -> bool {
        matches!(self, Self::Known(_))
    }
}

impl LabelCodec {
    #[must_use]
    pub fn new() -> Self {
        let by_index: Vec<CropLabel> = CropLabel::iter().collect();
        let by_name = by_index.iter().map(|&label| (label.name(), label)).collect();
        Self { by_index, by_name }
    }

    #[must_use]
    pub fn decode(&self, index: i64) -> Decoded {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.by_index.get(i).copied())
            .map_or(Decoded::Unknown(index), Decoded::Known)
    }

    /// Looks up an already normalized (trimmed, lower-case) crop name.
    #[must_use]
    pub fn encode(&self, name: &str) -> Encoded {
        self.by_name.get(name).copied().map_or(Encoded::Fallback, Encoded::Known)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_index.len()
    }
}

impl Default for LabelCodec {
    fn default() -> Self {
        Self::new()
    }
}
