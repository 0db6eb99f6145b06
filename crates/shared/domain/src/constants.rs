//! Wire names and tags shared by the pipelines and the HTTP surface.

pub const SYSTEM_TAG: &str = "System";
pub const RECOMMENDATION_TAG: &str = "Recommendation";
pub const YIELD_TAG: &str = "Yield";

/// Form field carrying the crop name on yield requests.
pub const LABEL_FIELD: &str = "label";

/// Prefix of one-hot crop columns in a declared feature schema (`label_rice`).
pub const ONE_HOT_PREFIX: &str = "label_";

/// Trailing slot of the positional yield layout holding the crop table index.
pub const CROP_INDEX_FEATURE: &str = "crop_index";

/// Display name used when a class index has no crop.
pub const UNKNOWN_CROP: &str = "Unknown Crop";
