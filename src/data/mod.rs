pub mod json;
pub mod reviewer;
pub mod tasting;
