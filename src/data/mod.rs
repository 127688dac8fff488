//! Input documents and the UFO source model

pub mod adjustments;
pub mod charmap;
pub mod ufo;

pub use adjustments::{AdjustmentFactors, Adjustments, CharPosition};
pub use charmap::{CharEntry, CharMap};
