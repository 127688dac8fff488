//! Glyphforge
pub mod compile;
pub mod core;
pub mod data;
pub mod font_source;
pub mod logging;
pub mod outline;
pub mod spacing;
#[cfg(test)]
mod tests;
