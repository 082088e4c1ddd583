//! Asset, category and community data supplied by the caller

mod data;

pub use data::{Asset, Category, Community, UNNAMED_ASSET};
