//! Types that represent the core data model, such as `Sale` and `Dataset`.
mod amount;
mod dataset;
mod sale;

pub use amount::Amount;
pub use dataset::Dataset;
pub use sale::{Sale, SaleColumn};
