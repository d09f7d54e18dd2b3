pub mod convert;
pub mod normalize;
pub mod process;
pub mod range;
pub mod registry;
pub mod scan;
pub mod settings;
pub mod store;
pub mod unicode;
pub mod words;

pub use convert::RateTable;
pub use process::{annotate, process, summarize, ConversionContext, ConversionResult};
