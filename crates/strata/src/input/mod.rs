//! Tabular data representation and CSV encoding.

mod codec;
mod source;

pub use codec::{CodecConfig, TableCodec};
pub use source::{format_number, DataTable, SourceMetadata};
