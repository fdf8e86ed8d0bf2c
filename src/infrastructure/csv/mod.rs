// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// Sheet decoding, header detection, and import file writing

mod header_resolver;
mod import_writer;
mod sheet_reader;

pub use header_resolver::{HeaderResolver, ResolvedHeader};
pub use import_writer::ImportWriter;
pub use sheet_reader::{DecodedSheet, SheetReader, TextEncoding};
