//! TOON: the line-oriented text format used for card batches, configuration
//! and generated digests.

pub mod coerce;
pub mod fence;
pub mod parser;
pub mod serializer;
pub mod value;

pub use coerce::coerce;
pub use fence::{append_fragment, strip_code_fence};
pub use parser::parse;
pub use serializer::stringify;
pub use value::{Document, Mapping, Record, Scalar, Value};
