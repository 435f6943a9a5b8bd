mod decode;
mod error;
mod header;

pub use decode::decode;
pub use error::{PlySourceError, Result};
pub use header::{PlyFormat, PlyHeader};
