mod draft;
mod record;

pub use draft::*;
pub use record::*;
