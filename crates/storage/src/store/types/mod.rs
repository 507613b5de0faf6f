#![forbid(unsafe_code)]

mod access;
mod documents;
mod events;
mod tags;
mod versions;

pub use access::*;
pub use documents::*;
pub use events::*;
pub use tags::*;
pub use versions::*;
