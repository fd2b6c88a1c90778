#[macro_use]
extern crate serde;

mod error;
mod linktag;
mod registry;
mod serde_decimal;
mod signature;
mod stage;
mod store;
mod submit;
mod util;

pub use error::*;
pub use linktag::*;
pub use registry::*;
pub use serde_decimal::*;
pub use signature::*;
pub use stage::*;
pub use store::*;
pub use submit::*;
pub use util::*;
