mod filter;
mod message;
mod product;

pub use filter::*;
pub use message::*;
pub use product::*;
