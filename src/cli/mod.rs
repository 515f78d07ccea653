pub mod convert;
pub mod interactive;

pub use convert::*;
pub use interactive::*;
