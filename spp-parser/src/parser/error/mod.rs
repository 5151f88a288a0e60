pub mod kind;

pub use spp_error::Error;
