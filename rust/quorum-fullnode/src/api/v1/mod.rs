mod data;
mod route;

pub use data::*;
pub use route::*;
