mod route;

pub use route::*;
