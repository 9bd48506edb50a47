//! This module contains the route definitions and high-level client for
//! working with the REST API exposed by a QuoRum FullNode.

mod data;
mod fullnode;
mod route;

pub mod app;
pub mod v1;
pub mod v2;

pub use data::*;
pub use fullnode::*;
pub use route::*;
