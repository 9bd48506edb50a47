//! Request and response bodies for the FullNode REST API. The node owns this
//! schema; the types here declare the fields the SDK relies on and ignore the
//! rest, so that rolling node upgrades do not break deserialization.

mod config;
mod consensus;
mod group;
mod node;
mod strings;
mod token;
mod trx;
mod user;

pub use config::*;
pub use consensus::*;
pub use group::*;
pub use node::*;
pub use strings::*;
pub use token::*;
pub use trx::*;
pub use user::*;
