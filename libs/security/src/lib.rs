//! Security primitives shared across StaffGrid modules.
//!
//! This crate answers two questions: who is asking ([`Subject`], [`Role`],
//! [`UserContext`]) and what they were granted ([`AccessDecision`]). It is
//! deliberately dependency-light; every other crate in the workspace
//! consumes these types.

mod context;
mod decision;
mod role;
mod subject;

pub use context::{UserContext, UserContextBuilder};
pub use decision::AccessDecision;
pub use role::Role;
pub use subject::Subject;
