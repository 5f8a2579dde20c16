//! CLI library components for csvmap.

#![allow(missing_docs)]

pub mod logging;
pub mod session;
