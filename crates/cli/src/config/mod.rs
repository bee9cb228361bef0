//! CLI configuration

pub(crate) mod backend;
pub(crate) mod logging;
