//! The animation description language: node types, builders, timing strings and params.

pub(crate) mod ast;
pub(crate) mod build;
pub(crate) mod params;
pub(crate) mod timing;
