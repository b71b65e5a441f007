//! Sessions

pub(crate) mod middleware;
