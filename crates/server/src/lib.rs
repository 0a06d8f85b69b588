//! HTTP front end for the engine: a best-move endpoint backed by a sqlite
//! cache of previously searched positions.

pub mod api;
pub mod store;
