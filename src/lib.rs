//! Look angles from an observer to geostationary satellites, plus the
//! catalog, persistence and HTTP plumbing around them.

pub mod angles;
pub mod catalog;
pub mod events;
pub mod storage;
pub mod web;
