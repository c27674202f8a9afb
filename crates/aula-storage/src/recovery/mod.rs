//! Early corruption detection.

pub mod integrity_check;
