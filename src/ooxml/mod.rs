//! Office Open XML formats.

pub mod xlsx;
