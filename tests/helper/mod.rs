//! Shared test utilities

#![allow(dead_code)]

mod catalog;

pub use catalog::*;
