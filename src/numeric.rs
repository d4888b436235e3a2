//! Basic numerical concepts used throughout the program

#![allow(missing_docs)]

// Floating-point precision is fixed by the binary output format, which stores
// every trial mean as an IEEE-754 double
pub type Float = f64;
