//! Game implementations.

pub mod codebreaker;
