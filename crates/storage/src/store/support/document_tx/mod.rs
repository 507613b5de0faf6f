#![forbid(unsafe_code)]

mod access;
mod rows;

pub(in crate::store) use access::*;
pub(in crate::store) use rows::*;
