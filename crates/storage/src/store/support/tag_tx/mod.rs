#![forbid(unsafe_code)]

mod links;
mod rows;

pub(in crate::store) use links::*;
pub(in crate::store) use rows::*;
