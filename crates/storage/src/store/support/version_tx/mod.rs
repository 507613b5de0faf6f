#![forbid(unsafe_code)]

mod ledger;
mod sequencer;

pub(in crate::store) use ledger::*;
pub(in crate::store) use sequencer::*;
