//! Foundation utilities: math types, timing, logging

pub mod logging;
pub mod math;
pub mod time;
