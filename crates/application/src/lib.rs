//! Query handling for ruledns: rule lookup, answer construction and the
//! forwarding port.
pub mod ports;
pub mod use_cases;
