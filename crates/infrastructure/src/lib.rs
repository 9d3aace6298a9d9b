//! Adapters for ruledns: the DNS wire codec, the rule-language compiler,
//! upstream forwarding and the datagram handler.
pub mod dns;
