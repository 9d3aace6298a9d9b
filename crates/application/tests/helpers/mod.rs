#![allow(unused_imports)]
pub mod mock_forwarder;

pub use mock_forwarder::MockQueryForwarder;
