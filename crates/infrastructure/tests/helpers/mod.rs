#![allow(unused_imports)]
pub mod mock_upstream;

pub use mock_upstream::MockUpstream;
