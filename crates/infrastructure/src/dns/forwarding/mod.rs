pub mod forwarder;
pub mod pending;

pub use forwarder::UdpForwarder;
pub use pending::{spawn_expiry_sweeper, PendingQuery, PendingRequests};
