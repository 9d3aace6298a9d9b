pub mod forwarding;
pub mod rules;
pub mod server;
pub mod wire;

pub use forwarding::{PendingRequests, UdpForwarder};
pub use rules::compile_rules;
pub use server::DnsServerHandler;
