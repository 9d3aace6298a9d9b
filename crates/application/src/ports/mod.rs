mod query_forwarder;

pub use query_forwarder::QueryForwarder;
