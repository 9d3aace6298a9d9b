mod record;
mod record_class;
mod record_type;
mod response_code;

pub use record::ResourceRecord;
pub use record_class::RecordClass;
pub use record_type::RecordType;
pub use response_code::ResponseCode;
