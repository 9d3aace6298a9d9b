use ruledns_domain::{RecordClass, RecordType, ResourceRecord, ResponseCode};
use std::str::FromStr;

mod helpers;
use helpers::builders::name;

#[test]
fn test_record_type_codes() {
    assert_eq!(RecordType::A.to_u16(), 1);
    assert_eq!(RecordType::CNAME.to_u16(), 5);
    assert_eq!(RecordType::TXT.to_u16(), 16);
    assert_eq!(RecordType::AAAA.to_u16(), 28);
    assert_eq!(RecordType::SVCB.to_u16(), 64);
    assert_eq!(RecordType::HTTPS.to_u16(), 65);
}

#[test]
fn test_record_type_round_trips_through_code_and_mnemonic() {
    for rt in RecordType::ALL {
        assert_eq!(RecordType::from_u16(rt.to_u16()), Some(rt));
        assert_eq!(RecordType::from_str(rt.as_str()), Ok(rt));
    }
}

#[test]
fn test_record_type_codes_are_unique() {
    let mut codes: Vec<u16> = RecordType::ALL.iter().map(|rt| rt.to_u16()).collect();
    codes.sort();
    codes.dedup();
    assert_eq!(codes.len(), RecordType::ALL.len());
}

#[test]
fn test_record_type_lookup_is_case_sensitive() {
    assert!(RecordType::from_str("A").is_ok());
    assert!(RecordType::from_str("a").is_err());
    assert!(RecordType::from_str("cname").is_err());
}

#[test]
fn test_unknown_record_type() {
    assert_eq!(RecordType::from_u16(999), None);
    assert!(RecordType::from_str("BOGUS").is_err());
    assert_eq!(RecordType::describe(999), "TYPE999");
    assert_eq!(RecordType::describe(1), "A");
}

#[test]
fn test_record_class_registry() {
    assert_eq!(RecordClass::IN.to_u16(), 1);
    assert_eq!(RecordClass::CS.to_u16(), 2);
    assert_eq!(RecordClass::CH.to_u16(), 3);
    assert_eq!(RecordClass::HS.to_u16(), 4);

    for class in RecordClass::ALL {
        assert_eq!(RecordClass::from_u16(class.to_u16()), Some(class));
        assert_eq!(RecordClass::from_str(class.as_str()), Ok(class));
    }

    assert!(RecordClass::from_str("XX").is_err());
    assert_eq!(RecordClass::describe(255), "CLASS255");
}

#[test]
fn test_record_type_display() {
    assert_eq!(format!("{}", RecordType::AAAA), "AAAA");
    assert_eq!(format!("{}", RecordClass::IN), "IN");
}

#[test]
fn test_response_codes() {
    assert_eq!(ResponseCode::NotImp.to_u8(), 4);
    assert_eq!(ResponseCode::NXDomain.to_u8(), 3);
    assert_eq!(ResponseCode::from_u8(2), Some(ResponseCode::ServFail));
    assert_eq!(ResponseCode::from_u8(15), None);
    assert_eq!(ResponseCode::FormErr.to_string(), "FORMERR");
}

#[test]
fn test_resource_record_length_tracks_rdata() {
    let record = ResourceRecord::new(name("example.com"), 1, 1, 300, vec![10, 0, 0, 1]);
    assert_eq!(record.rdlength, 4);
    assert!(record.has_consistent_length());

    let mut tampered = record.clone();
    tampered.rdlength = 16;
    assert!(!tampered.has_consistent_length());
}

#[test]
fn test_svcb_and_https_use_iana_codes() {
    assert_eq!(RecordType::from_u16(64), Some(RecordType::SVCB));
    assert_eq!(RecordType::from_u16(65), Some(RecordType::HTTPS));
    assert_eq!(RecordType::from_str("SVCB").map(|rt| rt.to_u16()), Ok(64));
}
