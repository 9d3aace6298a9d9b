use ruledns_domain::{RuleResponse, RuleTable, NOT_FOUND_STATUS};

mod helpers;
use helpers::builders::name;
use helpers::RuleBuilder;

#[test]
fn test_find_exact_match() {
    let table = RuleTable::new(vec![RuleBuilder::new().build()]);

    let found = table.find(&name("example.com"), 1, 1);
    assert!(found.is_some());
    assert_eq!(found.unwrap().qname, name("example.com"));
}

#[test]
fn test_find_requires_type_and_class() {
    let table = RuleTable::new(vec![RuleBuilder::new().build()]);

    assert!(table.find(&name("other.com"), 1, 1).is_none());
    assert!(table.find(&name("example.com"), 28, 1).is_none());
    assert!(table.find(&name("example.com"), 1, 3).is_none());
}

#[test]
fn test_find_has_no_suffix_or_case_folding() {
    let table = RuleTable::new(vec![RuleBuilder::new().build()]);

    assert!(table.find(&name("www.example.com"), 1, 1).is_none());
    assert!(table.find(&name("EXAMPLE.com"), 1, 1).is_none());
}

#[test]
fn test_first_match_wins() {
    let table = RuleTable::new(vec![
        RuleBuilder::new().rdata(&[1, 1, 1, 1]).build(),
        RuleBuilder::new().rdata(&[2, 2, 2, 2]).build(),
    ]);

    let rule = table.find(&name("example.com"), 1, 1).unwrap();
    assert_eq!(
        rule.response,
        RuleResponse::Found {
            rtype: 1,
            rclass: 1,
            rdata: vec![1, 1, 1, 1]
        }
    );
}

#[test]
fn test_not_found_rcode_is_notimp() {
    let rule = RuleBuilder::new().not_found().build();
    assert_eq!(rule.response, RuleResponse::NotFound { status: 4 });
    assert_eq!(rule.response.rcode(), NOT_FOUND_STATUS);
}

#[test]
fn test_found_rcode_is_noerror() {
    let rule = RuleBuilder::new().build();
    assert_eq!(rule.response.rcode(), 0);
}

#[test]
fn test_table_len_and_iteration() {
    let table = RuleTable::new(vec![
        RuleBuilder::new().build(),
        RuleBuilder::new().qname("blocked.test").not_found().build(),
    ]);

    assert_eq!(table.len(), 2);
    assert!(!table.is_empty());
    let names: Vec<String> = table.iter().map(|r| r.qname.to_string()).collect();
    assert_eq!(names, vec!["example.com", "blocked.test"]);

    assert!(RuleTable::default().is_empty());
}
