//! Grammar for rule files, built from the combinators in [`super::parser`].
//!
//! ```text
//! ruleset  = rule* EOF
//! rule     = TYPE NAME CLASS "->" response
//! response = "-" | TYPE rdata CLASS
//! ```
//!
//! Comments may appear between any two tokens.

use super::parser::{
    and_then, expect, fail, map, one_of, pair, repeat_until, run, try_map, BoxedParser,
};
use super::tokenizer::{Token, TokenKind};
use ruledns_domain::{
    CompileError, CompiledRule, DomainName, RecordClass, RecordType, RuleResponse, RuleTable,
};
use std::net::Ipv4Addr;
use std::str::FromStr;
use tracing::debug;

/// Compiles a whole rule file. Any error rejects the entire file.
pub fn compile_rules(source: &str) -> Result<RuleTable, CompileError> {
    let table = run(&*ruleset(), source)?;
    debug!(rules = table.len(), "Compiled rule table");
    Ok(table)
}

fn ruleset<'a>() -> BoxedParser<'a, RuleTable> {
    map(
        |(rules, _eof)| RuleTable::new(rules),
        pair(
            repeat_until(rule(), TokenKind::Eof),
            expect(TokenKind::Eof),
        ),
    )
}

fn rule<'a>() -> BoxedParser<'a, CompiledRule> {
    let query = pair(pair(record_type(), domain_name()), record_class());
    let answer = pair(expect(TokenKind::Arrow), response());

    map(
        |(((qtype, qname), qclass), (_arrow, response))| CompiledRule {
            qtype: qtype.to_u16(),
            qname,
            qclass: qclass.to_u16(),
            response,
        },
        pair(query, answer),
    )
}

fn response<'a>() -> BoxedParser<'a, RuleResponse> {
    one_of(vec![not_found_response(), found_response()])
}

fn not_found_response<'a>() -> BoxedParser<'a, RuleResponse> {
    map(|_dash| RuleResponse::not_found(), expect(TokenKind::Dash))
}

/// The response type decides how the following value token is read.
fn found_response<'a>() -> BoxedParser<'a, RuleResponse> {
    let typed_rdata = and_then(
        |token: Token| match lookup_type(&token) {
            Ok(rtype) => map(move |rdata| (rtype, rdata), rdata_for(rtype, token.start)),
            Err(e) => fail(e),
        },
        expect(TokenKind::Text),
    );

    map(
        |((rtype, rdata), rclass)| RuleResponse::Found {
            rtype: rtype.to_u16(),
            rclass: rclass.to_u16(),
            rdata,
        },
        pair(typed_rdata, record_class()),
    )
}

fn record_type<'a>() -> BoxedParser<'a, RecordType> {
    try_map(|token: Token| lookup_type(&token), expect(TokenKind::Text))
}

fn record_class<'a>() -> BoxedParser<'a, RecordClass> {
    try_map(
        |token: Token| {
            RecordClass::from_str(&token.value).map_err(|_| CompileError::UnknownTypeOrClass {
                category: "class",
                token: token.value.to_string(),
                offset: token.start,
            })
        },
        expect(TokenKind::Text),
    )
}

fn domain_name<'a>() -> BoxedParser<'a, DomainName> {
    try_map(
        |token: Token| {
            DomainName::from_str(&token.value).map_err(|e| CompileError::InvalidName {
                name: token.value.to_string(),
                reason: e.to_string(),
                offset: token.start,
            })
        },
        expect(TokenKind::Text),
    )
}

fn lookup_type(token: &Token) -> Result<RecordType, CompileError> {
    RecordType::from_str(&token.value).map_err(|_| CompileError::UnknownTypeOrClass {
        category: "type",
        token: token.value.to_string(),
        offset: token.start,
    })
}

/// Reader for the value token of a `rtype` response. `type_offset` locates
/// the type token for errors about the type itself.
fn rdata_for<'a>(rtype: RecordType, type_offset: usize) -> BoxedParser<'a, Vec<u8>> {
    match rtype {
        RecordType::A => try_map(|token: Token| ipv4_rdata(&token), expect(TokenKind::Text)),
        RecordType::AAAA => try_map(
            |token: Token| {
                Err(CompileError::UnsupportedAddressFamily {
                    literal: token.value.to_string(),
                    offset: token.start,
                })
            },
            expect(TokenKind::Text),
        ),
        RecordType::CNAME | RecordType::TXT => map(
            |token: Token| token.value.as_bytes().to_vec(),
            expect(TokenKind::Text),
        ),
        other => fail(CompileError::UnsupportedRecordType {
            rtype: other.to_string(),
            offset: type_offset,
        }),
    }
}

fn ipv4_rdata(token: &Token) -> Result<Vec<u8>, CompileError> {
    Ipv4Addr::from_str(&token.value)
        .map(|addr| addr.octets().to_vec())
        .map_err(|_| CompileError::MalformedIpv4Literal {
            literal: token.value.to_string(),
            offset: token.start,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_class_names_token() {
        let err = compile_rules("A example.com XX -> -").unwrap_err();
        assert_eq!(
            err,
            CompileError::UnknownTypeOrClass {
                category: "class",
                token: "XX".to_string(),
                offset: 14,
            }
        );
    }

    #[test]
    fn test_response_type_may_differ_from_query_type() {
        let table = compile_rules("A alias.test IN -> CNAME target.test IN").unwrap();
        let rule = table.iter().next().unwrap();
        assert_eq!(rule.qtype, 1);
        assert_eq!(
            rule.response,
            RuleResponse::Found {
                rtype: 5,
                rclass: 1,
                rdata: b"target.test".to_vec(),
            }
        );
    }

    #[test]
    fn test_comment_only_file_is_empty_table() {
        let table = compile_rules("# nothing here\n# still nothing").unwrap();
        assert!(table.is_empty());
    }
}
