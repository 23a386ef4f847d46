use super::*;

#[test]
fn codes_round_trip_through_strings() {
    for code in ErrorCode::ALL {
        assert_eq!(code.as_str().parse::<ErrorCode>(), Ok(*code));
        assert_eq!(code.to_string(), code.as_str());
    }
    assert_eq!("e2001".parse::<ErrorCode>(), Ok(ErrorCode::E2001));
    assert_eq!("E4242".parse::<ErrorCode>(), Err(()));
}

#[test]
fn stage_predicates_follow_the_prefix() {
    assert!(ErrorCode::E0005.is_lexical());
    assert!(ErrorCode::E1002.is_macro());
    assert!(ErrorCode::E2001.is_syntax());
    assert!(!ErrorCode::E3002.is_syntax());
}

#[test]
fn resource_limits_are_fatal_by_default() {
    for code in [ErrorCode::E1002, ErrorCode::E2003, ErrorCode::E9001] {
        assert_eq!(code.default_severity(), Severity::Fatal);
    }
    assert_eq!(ErrorCode::E2001.default_severity(), Severity::Error);
}

#[test]
fn unfinished_invocations_are_fatal_by_default() {
    assert_eq!(ErrorCode::E1003.default_severity(), Severity::Fatal);
    assert_eq!(ErrorCode::E1004.default_severity(), Severity::Fatal);
    assert_eq!(ErrorCode::E1001.default_severity(), Severity::Error);
}

#[test]
fn every_code_has_a_description() {
    for code in ErrorCode::ALL {
        assert!(!code.description().is_empty());
    }
}
