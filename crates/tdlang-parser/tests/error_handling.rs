//! Error handling tests for the TDL parser.
//!
//! Verifies that the parser detects and reports:
//! - Unexpected tokens with the expected construct and line number
//! - Unexpected end of input
//! - Unknown characters (diagnosed here, not in the lexer)
//! - Type mismatches between INT and FLOAT literal positions

use tdlang_lexer::lex;
use tdlang_parser::{parse, ParseError};

/// Helper to verify that parsing fails.
fn expect_error(source: &str) -> ParseError {
    match parse(&lex(source)) {
        Ok(_) => panic!("expected parse error, but parsing succeeded"),
        Err(error) => error,
    }
}

#[test]
fn test_missing_map_name() {
    let error = expect_error("map { size = (3, 3); path = []; }");
    assert!(error.to_string().contains("map name"));
    assert!(error.to_string().contains("line 1"));
}

#[test]
fn test_missing_semicolon_after_size() {
    let error = expect_error("map M { size = (3, 3) path = []; }");
    assert!(error.to_string().contains("expected ;"));
}

#[test]
fn test_unclosed_brace() {
    let error = expect_error("wave W1 { spawn(Goblin, count=1, start=0, interval=1);");
    assert!(error.to_string().contains("end of input"));
}

#[test]
fn test_error_line_number() {
    let error = expect_error("map M {\n size = (3, 3);\n path = [];\n");
    // EOF errors report the last token's line
    assert!(error.to_string().contains("line 3"), "got: {}", error);
}

#[test]
fn test_unknown_character_reported_by_parser() {
    let error = expect_error("map M @ { size = (1, 1); path = []; }");
    assert!(error.to_string().contains("'@'"), "got: {}", error);
}

#[test]
fn test_unexpected_top_level_token() {
    let error = expect_error("size = (3, 3);");
    assert!(matches!(
        error,
        ParseError::UnexpectedDeclaration { line: 1, .. }
    ));
}

#[test]
fn test_speed_requires_float() {
    // speed must contain a '.', so an INT is a parse error
    let error = expect_error("enemy Goblin { hp = 20; speed = 1; reward = 5; }");
    assert!(error.to_string().contains("speed value"));
}

#[test]
fn test_fire_rate_requires_float() {
    let error = expect_error("tower T { range = 3; damage = 10; fire_rate = 2; cost = 50; }");
    assert!(error.to_string().contains("fire_rate value"));
}

#[test]
fn test_hp_rejects_float() {
    let error = expect_error("enemy Goblin { hp = 20.5; speed = 1.0; reward = 5; }");
    assert!(error.to_string().contains("hp value"));
}

#[test]
fn test_spawn_attribute_order_fixed() {
    // start before count violates the fixed keyword order
    let error = expect_error("wave W { spawn(Goblin, start=0, count=3, interval=1); }");
    assert!(error.to_string().contains("count"));
}

#[test]
fn test_place_requires_at() {
    let error = expect_error("place Arrow (2, 3);");
    assert!(error.to_string().contains("at"));
}

#[test]
fn test_int_out_of_range() {
    let error = expect_error(
        "map M { size = (99999999999999999999999999, 3); path = []; }",
    );
    assert!(matches!(error, ParseError::IntOutOfRange { .. }));
}

#[test]
fn test_error_stops_at_first() {
    // Both declarations are bad; only the first is reported
    let error = expect_error("map { } tower { }");
    assert!(error.to_string().contains("map name"));
}
