//! Declaration parsers, keyword-dispatched.
//!
//! Grammar (see the language reference):
//!
//! ```text
//! program     := decl*
//! decl        := map_decl | enemy_decl | tower_decl | wave_decl | place_stmt
//! map_decl    := "map" IDENT "{" "size" "=" "(" INT "," INT ")" ";"
//!                          "path" "=" "[" ( "(" INT "," INT ")" ","? )* "]" ";" "}"
//! enemy_decl  := "enemy" IDENT "{" attr=INT ";" attr=FLOAT ";" attr=INT ";" "}"
//! tower_decl  := "tower" IDENT "{" attr=INT ";" attr=INT ";" attr=FLOAT ";" attr=INT ";" "}"
//! wave_decl   := "wave" IDENT "{" spawn_stmt* "}"
//! place_stmt  := "place" IDENT "at" "(" INT "," INT ")" ";"
//! ```
//!
//! Enemy and tower attribute names are positional: they are lexed as IDENT
//! and never compared against `hp`/`speed`/`range`/... textually.

use super::{ParseError, TokenStream};
use tdlang_ast::{
    Decl, EnemyDecl, MapDecl, PlaceStmt, Program, SpawnStmt, TowerDecl, WaveDecl,
};
use tdlang_lexer::Token;

/// Sample tokens for kind checks against data-carrying variants.
fn ident_kind() -> Token {
    Token::Ident(String::new())
}
fn int_kind() -> Token {
    Token::Int(String::new())
}
fn float_kind() -> Token {
    Token::Float(String::new())
}

pub(super) fn parse_program(stream: &mut TokenStream) -> Result<Program, ParseError> {
    let mut decls = Vec::new();
    while !stream.at_end() {
        decls.push(parse_declaration(stream)?);
    }
    Ok(Program { decls })
}

fn parse_declaration(stream: &mut TokenStream) -> Result<Decl, ParseError> {
    match stream.peek() {
        Some(Token::Map) => {
            stream.advance();
            parse_map_decl(stream).map(Decl::Map)
        }
        Some(Token::Enemy) => {
            stream.advance();
            parse_enemy_decl(stream).map(Decl::Enemy)
        }
        Some(Token::Tower) => {
            stream.advance();
            parse_tower_decl(stream).map(Decl::Tower)
        }
        Some(Token::Wave) => {
            stream.advance();
            parse_wave_decl(stream).map(Decl::Wave)
        }
        Some(Token::Place) => {
            stream.advance();
            parse_place_stmt(stream).map(Decl::Place)
        }
        other => Err(ParseError::unexpected_declaration(
            other,
            stream.current_line(),
        )),
    }
}

/// Parse: map IDENT { size = (w, h); path = [(x,y) ...]; }
fn parse_map_decl(stream: &mut TokenStream) -> Result<MapDecl, ParseError> {
    let name = expect_ident(stream, "map name")?;
    stream.expect(&Token::LBrace, "{")?;

    stream.expect(&Token::Size, "size")?;
    stream.expect(&Token::Equal, "=")?;
    stream.expect(&Token::LParen, "(")?;
    let width = expect_int(stream, "map width")?;
    stream.expect(&Token::Comma, ",")?;
    let height = expect_int(stream, "map height")?;
    stream.expect(&Token::RParen, ")")?;
    stream.expect(&Token::Semicolon, ";")?;

    stream.expect(&Token::Path, "path")?;
    stream.expect(&Token::Equal, "=")?;
    stream.expect(&Token::LBracket, "[")?;
    let mut path = Vec::new();
    while !stream.eat(&Token::RBracket) {
        stream.expect(&Token::LParen, "(")?;
        let x = expect_int(stream, "x coordinate")?;
        stream.expect(&Token::Comma, ",")?;
        let y = expect_int(stream, "y coordinate")?;
        stream.expect(&Token::RParen, ")")?;
        path.push((x, y));
        // Comma between coordinate pairs is optional
        stream.eat(&Token::Comma);
    }
    stream.expect(&Token::Semicolon, ";")?;
    stream.expect(&Token::RBrace, "}")?;

    Ok(MapDecl {
        name,
        width,
        height,
        path,
    })
}

/// Parse: enemy IDENT { hp = INT; speed = FLOAT; reward = INT; }
fn parse_enemy_decl(stream: &mut TokenStream) -> Result<EnemyDecl, ParseError> {
    let name = expect_ident(stream, "enemy name")?;
    stream.expect(&Token::LBrace, "{")?;

    expect_ident(stream, "hp")?;
    stream.expect(&Token::Equal, "=")?;
    let hp = expect_int(stream, "hp value")?;
    stream.expect(&Token::Semicolon, ";")?;

    expect_ident(stream, "speed")?;
    stream.expect(&Token::Equal, "=")?;
    let speed = expect_float(stream, "speed value")?;
    stream.expect(&Token::Semicolon, ";")?;

    expect_ident(stream, "reward")?;
    stream.expect(&Token::Equal, "=")?;
    let reward = expect_int(stream, "reward value")?;
    stream.expect(&Token::Semicolon, ";")?;

    stream.expect(&Token::RBrace, "}")?;

    Ok(EnemyDecl {
        name,
        hp,
        speed,
        reward,
    })
}

/// Parse: tower IDENT { range = INT; damage = INT; fire_rate = FLOAT; cost = INT; }
fn parse_tower_decl(stream: &mut TokenStream) -> Result<TowerDecl, ParseError> {
    let name = expect_ident(stream, "tower name")?;
    stream.expect(&Token::LBrace, "{")?;

    expect_ident(stream, "range")?;
    stream.expect(&Token::Equal, "=")?;
    let range = expect_int(stream, "range value")?;
    stream.expect(&Token::Semicolon, ";")?;

    expect_ident(stream, "damage")?;
    stream.expect(&Token::Equal, "=")?;
    let damage = expect_int(stream, "damage value")?;
    stream.expect(&Token::Semicolon, ";")?;

    expect_ident(stream, "fire_rate")?;
    stream.expect(&Token::Equal, "=")?;
    let fire_rate = expect_float(stream, "fire_rate value")?;
    stream.expect(&Token::Semicolon, ";")?;

    expect_ident(stream, "cost")?;
    stream.expect(&Token::Equal, "=")?;
    let cost = expect_int(stream, "cost value")?;
    stream.expect(&Token::Semicolon, ";")?;

    stream.expect(&Token::RBrace, "}")?;

    Ok(TowerDecl {
        name,
        range,
        damage,
        fire_rate,
        cost,
    })
}

/// Parse: wave IDENT { ( spawn(IDENT, count=INT, start=INT, interval=INT); )* }
fn parse_wave_decl(stream: &mut TokenStream) -> Result<WaveDecl, ParseError> {
    let name = expect_ident(stream, "wave name")?;
    stream.expect(&Token::LBrace, "{")?;

    let mut spawns = Vec::new();
    while stream.eat(&Token::Spawn) {
        stream.expect(&Token::LParen, "(")?;
        let enemy_type = expect_ident(stream, "enemy type")?;

        stream.expect(&Token::Comma, ",")?;
        stream.expect(&Token::Count, "count")?;
        stream.expect(&Token::Equal, "=")?;
        let count = expect_int(stream, "count")?;

        stream.expect(&Token::Comma, ",")?;
        stream.expect(&Token::Start, "start")?;
        stream.expect(&Token::Equal, "=")?;
        let start = expect_int(stream, "start")?;

        stream.expect(&Token::Comma, ",")?;
        stream.expect(&Token::Interval, "interval")?;
        stream.expect(&Token::Equal, "=")?;
        let interval = expect_int(stream, "interval")?;

        stream.expect(&Token::RParen, ")")?;
        stream.expect(&Token::Semicolon, ";")?;

        spawns.push(SpawnStmt {
            enemy_type,
            count,
            start,
            interval,
        });
    }

    stream.expect(&Token::RBrace, "}")?;

    Ok(WaveDecl { name, spawns })
}

/// Parse: place IDENT at (x, y);
fn parse_place_stmt(stream: &mut TokenStream) -> Result<PlaceStmt, ParseError> {
    let tower_type = expect_ident(stream, "tower type")?;
    stream.expect(&Token::At, "at")?;
    stream.expect(&Token::LParen, "(")?;
    let x = expect_int(stream, "x coordinate")?;
    stream.expect(&Token::Comma, ",")?;
    let y = expect_int(stream, "y coordinate")?;
    stream.expect(&Token::RParen, ")")?;
    stream.expect(&Token::Semicolon, ";")?;

    Ok(PlaceStmt { tower_type, x, y })
}

fn expect_ident(stream: &mut TokenStream, what: &str) -> Result<String, ParseError> {
    let spanned = stream.expect(&ident_kind(), what)?;
    match &spanned.token {
        Token::Ident(name) => Ok(name.clone()),
        _ => unreachable!("expect() matched the Ident discriminant"),
    }
}

fn expect_int(stream: &mut TokenStream, what: &str) -> Result<i64, ParseError> {
    let spanned = stream.expect(&int_kind(), what)?;
    match &spanned.token {
        Token::Int(lexeme) => lexeme.parse().map_err(|_| ParseError::IntOutOfRange {
            lexeme: lexeme.clone(),
            line: spanned.line,
        }),
        _ => unreachable!("expect() matched the Int discriminant"),
    }
}

fn expect_float(stream: &mut TokenStream, what: &str) -> Result<f64, ParseError> {
    let spanned = stream.expect(&float_kind(), what)?;
    match &spanned.token {
        Token::Float(lexeme) => lexeme.parse().map_err(|_| ParseError::InvalidFloat {
            lexeme: lexeme.clone(),
            line: spanned.line,
        }),
        _ => unreachable!("expect() matched the Float discriminant"),
    }
}
