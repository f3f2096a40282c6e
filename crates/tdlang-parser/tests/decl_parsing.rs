//! Declaration parsing tests for the TDL parser.

use tdlang_ast::{Decl, Program};
use tdlang_lexer::lex;
use tdlang_parser::parse;

/// Helper for tests that expect success.
fn parse_ok(source: &str) -> Program {
    parse(&lex(source)).expect("parse should succeed")
}

#[test]
fn test_empty_program() {
    let program = parse_ok("");
    assert!(program.decls.is_empty());
}

#[test]
fn test_map_declaration() {
    let program = parse_ok("map M { size = (3, 3); path = [(0,0),(1,0),(2,0)]; }");
    assert_eq!(program.decls.len(), 1);
    let Decl::Map(map) = &program.decls[0] else {
        panic!("expected map declaration");
    };
    assert_eq!(map.name, "M");
    assert_eq!(map.width, 3);
    assert_eq!(map.height, 3);
    assert_eq!(map.path, vec![(0, 0), (1, 0), (2, 0)]);
}

#[test]
fn test_map_empty_path() {
    let program = parse_ok("map M { size = (4, 4); path = []; }");
    let Decl::Map(map) = &program.decls[0] else {
        panic!("expected map declaration");
    };
    assert!(map.path.is_empty());
}

#[test]
fn test_map_path_commas_optional() {
    let with_commas = parse_ok("map M { size = (3, 3); path = [(0,0),(1,1),(2,2)]; }");
    let without = parse_ok("map M { size = (3, 3); path = [(0,0)(1,1)(2,2)]; }");
    assert_eq!(with_commas, without);
}

#[test]
fn test_enemy_declaration() {
    let program = parse_ok("enemy Goblin { hp = 20; speed = 1.5; reward = 5; }");
    let Decl::Enemy(enemy) = &program.decls[0] else {
        panic!("expected enemy declaration");
    };
    assert_eq!(enemy.name, "Goblin");
    assert_eq!(enemy.hp, 20);
    assert_eq!(enemy.speed, 1.5);
    assert_eq!(enemy.reward, 5);
}

#[test]
fn test_enemy_attribute_names_are_positional() {
    // The attribute labels are IDENTs and never checked textually
    let odd = parse_ok("enemy Goblin { health = 20; pace = 1.5; gold = 5; }");
    let canonical = parse_ok("enemy Goblin { hp = 20; speed = 1.5; reward = 5; }");
    assert_eq!(odd, canonical);
}

#[test]
fn test_tower_declaration() {
    let program =
        parse_ok("tower Arrow { range = 3; damage = 10; fire_rate = 1.5; cost = 100; }");
    let Decl::Tower(tower) = &program.decls[0] else {
        panic!("expected tower declaration");
    };
    assert_eq!(tower.name, "Arrow");
    assert_eq!(tower.range, 3);
    assert_eq!(tower.damage, 10);
    assert_eq!(tower.fire_rate, 1.5);
    assert_eq!(tower.cost, 100);
}

#[test]
fn test_wave_declaration() {
    let program = parse_ok(
        "wave W1 {
            spawn(Goblin, count=3, start=0, interval=1);
            spawn(Orc, count=2, start=5, interval=2);
        }",
    );
    let Decl::Wave(wave) = &program.decls[0] else {
        panic!("expected wave declaration");
    };
    assert_eq!(wave.name, "W1");
    assert_eq!(wave.spawns.len(), 2);
    assert_eq!(wave.spawns[0].enemy_type, "Goblin");
    assert_eq!(wave.spawns[0].count, 3);
    assert_eq!(wave.spawns[0].start, 0);
    assert_eq!(wave.spawns[0].interval, 1);
    assert_eq!(wave.spawns[1].enemy_type, "Orc");
}

#[test]
fn test_empty_wave() {
    let program = parse_ok("wave W1 { }");
    let Decl::Wave(wave) = &program.decls[0] else {
        panic!("expected wave declaration");
    };
    assert!(wave.spawns.is_empty());
}

#[test]
fn test_place_statement() {
    let program = parse_ok("place Arrow at (2, 3);");
    let Decl::Place(place) = &program.decls[0] else {
        panic!("expected place statement");
    };
    assert_eq!(place.tower_type, "Arrow");
    assert_eq!(place.x, 2);
    assert_eq!(place.y, 3);
}

#[test]
fn test_declaration_order_preserved() {
    let program = parse_ok(
        "enemy Goblin { hp = 20; speed = 1.5; reward = 5; }
         map M { size = (3, 3); path = []; }
         tower Arrow { range = 3; damage = 10; fire_rate = 1.5; cost = 100; }
         wave W1 { }
         place Arrow at (0, 0);",
    );
    let kinds: Vec<&str> = program
        .decls
        .iter()
        .map(|d| match d {
            Decl::Map(_) => "map",
            Decl::Enemy(_) => "enemy",
            Decl::Tower(_) => "tower",
            Decl::Wave(_) => "wave",
            Decl::Place(_) => "place",
        })
        .collect();
    assert_eq!(kinds, vec!["enemy", "map", "tower", "wave", "place"]);
}

#[test]
fn test_comments_between_declarations() {
    let program = parse_ok(
        "// the map
         map M { size = (2, 2); path = []; }
         // the hero of our story
         enemy Goblin { hp = 20; speed = 1.5; reward = 5; }",
    );
    assert_eq!(program.decls.len(), 2);
}
