//! Semantic validation for TDLang.
//!
//! Walks declarations in source order, building a symbol table per
//! declaration kind, and enforces the reference and range rules. Because
//! the walk is in source order, declaration order is semantically
//! significant: enemies must precede the waves that spawn them, towers must
//! precede placements, and a map must precede any placement. A reference
//! that textually appears later in the file is an error.
//!
//! Validation is fail-fast: the first violated rule aborts the walk.

use std::collections::HashMap;

use tdlang_ast::{Decl, EnemyDecl, MapDecl, PlaceStmt, Program, TowerDecl, WaveDecl};
use thiserror::Error;

/// Semantic rule violations.
///
/// Display strings are part of the compiler's contract; tooling matches on
/// them (e.g. "Tower placement out of map bounds.").
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SemanticError {
    #[error("Duplicate map name {0}")]
    DuplicateMap(String),
    #[error("Invalid map size.")]
    InvalidMapSize,
    #[error("Path coordinate out of map bounds.")]
    PathOutOfBounds,
    #[error("Duplicate enemy: {0}")]
    DuplicateEnemy(String),
    #[error("Enemy HP must be positive.")]
    NonPositiveHp,
    #[error("Enemy speed must be positive.")]
    NonPositiveSpeed,
    #[error("Enemy reward cannot be negative.")]
    NegativeReward,
    #[error("Duplicate tower: {0}")]
    DuplicateTower(String),
    #[error("Invalid tower stats.")]
    InvalidTowerStats,
    #[error("Tower fire rate must be positive.")]
    NonPositiveFireRate,
    #[error("Duplicate wave: {0}")]
    DuplicateWave(String),
    #[error("Wave uses undefined enemy: {0}")]
    UndefinedEnemy(String),
    #[error("Invalid spawn parameters.")]
    InvalidSpawnParameters,
    #[error("Placing undefined tower type: {0}")]
    UndefinedTower(String),
    #[error("Place statement appears before map definition.")]
    PlacementBeforeMap,
    #[error("Tower placement out of map bounds.")]
    PlacementOutOfBounds,
}

/// Symbol table for semantic validation.
///
/// Tracks declarations by kind plus the most recently defined map, which
/// anchors placement bounds checks.
#[derive(Debug, Default)]
struct SymbolTable<'ast> {
    maps: HashMap<&'ast str, &'ast MapDecl>,
    enemies: HashMap<&'ast str, &'ast EnemyDecl>,
    towers: HashMap<&'ast str, &'ast TowerDecl>,
    waves: HashMap<&'ast str, &'ast WaveDecl>,
    current_map: Option<&'ast MapDecl>,
}

/// Validate a program against the semantic rules.
///
/// # Returns
///
/// - `Ok(())` if every rule holds
/// - `Err(SemanticError)` for the first violation in source order
pub fn analyze(program: &Program) -> Result<(), SemanticError> {
    let mut symbols = SymbolTable::default();

    for decl in &program.decls {
        match decl {
            Decl::Map(map) => check_map(&mut symbols, map)?,
            Decl::Enemy(enemy) => check_enemy(&mut symbols, enemy)?,
            Decl::Tower(tower) => check_tower(&mut symbols, tower)?,
            Decl::Wave(wave) => check_wave(&mut symbols, wave)?,
            Decl::Place(place) => check_placement(&symbols, place)?,
        }
    }

    Ok(())
}

fn check_map<'ast>(
    symbols: &mut SymbolTable<'ast>,
    map: &'ast MapDecl,
) -> Result<(), SemanticError> {
    if symbols.maps.contains_key(map.name.as_str()) {
        return Err(SemanticError::DuplicateMap(map.name.clone()));
    }
    symbols.maps.insert(&map.name, map);
    symbols.current_map = Some(map);

    if map.width <= 0 || map.height <= 0 {
        return Err(SemanticError::InvalidMapSize);
    }

    for &(x, y) in &map.path {
        if x < 0 || x >= map.width || y < 0 || y >= map.height {
            return Err(SemanticError::PathOutOfBounds);
        }
    }

    Ok(())
}

fn check_enemy<'ast>(
    symbols: &mut SymbolTable<'ast>,
    enemy: &'ast EnemyDecl,
) -> Result<(), SemanticError> {
    if symbols.enemies.contains_key(enemy.name.as_str()) {
        return Err(SemanticError::DuplicateEnemy(enemy.name.clone()));
    }
    symbols.enemies.insert(&enemy.name, enemy);

    if enemy.hp <= 0 {
        return Err(SemanticError::NonPositiveHp);
    }
    if enemy.speed <= 0.0 {
        return Err(SemanticError::NonPositiveSpeed);
    }
    if enemy.reward < 0 {
        return Err(SemanticError::NegativeReward);
    }

    Ok(())
}

fn check_tower<'ast>(
    symbols: &mut SymbolTable<'ast>,
    tower: &'ast TowerDecl,
) -> Result<(), SemanticError> {
    if symbols.towers.contains_key(tower.name.as_str()) {
        return Err(SemanticError::DuplicateTower(tower.name.clone()));
    }
    symbols.towers.insert(&tower.name, tower);

    if tower.range <= 0 || tower.damage <= 0 || tower.cost < 0 {
        return Err(SemanticError::InvalidTowerStats);
    }
    if tower.fire_rate <= 0.0 {
        return Err(SemanticError::NonPositiveFireRate);
    }

    Ok(())
}

fn check_wave<'ast>(
    symbols: &mut SymbolTable<'ast>,
    wave: &'ast WaveDecl,
) -> Result<(), SemanticError> {
    if symbols.waves.contains_key(wave.name.as_str()) {
        return Err(SemanticError::DuplicateWave(wave.name.clone()));
    }
    symbols.waves.insert(&wave.name, wave);

    for spawn in &wave.spawns {
        if !symbols.enemies.contains_key(spawn.enemy_type.as_str()) {
            return Err(SemanticError::UndefinedEnemy(spawn.enemy_type.clone()));
        }
        if spawn.count <= 0 || spawn.start < 0 || spawn.interval <= 0 {
            return Err(SemanticError::InvalidSpawnParameters);
        }
    }

    Ok(())
}

fn check_placement(symbols: &SymbolTable, place: &PlaceStmt) -> Result<(), SemanticError> {
    if !symbols.towers.contains_key(place.tower_type.as_str()) {
        return Err(SemanticError::UndefinedTower(place.tower_type.clone()));
    }

    let Some(map) = symbols.current_map else {
        return Err(SemanticError::PlacementBeforeMap);
    };

    if place.x < 0 || place.x >= map.width || place.y < 0 || place.y >= map.height {
        return Err(SemanticError::PlacementOutOfBounds);
    }

    Ok(())
}
