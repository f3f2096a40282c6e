//! IR optimization passes.
//!
//! Four passes run in a fixed order:
//!
//! 1. Duplicate definition removal (first occurrence wins)
//! 2. Redundant spawn merging (equal-keyed spawns sum their counts)
//! 3. Constant folding (tower `dps`, spawn `total_duration`)
//! 4. Dead code elimination (unreferenced enemy/tower definitions, NOPs)
//!
//! The composition preserves the wave grouping invariant: pass 2 keys on
//! the wave name, so a merge never moves a spawn across its wave boundary,
//! and pass 4 only ever removes instructions.
//!
//! Running the pipeline on already-optimized IR is a no-op.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::instruction::{IrInstruction, MetaValue, Opcode};

/// Run all optimization passes and return the new sequence.
pub fn optimize(instructions: Vec<IrInstruction>) -> Vec<IrInstruction> {
    let instructions = duplicate_definition_removal(instructions);
    let instructions = redundant_spawn_merging(instructions);
    let instructions = constant_folding(instructions);
    dead_code_elimination(instructions)
}

fn is_definition(opcode: Opcode) -> bool {
    matches!(
        opcode,
        Opcode::DefineMap | Opcode::DefineEnemy | Opcode::DefineTower | Opcode::DefineWave
    )
}

/// `KIND:name` key identifying a definition instruction.
fn definition_key(instruction: &IrInstruction) -> String {
    let prefix = match instruction.opcode {
        Opcode::DefineMap => "MAP",
        Opcode::DefineEnemy => "ENEMY",
        Opcode::DefineTower => "TOWER",
        Opcode::DefineWave => "WAVE",
        _ => "UNKNOWN",
    };
    format!("{}:{}", prefix, instruction.name())
}

/// Drop repeated definitions of the same kind and name, keeping the first.
///
/// Defensive: the semantic analyzer already rejects duplicates, but the
/// optimizer does not assume validated input.
fn duplicate_definition_removal(instructions: Vec<IrInstruction>) -> Vec<IrInstruction> {
    let mut optimized = Vec::with_capacity(instructions.len());
    let mut seen = HashSet::new();

    for instruction in instructions {
        if is_definition(instruction.opcode) && !instruction.operands.is_empty() {
            let key = definition_key(&instruction);
            if !seen.insert(key.clone()) {
                debug!("removing duplicate definition: {}", key);
                continue;
            }
        }
        optimized.push(instruction);
    }

    optimized
}

/// Merge spawns that share `wave|enemy|start|interval`, summing counts
/// into the earliest occurrence.
///
/// The key embeds the wave name, so merging never crosses a DEFINE_WAVE
/// boundary and non-merged spawn order is untouched.
fn redundant_spawn_merging(instructions: Vec<IrInstruction>) -> Vec<IrInstruction> {
    let mut optimized: Vec<IrInstruction> = Vec::with_capacity(instructions.len());
    let mut spawn_index: HashMap<String, usize> = HashMap::new();

    for instruction in instructions {
        if instruction.opcode == Opcode::SpawnEnemy && instruction.operands.len() >= 2 {
            let key = format!(
                "{}|{}|{}|{}",
                instruction.operands[0],
                instruction.operands[1],
                instruction.meta_int("start").unwrap_or(0),
                instruction.meta_int("interval").unwrap_or(0),
            );

            if let Some(&index) = spawn_index.get(&key) {
                let existing = optimized[index].meta_int("count").unwrap_or(0);
                let added = instruction.meta_int("count").unwrap_or(0);
                optimized[index]
                    .metadata
                    .insert("count".to_owned(), MetaValue::Int(existing + added));
                debug!("merged redundant spawn in wave {}", instruction.operands[0]);
            } else {
                spawn_index.insert(key, optimized.len());
                optimized.push(instruction);
            }
        } else {
            optimized.push(instruction);
        }
    }

    optimized
}

/// Attach derived metadata computable at compile time.
///
/// Towers gain `dps = damage * fire_rate`; spawns gain
/// `total_duration = count * interval`.
fn constant_folding(instructions: Vec<IrInstruction>) -> Vec<IrInstruction> {
    instructions
        .into_iter()
        .map(|mut instruction| {
            match instruction.opcode {
                Opcode::DefineTower => {
                    if let (Some(damage), Some(fire_rate)) = (
                        instruction.meta_int("damage"),
                        instruction.meta_real("fire_rate"),
                    ) {
                        instruction
                            .metadata
                            .insert("dps".to_owned(), MetaValue::Real(damage as f64 * fire_rate));
                    }
                }
                Opcode::SpawnEnemy => {
                    if let (Some(count), Some(interval)) = (
                        instruction.meta_int("count"),
                        instruction.meta_int("interval"),
                    ) {
                        instruction
                            .metadata
                            .insert("total_duration".to_owned(), MetaValue::Int(count * interval));
                    }
                }
                _ => {}
            }
            instruction
        })
        .collect()
}

/// Drop unreferenced enemy/tower definitions and all NOPs.
///
/// Maps and waves are always retained; spawns and placements are
/// references, not definitions, and are always retained.
fn dead_code_elimination(instructions: Vec<IrInstruction>) -> Vec<IrInstruction> {
    let mut referenced_enemies: HashSet<String> = HashSet::new();
    let mut referenced_towers: HashSet<String> = HashSet::new();

    for instruction in &instructions {
        match instruction.opcode {
            Opcode::SpawnEnemy => {
                if let Some(enemy) = instruction.operands.get(1) {
                    referenced_enemies.insert(enemy.clone());
                }
            }
            Opcode::PlaceTower => {
                if let Some(tower) = instruction.operands.first() {
                    referenced_towers.insert(tower.clone());
                }
            }
            _ => {}
        }
    }

    instructions
        .into_iter()
        .filter(|instruction| match instruction.opcode {
            Opcode::DefineEnemy => {
                let keep = referenced_enemies.contains(instruction.name());
                if !keep {
                    debug!("DCE: removing unreferenced enemy: {}", instruction.name());
                }
                keep
            }
            Opcode::DefineTower => {
                let keep = referenced_towers.contains(instruction.name());
                if !keep {
                    debug!("DCE: removing unreferenced tower: {}", instruction.name());
                }
                keep
            }
            Opcode::Nop => false,
            _ => true,
        })
        .collect()
}
