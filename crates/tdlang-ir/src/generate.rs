//! AST to IR lowering.

use crate::instruction::{IrInstruction, Opcode};
use tdlang_ast::{Decl, Program};

/// Lower a validated program to IR.
///
/// Single pass in declaration order. Each wave definition is immediately
/// followed by one SPAWN_ENEMY per spawn, in spawn order, with no other
/// instruction in between; the optimizer and code generator rely on that
/// grouping. The function is pure: the same program lowers to the same
/// instruction sequence.
pub fn generate(program: &Program) -> Vec<IrInstruction> {
    let mut code = Vec::new();

    for decl in &program.decls {
        match decl {
            Decl::Map(map) => {
                let path = map
                    .path
                    .iter()
                    .map(|(x, y)| format!("{},{}", x, y))
                    .collect::<Vec<_>>()
                    .join(";");
                code.push(
                    IrInstruction::new(Opcode::DefineMap)
                        .operand(&map.name)
                        .with_int("width", map.width)
                        .with_int("height", map.height)
                        .with_str("path", path),
                );
            }
            Decl::Enemy(enemy) => {
                code.push(
                    IrInstruction::new(Opcode::DefineEnemy)
                        .operand(&enemy.name)
                        .with_int("hp", enemy.hp)
                        .with_real("speed", enemy.speed)
                        .with_int("reward", enemy.reward),
                );
            }
            Decl::Tower(tower) => {
                code.push(
                    IrInstruction::new(Opcode::DefineTower)
                        .operand(&tower.name)
                        .with_int("range", tower.range)
                        .with_int("damage", tower.damage)
                        .with_real("fire_rate", tower.fire_rate)
                        .with_int("cost", tower.cost),
                );
            }
            Decl::Wave(wave) => {
                code.push(IrInstruction::new(Opcode::DefineWave).operand(&wave.name));
                for spawn in &wave.spawns {
                    code.push(
                        IrInstruction::new(Opcode::SpawnEnemy)
                            .operand(&wave.name)
                            .operand(&spawn.enemy_type)
                            .with_int("count", spawn.count)
                            .with_int("start", spawn.start)
                            .with_int("interval", spawn.interval),
                    );
                }
            }
            Decl::Place(place) => {
                code.push(
                    IrInstruction::new(Opcode::PlaceTower)
                        .operand(&place.tower_type)
                        .with_int("x", place.x)
                        .with_int("y", place.y),
                );
            }
        }
    }

    code
}

#[cfg(test)]
mod tests {
    use super::*;
    use tdlang_ast::{EnemyDecl, MapDecl, SpawnStmt, WaveDecl};

    fn sample_program() -> Program {
        Program {
            decls: vec![
                Decl::Map(MapDecl {
                    name: "M".to_owned(),
                    width: 3,
                    height: 3,
                    path: vec![(0, 0), (1, 0)],
                }),
                Decl::Enemy(EnemyDecl {
                    name: "Goblin".to_owned(),
                    hp: 20,
                    speed: 1.5,
                    reward: 5,
                }),
                Decl::Wave(WaveDecl {
                    name: "W1".to_owned(),
                    spawns: vec![
                        SpawnStmt {
                            enemy_type: "Goblin".to_owned(),
                            count: 3,
                            start: 0,
                            interval: 1,
                        },
                        SpawnStmt {
                            enemy_type: "Goblin".to_owned(),
                            count: 2,
                            start: 10,
                            interval: 2,
                        },
                    ],
                }),
            ],
        }
    }

    #[test]
    fn test_emission_order() {
        let code = generate(&sample_program());
        let opcodes: Vec<Opcode> = code.iter().map(|i| i.opcode).collect();
        assert_eq!(
            opcodes,
            vec![
                Opcode::DefineMap,
                Opcode::DefineEnemy,
                Opcode::DefineWave,
                Opcode::SpawnEnemy,
                Opcode::SpawnEnemy,
            ]
        );
    }

    #[test]
    fn test_path_metadata_string() {
        let code = generate(&sample_program());
        assert_eq!(code[0].meta_str("path"), Some("0,0;1,0"));
    }

    #[test]
    fn test_empty_path_is_empty_string() {
        let program = Program {
            decls: vec![Decl::Map(MapDecl {
                name: "M".to_owned(),
                width: 2,
                height: 2,
                path: vec![],
            })],
        };
        assert_eq!(generate(&program)[0].meta_str("path"), Some(""));
    }

    #[test]
    fn test_spawn_operands_and_metadata() {
        let code = generate(&sample_program());
        let spawn = &code[3];
        assert_eq!(spawn.operands, vec!["W1".to_owned(), "Goblin".to_owned()]);
        assert_eq!(spawn.meta_int("count"), Some(3));
        assert_eq!(spawn.meta_int("start"), Some(0));
        assert_eq!(spawn.meta_int("interval"), Some(1));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let program = sample_program();
        assert_eq!(generate(&program), generate(&program));
    }
}
