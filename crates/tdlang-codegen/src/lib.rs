//! Output generation for TDLang IR.
//!
//! Two modes: a `gameConfig` JSON object and a human-readable dump. The
//! JSON is built by hand because the wire format is fixed down to the
//! byte: reals always carry two decimals, sections are omitted when empty,
//! and separators appear only between present sections. A generic
//! serializer cannot reproduce that, so the emitter owns its formatting
//! and the test suite proves the result parses.
//!
//! The generators perform no validation; malformed IR produces malformed
//! output.

use tdlang_ir::{to_lines, IrInstruction, Opcode};

/// Generate the human-readable dump: a fixed header, a blank line, then
/// one canonical line per instruction.
pub fn generate_readable(instructions: &[IrInstruction]) -> String {
    let mut result = String::from("=== TDLang Compiled Output ===\n\n");
    for line in to_lines(instructions) {
        result.push_str(&line);
        result.push('\n');
    }
    result
}

/// Generate the `gameConfig` JSON document.
///
/// Section order is fixed (map, enemies, towers, waves, initialPlacements)
/// regardless of instruction order. Only the first DEFINE_MAP is emitted;
/// the optimizer has already dropped later ones.
pub fn generate_json(instructions: &[IrInstruction]) -> String {
    let mut json = String::from("{\n  \"gameConfig\": {\n");

    let mut has_map = false;
    let mut enemy_indices = Vec::new();
    let mut tower_indices = Vec::new();
    let mut wave_indices = Vec::new();
    let mut placement_indices = Vec::new();

    for (i, instruction) in instructions.iter().enumerate() {
        match instruction.opcode {
            Opcode::DefineMap => {
                if !has_map {
                    push_map_json(&mut json, instruction);
                    has_map = true;
                }
            }
            Opcode::DefineEnemy => enemy_indices.push(i),
            Opcode::DefineTower => tower_indices.push(i),
            Opcode::DefineWave => wave_indices.push(i),
            Opcode::PlaceTower => placement_indices.push(i),
            _ => {}
        }
    }

    if !enemy_indices.is_empty() {
        if has_map {
            json.push_str(",\n");
        }
        json.push_str("    \"enemies\": [\n");
        for (k, &i) in enemy_indices.iter().enumerate() {
            push_enemy_json(&mut json, &instructions[i]);
            if k + 1 < enemy_indices.len() {
                json.push(',');
            }
            json.push('\n');
        }
        json.push_str("    ]");
    }

    if !tower_indices.is_empty() {
        if has_map || !enemy_indices.is_empty() {
            json.push_str(",\n");
        }
        json.push_str("    \"towers\": [\n");
        for (k, &i) in tower_indices.iter().enumerate() {
            push_tower_json(&mut json, &instructions[i]);
            if k + 1 < tower_indices.len() {
                json.push(',');
            }
            json.push('\n');
        }
        json.push_str("    ]");
    }

    if !wave_indices.is_empty() {
        if has_map || !enemy_indices.is_empty() || !tower_indices.is_empty() {
            json.push_str(",\n");
        }
        json.push_str("    \"waves\": [\n");
        let mut first_wave = true;
        let mut i = 0;
        while i < instructions.len() {
            if instructions[i].opcode == Opcode::DefineWave {
                if !first_wave {
                    json.push_str(",\n");
                }
                first_wave = false;
                i = push_wave_json(&mut json, instructions, i);
            }
            i += 1;
        }
        json.push_str("    ]");
    }

    if !placement_indices.is_empty() {
        if has_map
            || !enemy_indices.is_empty()
            || !tower_indices.is_empty()
            || !wave_indices.is_empty()
        {
            json.push_str(",\n");
        }
        json.push_str("    \"initialPlacements\": [\n");
        for (k, &i) in placement_indices.iter().enumerate() {
            push_placement_json(&mut json, &instructions[i]);
            if k + 1 < placement_indices.len() {
                json.push(',');
            }
            json.push('\n');
        }
        json.push_str("    ]");
    }

    json.push_str("\n  }\n}\n");
    json
}

/// Escape a string for JSON output.
///
/// Handles the quote, backslash, newline, carriage return and tab; other
/// control bytes pass through unescaped (known limitation, kept for
/// output stability).
fn escape_json(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn push_map_json(json: &mut String, instruction: &IrInstruction) {
    json.push_str("    \"map\": {\n");
    json.push_str(&format!(
        "      \"name\": \"{}\",\n",
        escape_json(instruction.name())
    ));

    if let Some(width) = instruction.meta_int("width") {
        json.push_str(&format!("      \"width\": {},\n", width));
    }
    if let Some(height) = instruction.meta_int("height") {
        json.push_str(&format!("      \"height\": {},\n", height));
    }

    if let Some(path) = instruction.meta_str("path") {
        json.push_str("      \"path\": [\n");
        let mut first = true;
        for coord in path.split(';').filter(|c| !c.is_empty()) {
            if !first {
                json.push_str(",\n");
            }
            first = false;
            if let Some((x, y)) = coord.split_once(',') {
                json.push_str(&format!("        {{\"x\": {}, \"y\": {}}}", x, y));
            }
        }
        json.push_str("\n      ]\n");
    }

    json.push_str("    }");
}

fn push_enemy_json(json: &mut String, instruction: &IrInstruction) {
    json.push_str("      {\n");
    json.push_str(&format!(
        "        \"name\": \"{}\",\n",
        escape_json(instruction.name())
    ));

    if let Some(hp) = instruction.meta_int("hp") {
        json.push_str(&format!("        \"hp\": {},\n", hp));
    }
    if let Some(speed) = instruction.meta_real("speed") {
        json.push_str(&format!("        \"speed\": {:.2},\n", speed));
    }
    if let Some(reward) = instruction.meta_int("reward") {
        json.push_str(&format!("        \"reward\": {}\n", reward));
    }

    json.push_str("      }");
}

fn push_tower_json(json: &mut String, instruction: &IrInstruction) {
    json.push_str("      {\n");
    json.push_str(&format!(
        "        \"name\": \"{}\",\n",
        escape_json(instruction.name())
    ));

    if let Some(range) = instruction.meta_int("range") {
        json.push_str(&format!("        \"range\": {},\n", range));
    }
    if let Some(damage) = instruction.meta_int("damage") {
        json.push_str(&format!("        \"damage\": {},\n", damage));
    }
    if let Some(fire_rate) = instruction.meta_real("fire_rate") {
        json.push_str(&format!("        \"fireRate\": {:.2},\n", fire_rate));
    }
    if let Some(cost) = instruction.meta_int("cost") {
        json.push_str(&format!("        \"cost\": {}", cost));
    }

    // dps is attached by the optimizer's constant folding pass
    if let Some(dps) = instruction.meta_real("dps") {
        json.push_str(&format!(",\n        \"dps\": {:.2}", dps));
    }

    json.push_str("\n      }");
}

/// Append the wave at `index` and its contiguous spawns.
///
/// Returns the index of the last spawn consumed, so the caller's scan
/// continues after the group. A spawn whose wave operand differs ends the
/// group.
fn push_wave_json(json: &mut String, instructions: &[IrInstruction], index: usize) -> usize {
    let wave = &instructions[index];
    json.push_str("      {\n");
    json.push_str(&format!(
        "        \"name\": \"{}\",\n",
        escape_json(wave.name())
    ));
    json.push_str("        \"spawns\": [\n");

    let mut first_spawn = true;
    let mut i = index + 1;

    while i < instructions.len()
        && instructions[i].opcode == Opcode::SpawnEnemy
        && instructions[i].name() == wave.name()
    {
        let spawn = &instructions[i];

        if !first_spawn {
            json.push_str(",\n");
        }
        first_spawn = false;

        json.push_str("          {\n");
        json.push_str(&format!(
            "            \"enemyType\": \"{}\",\n",
            escape_json(spawn.operands.get(1).map(String::as_str).unwrap_or(""))
        ));
        if let Some(count) = spawn.meta_int("count") {
            json.push_str(&format!("            \"count\": {},\n", count));
        }
        if let Some(start) = spawn.meta_int("start") {
            json.push_str(&format!("            \"start\": {},\n", start));
        }
        if let Some(interval) = spawn.meta_int("interval") {
            json.push_str(&format!("            \"interval\": {}\n", interval));
        }
        json.push_str("          }");
        i += 1;
    }

    json.push_str("\n        ]\n      }");

    i - 1
}

fn push_placement_json(json: &mut String, instruction: &IrInstruction) {
    json.push_str("      {\n");
    json.push_str(&format!(
        "        \"towerType\": \"{}\",\n",
        escape_json(instruction.name())
    ));

    if let Some(x) = instruction.meta_int("x") {
        json.push_str(&format!("        \"x\": {},\n", x));
    }
    if let Some(y) = instruction.meta_int("y") {
        json.push_str(&format!("        \"y\": {}\n", y));
    }

    json.push_str("      }");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tdlang_ir::IrInstruction;

    fn map_instruction() -> IrInstruction {
        IrInstruction::new(Opcode::DefineMap)
            .operand("M")
            .with_int("width", 3)
            .with_int("height", 3)
            .with_str("path", "0,0;1,0;2,0")
    }

    #[test]
    fn test_minimal_map_json() {
        let json = generate_json(&[map_instruction()]);
        let expected = "{\n  \"gameConfig\": {\n    \"map\": {\n      \"name\": \"M\",\n      \
                        \"width\": 3,\n      \"height\": 3,\n      \"path\": [\n        \
                        {\"x\": 0, \"y\": 0},\n        {\"x\": 1, \"y\": 0},\n        \
                        {\"x\": 2, \"y\": 0}\n      ]\n    }\n  }\n}\n";
        assert_eq!(json, expected);
    }

    #[test]
    fn test_json_is_parseable() {
        let instructions = vec![
            map_instruction(),
            IrInstruction::new(Opcode::DefineEnemy)
                .operand("Goblin")
                .with_int("hp", 20)
                .with_real("speed", 1.5)
                .with_int("reward", 5),
            IrInstruction::new(Opcode::DefineTower)
                .operand("Arrow")
                .with_int("range", 3)
                .with_int("damage", 10)
                .with_real("fire_rate", 1.5)
                .with_int("cost", 100)
                .with_real("dps", 15.0),
            IrInstruction::new(Opcode::DefineWave).operand("W1"),
            IrInstruction::new(Opcode::SpawnEnemy)
                .operand("W1")
                .operand("Goblin")
                .with_int("count", 3)
                .with_int("start", 0)
                .with_int("interval", 1),
            IrInstruction::new(Opcode::PlaceTower)
                .operand("Arrow")
                .with_int("x", 1)
                .with_int("y", 2),
        ];
        let json = generate_json(&instructions);
        let value: serde_json::Value = serde_json::from_str(&json).expect("emitted invalid JSON");

        let config = &value["gameConfig"];
        assert_eq!(config["map"]["name"], "M");
        assert_eq!(config["enemies"][0]["hp"], 20);
        assert_eq!(config["towers"][0]["fireRate"], 1.5);
        assert_eq!(config["towers"][0]["dps"], 15.0);
        assert_eq!(config["waves"][0]["spawns"][0]["enemyType"], "Goblin");
        assert_eq!(config["initialPlacements"][0]["towerType"], "Arrow");
    }

    #[test]
    fn test_reals_have_two_decimals() {
        let json = generate_json(&[IrInstruction::new(Opcode::DefineEnemy)
            .operand("Goblin")
            .with_int("hp", 20)
            .with_real("speed", 1.5)
            .with_int("reward", 5)]);
        assert!(json.contains("\"speed\": 1.50,"));
    }

    #[test]
    fn test_empty_sections_omitted() {
        let json = generate_json(&[map_instruction()]);
        assert!(!json.contains("enemies"));
        assert!(!json.contains("towers"));
        assert!(!json.contains("waves"));
        assert!(!json.contains("initialPlacements"));
    }

    #[test]
    fn test_no_map_section_without_map() {
        let json = generate_json(&[IrInstruction::new(Opcode::DefineEnemy)
            .operand("Goblin")
            .with_int("hp", 20)
            .with_real("speed", 1.5)
            .with_int("reward", 5)]);
        assert!(!json.contains("\"map\""));
        assert!(json.starts_with("{\n  \"gameConfig\": {\n    \"enemies\": [\n"));
        serde_json::from_str::<serde_json::Value>(&json).expect("emitted invalid JSON");
    }

    #[test]
    fn test_only_first_map_emitted() {
        let second = IrInstruction::new(Opcode::DefineMap)
            .operand("Other")
            .with_int("width", 9)
            .with_int("height", 9)
            .with_str("path", "");
        let json = generate_json(&[map_instruction(), second]);
        assert!(json.contains("\"name\": \"M\""));
        assert!(!json.contains("Other"));
    }

    #[test]
    fn test_empty_path_array() {
        let instruction = IrInstruction::new(Opcode::DefineMap)
            .operand("M")
            .with_int("width", 2)
            .with_int("height", 2)
            .with_str("path", "");
        let json = generate_json(&[instruction]);
        assert!(json.contains("\"path\": [\n\n      ]"));
        serde_json::from_str::<serde_json::Value>(&json).expect("emitted invalid JSON");
    }

    #[test]
    fn test_string_escaping() {
        let instruction = IrInstruction::new(Opcode::DefineEnemy)
            .operand("a\"b\\c\nd")
            .with_int("hp", 1)
            .with_real("speed", 1.0)
            .with_int("reward", 0);
        let json = generate_json(&[instruction]);
        assert!(json.contains(r#""name": "a\"b\\c\nd""#));
        let value: serde_json::Value = serde_json::from_str(&json).expect("emitted invalid JSON");
        assert_eq!(value["gameConfig"]["enemies"][0]["name"], "a\"b\\c\nd");
    }

    #[test]
    fn test_readable_header_and_lines() {
        let readable = generate_readable(&[
            map_instruction(),
            IrInstruction::new(Opcode::DefineWave).operand("W1"),
            IrInstruction::new(Opcode::SpawnEnemy)
                .operand("W1")
                .operand("Goblin")
                .with_int("count", 3)
                .with_int("start", 0)
                .with_int("interval", 1),
        ]);
        let lines: Vec<&str> = readable.lines().collect();
        assert_eq!(lines[0], "=== TDLang Compiled Output ===");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "DEFINE_MAP M WIDTH=3 HEIGHT=3 PATH=[0,0;1,0;2,0]");
        assert_eq!(lines[3], "DEFINE_WAVE W1");
        assert_eq!(lines[4], "  SPAWN_ENEMY Goblin IN_WAVE=W1 COUNT=3 START=0 INTERVAL=1");
        assert!(readable.ends_with('\n'));
    }

    #[test]
    fn test_readable_of_empty_ir() {
        assert_eq!(generate_readable(&[]), "=== TDLang Compiled Output ===\n\n");
    }
}
