//! IR instruction types and the canonical readable formatter.

use indexmap::IndexMap;

/// IR instruction opcodes.
///
/// `SetValue` and `LoadConst` are reserved for runtime lowering and are
/// never emitted by any pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    DefineMap,
    DefineEnemy,
    DefineTower,
    DefineWave,
    SpawnEnemy,
    PlaceTower,
    SetValue,
    LoadConst,
    Nop,
}

/// A typed metadata value attached to an instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    Int(i64),
    Real(f64),
    Str(String),
}

impl MetaValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            MetaValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            MetaValue::Real(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::Str(v) => Some(v),
            _ => None,
        }
    }
}

/// A single IR instruction: opcode, ordered operands, keyed metadata.
///
/// Metadata keeps insertion order so that formatting and debugging stay
/// deterministic run to run.
#[derive(Debug, Clone, PartialEq)]
pub struct IrInstruction {
    pub opcode: Opcode,
    pub operands: Vec<String>,
    pub metadata: IndexMap<String, MetaValue>,
}

impl IrInstruction {
    pub fn new(opcode: Opcode) -> Self {
        Self {
            opcode,
            operands: Vec::new(),
            metadata: IndexMap::new(),
        }
    }

    pub fn operand(mut self, operand: impl Into<String>) -> Self {
        self.operands.push(operand.into());
        self
    }

    pub fn with_int(mut self, key: &str, value: i64) -> Self {
        self.metadata.insert(key.to_owned(), MetaValue::Int(value));
        self
    }

    pub fn with_real(mut self, key: &str, value: f64) -> Self {
        self.metadata.insert(key.to_owned(), MetaValue::Real(value));
        self
    }

    pub fn with_str(mut self, key: &str, value: impl Into<String>) -> Self {
        self.metadata
            .insert(key.to_owned(), MetaValue::Str(value.into()));
        self
    }

    /// Integer metadata lookup.
    pub fn meta_int(&self, key: &str) -> Option<i64> {
        self.metadata.get(key).and_then(MetaValue::as_int)
    }

    /// Real metadata lookup.
    pub fn meta_real(&self, key: &str) -> Option<f64> {
        self.metadata.get(key).and_then(MetaValue::as_real)
    }

    /// String metadata lookup.
    pub fn meta_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(MetaValue::as_str)
    }

    /// First operand, or "" for a malformed instruction.
    pub fn name(&self) -> &str {
        self.operands.first().map(String::as_str).unwrap_or("")
    }
}

/// Format instructions into their canonical readable lines.
///
/// One line per instruction; spawn lines are indented two spaces under
/// their wave. Metadata fields are emitted only when present, so a
/// malformed instruction formats short rather than panicking.
pub fn to_lines(instructions: &[IrInstruction]) -> Vec<String> {
    instructions.iter().map(format_instruction).collect()
}

fn format_instruction(instruction: &IrInstruction) -> String {
    let mut line = String::new();

    match instruction.opcode {
        Opcode::DefineMap => {
            line.push_str(&format!("DEFINE_MAP {}", instruction.name()));
            if let Some(width) = instruction.meta_int("width") {
                line.push_str(&format!(" WIDTH={}", width));
            }
            if let Some(height) = instruction.meta_int("height") {
                line.push_str(&format!(" HEIGHT={}", height));
            }
            if let Some(path) = instruction.meta_str("path") {
                line.push_str(&format!(" PATH=[{}]", path));
            }
        }
        Opcode::DefineEnemy => {
            line.push_str(&format!("DEFINE_ENEMY {}", instruction.name()));
            if let Some(hp) = instruction.meta_int("hp") {
                line.push_str(&format!(" HP={}", hp));
            }
            if let Some(speed) = instruction.meta_real("speed") {
                line.push_str(&format!(" SPEED={}", speed));
            }
            if let Some(reward) = instruction.meta_int("reward") {
                line.push_str(&format!(" REWARD={}", reward));
            }
        }
        Opcode::DefineTower => {
            line.push_str(&format!("DEFINE_TOWER {}", instruction.name()));
            if let Some(range) = instruction.meta_int("range") {
                line.push_str(&format!(" RANGE={}", range));
            }
            if let Some(damage) = instruction.meta_int("damage") {
                line.push_str(&format!(" DAMAGE={}", damage));
            }
            if let Some(fire_rate) = instruction.meta_real("fire_rate") {
                line.push_str(&format!(" FIRERATE={}", fire_rate));
            }
            if let Some(cost) = instruction.meta_int("cost") {
                line.push_str(&format!(" COST={}", cost));
            }
        }
        Opcode::DefineWave => {
            line.push_str(&format!("DEFINE_WAVE {}", instruction.name()));
        }
        Opcode::SpawnEnemy => {
            let enemy = instruction.operands.get(1).map(String::as_str).unwrap_or("");
            line.push_str(&format!(
                "  SPAWN_ENEMY {} IN_WAVE={}",
                enemy,
                instruction.name()
            ));
            if let Some(count) = instruction.meta_int("count") {
                line.push_str(&format!(" COUNT={}", count));
            }
            if let Some(start) = instruction.meta_int("start") {
                line.push_str(&format!(" START={}", start));
            }
            if let Some(interval) = instruction.meta_int("interval") {
                line.push_str(&format!(" INTERVAL={}", interval));
            }
        }
        Opcode::PlaceTower => {
            line.push_str(&format!("PLACE_TOWER {}", instruction.name()));
            if let Some(x) = instruction.meta_int("x") {
                line.push_str(&format!(" X={}", x));
            }
            if let Some(y) = instruction.meta_int("y") {
                line.push_str(&format!(" Y={}", y));
            }
        }
        Opcode::Nop => line.push_str("NOP"),
        // Reserved opcodes; nothing emits them
        Opcode::SetValue | Opcode::LoadConst => line.push_str("UNKNOWN_OPCODE"),
    }

    line
}
