/// Source of speaker UUIDs for the assembler and the kinetic emitter.
///
/// Production code uses [`UuidIdGen`]; tests and golden-file snapshots
/// inject [`SequentialIdGen`] so that a given token array always produces
/// byte-identical output.
pub trait IdGenerator: Send + Sync {
    fn next_id(&mut self) -> String;
}

/// Random version-4 UUIDs, the production default.
#[derive(Default)]
pub struct UuidIdGen;

impl IdGenerator for UuidIdGen {
    fn next_id(&mut self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Deterministic counter IDs (`"0"`, `"1"`, …) for reproducible output.
pub struct SequentialIdGen(u64);

impl SequentialIdGen {
    pub fn new() -> Self {
        Self(0)
    }
}

impl Default for SequentialIdGen {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIdGen {
    fn next_id(&mut self) -> String {
        let id = self.0;
        self.0 += 1;
        id.to_string()
    }
}
