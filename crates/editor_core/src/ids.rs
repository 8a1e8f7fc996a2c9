use shared::domain::PressureId;
use uuid::Uuid;

/// Source of identifiers for newly added pressures.
pub trait IdGenerator {
    fn next_id(&mut self) -> PressureId;
}

/// Random v4 identifiers; collisions are negligible for interactive use.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&mut self) -> PressureId {
        PressureId(format!("pressure_{}", Uuid::new_v4().simple()))
    }
}

/// Deterministic `<prefix>-<n>` identifiers, starting at 1.
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: u64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> PressureId {
        let id = PressureId(format!("{}-{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn uuid_ids_are_prefixed_and_distinct() {
        let mut ids = UuidIdGenerator;
        let generated: HashSet<_> = (0..256).map(|_| ids.next_id()).collect();
        assert_eq!(generated.len(), 256);
        assert!(generated
            .iter()
            .all(|id| id.as_str().starts_with("pressure_")));
    }

    #[test]
    fn sequential_ids_count_up_from_one() {
        let mut ids = SequentialIdGenerator::new("p");
        assert_eq!(ids.next_id().as_str(), "p-1");
        assert_eq!(ids.next_id().as_str(), "p-2");
    }
}
