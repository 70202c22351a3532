use uuid::Uuid;

/// Strategy for minting incident ids. Implementations must not repeat themselves within a
/// session; the store still re-draws if an id is already taken.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

impl<G: IdGenerator + ?Sized> IdGenerator for Box<G> {
    fn next_id(&mut self) -> String {
        (**self).next_id()
    }
}

/// Random v4 UUIDs. Default for interactive sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic `<prefix>-0001`, `<prefix>-0002`, ... ids.
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

    pub fn starting_at(mut self, next: u64) -> Self {
        self.next = next;
        self
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{:04}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids_are_zero_padded_and_increment() {
        let mut ids = SequentialIdGenerator::new("INC");
        assert_eq!(ids.next_id(), "INC-0001");
        assert_eq!(ids.next_id(), "INC-0002");
        let mut ids = SequentialIdGenerator::new("X").starting_at(42);
        assert_eq!(ids.next_id(), "X-0042");
    }

    #[test]
    fn uuid_ids_are_distinct() {
        let mut ids = UuidIdGenerator;
        assert_ne!(ids.next_id(), ids.next_id());
    }
}
