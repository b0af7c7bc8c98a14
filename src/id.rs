use uuid::Uuid;

/// Produces unique identifiers for shopping list items.
///
/// Ids are a hex counter followed by a random v4 suffix, so they stay unique
/// within one generator even if the random part ever collided.
#[derive(Debug, Default)]
pub struct IdGenerator {
    counter: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> String {
        self.counter += 1;
        let suffix = Uuid::new_v4().simple().to_string();
        format!("{:x}-{}", self.counter, &suffix[..12])
    }
}
