use guidechat_core::message::MessageId;

/// Per-session monotonic message id source.
///
/// Ids start at 1 and never repeat within a generator, however quickly
/// messages are created.
#[derive(Debug, Default)]
pub struct MessageIdGenerator {
    last: u64,
}

impl MessageIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> MessageId {
        self.last += 1;
        MessageId(self.last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_start_at_one() {
        let mut ids = MessageIdGenerator::new();
        assert_eq!(ids.next_id(), MessageId(1));
    }

    #[test]
    fn test_ids_strictly_increase() {
        let mut ids = MessageIdGenerator::new();
        let generated: Vec<MessageId> = (0..1000).map(|_| ids.next_id()).collect();
        assert!(generated.windows(2).all(|w| w[0] < w[1]));
    }
}
