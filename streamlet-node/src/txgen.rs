use rand::Rng;
use uuid::Uuid;

/// Gera um lote de transações sintéticas para uma época.
///
/// Payloads are opaque to the protocol; they only need to be distinct
/// enough that block content differs across epochs and runs.
pub fn generate_batch(epoch: u64, count: usize) -> Vec<String> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|seq| {
            let amount: u64 = rng.gen_range(1..10_000);
            format!("tx-{}-{}:{}:{}", epoch, seq, Uuid::new_v4(), amount)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_batch_size() {
        assert_eq!(generate_batch(1, 0).len(), 0);
        assert_eq!(generate_batch(1, 5).len(), 5);
    }

    #[test]
    fn test_payloads_are_distinct() {
        let batch = generate_batch(7, 50);
        let unique: HashSet<&String> = batch.iter().collect();
        assert_eq!(unique.len(), batch.len());
    }
}
