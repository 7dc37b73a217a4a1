use std::{
    sync::{
        OnceLock,
        atomic::{AtomicU64, Ordering},
    },
    time::{SystemTime, UNIX_EPOCH},
};

// Shared by socket connection ids and server-assigned unit ids.
fn next_sequence() -> u64 {
    static SEQUENCE: OnceLock<AtomicU64> = OnceLock::new();
    SEQUENCE
        .get_or_init(|| {
            let start = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_micros() as u64;
            AtomicU64::new(start)
        })
        .fetch_add(1, Ordering::Relaxed)
}

/// Id used to correlate logs for one WebSocket connection.
pub fn connection_id() -> u64 {
    next_sequence()
}

/// Id for a deployed unit when the caller does not pin one.
pub fn unit_id() -> String {
    format!("unit-{}", next_sequence())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_ids_are_minted_back_to_back_then_they_never_collide() {
        let first = unit_id();
        let second = unit_id();
        let conn = connection_id();

        assert_ne!(first, second);
        assert!(first.starts_with("unit-"));
        assert!(conn > 0);
    }
}
