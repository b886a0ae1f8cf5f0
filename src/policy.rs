//! The regeneration decision table.

/// What to do about a fetched key.
///
/// Computed fresh on every fetch, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Compute the value inline before returning.
    Generate,
    /// Return the stale value now, hand recomputation to a worker.
    Enqueue,
    /// Return the cached value as-is.
    Current,
}

/// Decide between generating inline, enqueueing background regeneration and
/// serving the cached value.
///
/// Purely combinational over its four inputs, independent of clock and I/O:
///
/// - no cached data: `Generate`, there is nothing to serve;
/// - cached but stale, synchronous mode: `Generate`, the caller accepts the
///   latency for a guaranteed-fresh value;
/// - cached but stale, workers available: `Enqueue`, serve stale while the
///   refresh runs in the background;
/// - cached but stale, no workers: `Generate`, falling back to inline
///   computation rather than serving indefinitely-stale data with no
///   refresh path;
/// - cached and fresh: `Current`.
pub fn decide(
    has_cached_data: bool,
    needs_regen: bool,
    synchronous_regen: bool,
    has_workers: bool,
) -> Decision {
    if !has_cached_data {
        return Decision::Generate;
    }
    if !needs_regen {
        return Decision::Current;
    }
    if synchronous_regen || !has_workers {
        return Decision::Generate;
    }
    Decision::Enqueue
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_entry_always_generates() {
        for needs_regen in [false, true] {
            for synchronous in [false, true] {
                for has_workers in [false, true] {
                    assert_eq!(
                        decide(false, needs_regen, synchronous, has_workers),
                        Decision::Generate
                    );
                }
            }
        }
    }

    #[test]
    fn test_stale_synchronous_generates() {
        assert_eq!(decide(true, true, true, true), Decision::Generate);
        assert_eq!(decide(true, true, true, false), Decision::Generate);
    }

    #[test]
    fn test_stale_with_workers_enqueues() {
        assert_eq!(decide(true, true, false, true), Decision::Enqueue);
    }

    #[test]
    fn test_stale_without_workers_degrades_to_generate() {
        assert_eq!(decide(true, true, false, false), Decision::Generate);
    }

    #[test]
    fn test_fresh_entry_serves_current() {
        for synchronous in [false, true] {
            for has_workers in [false, true] {
                assert_eq!(
                    decide(true, false, synchronous, has_workers),
                    Decision::Current
                );
            }
        }
    }
}
