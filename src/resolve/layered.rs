//! Layered lookup — ordered sources, first match wins.

/// The source that answered a layered lookup, and its answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit<S, T> {
    pub source: S,
    pub value: T,
}

/// Probe `sources` in order and return the first one that yields a value.
///
/// Later sources are never probed once an earlier one answers, so probes
/// that touch the filesystem only run when every higher tier came up empty.
pub fn first_match<S, T, I, F>(sources: I, mut probe: F) -> Option<Hit<S, T>>
where
    I: IntoIterator<Item = S>,
    F: FnMut(&S) -> Option<T>,
{
    sources
        .into_iter()
        .find_map(|source| probe(&source).map(|value| Hit { source, value }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_defined_source_wins() {
        let hit = first_match(["a", "b", "c"], |s| match *s {
            "a" => None,
            other => Some(other.to_uppercase()),
        });
        assert_eq!(
            hit,
            Some(Hit {
                source: "b",
                value: "B".to_string()
            })
        );
    }

    #[test]
    fn later_sources_are_not_probed() {
        let mut probed = Vec::new();
        let _ = first_match([1, 2, 3], |n| {
            probed.push(*n);
            (*n == 1).then_some(())
        });
        assert_eq!(probed, vec![1]);
    }

    #[test]
    fn absent_everywhere() {
        let hit: Option<Hit<u8, ()>> = first_match([1u8, 2], |_| None);
        assert!(hit.is_none());
    }
}
