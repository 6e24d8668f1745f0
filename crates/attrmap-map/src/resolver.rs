//! Precedence between competing candidates for one attribute.

use std::collections::HashMap;

use attrmap_model::{CandidateMapping, ResolvedAttribute, RuleKind};

/// Outcome of comparing a candidate with the current winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Keep,
    Replace,
}

/// Decides whether `candidate` displaces `current`.
///
/// Lower priority numbers win and ties keep the existing value. A missing or
/// empty-valued current entry is always replaced, except by a skip candidate,
/// which callers handle before reaching this point.
pub fn decide(current: Option<&ResolvedAttribute>, candidate: &CandidateMapping) -> Decision {
    if candidate.kind == RuleKind::Skip {
        return Decision::Keep;
    }
    let Some(current) = current.filter(|current| !current.value.is_empty()) else {
        return Decision::Replace;
    };
    let replace = if candidate.kind.is_priority_ranked() {
        candidate.priority < current.priority
    } else if candidate.kind == RuleKind::Derive {
        current.kind == RuleKind::Derive && candidate.priority < current.priority
    } else {
        false
    };
    if replace {
        Decision::Replace
    } else {
        Decision::Keep
    }
}

/// Winners keyed by normalized attribute name, in first-insertion order.
#[derive(Debug, Clone, Default)]
pub struct ResolvedSet {
    index: HashMap<String, usize>,
    entries: Vec<ResolvedAttribute>,
}

impl ResolvedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arbitrates `candidate` against the current entry for its key.
    ///
    /// A replacement overwrites the entry in place, so the key keeps the
    /// position of its first insertion.
    pub fn offer(&mut self, candidate: CandidateMapping) -> Decision {
        let key = candidate.key();
        let position = self.index.get(&key).copied();
        let current = position.map(|position| &self.entries[position]);
        let decision = decide(current, &candidate);
        if decision == Decision::Replace {
            match position {
                Some(position) => self.entries[position] = candidate.into(),
                None => {
                    self.index.insert(key, self.entries.len());
                    self.entries.push(candidate.into());
                }
            }
        }
        decision
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<ResolvedAttribute> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(kind: RuleKind, priority: i32, value: &str) -> CandidateMapping {
        CandidateMapping {
            attribute: "Weight".to_string(),
            value: value.to_string(),
            unit: String::new(),
            kind,
            priority,
        }
    }

    fn current(kind: RuleKind, priority: i32, value: &str) -> ResolvedAttribute {
        candidate(kind, priority, value).into()
    }

    #[test]
    fn vacant_slot_accepts_any_non_skip_kind() {
        for kind in [
            RuleKind::Extract,
            RuleKind::Normalize,
            RuleKind::Derive,
            RuleKind::Fallback,
            RuleKind::Supplier,
        ] {
            assert_eq!(decide(None, &candidate(kind, 50, "1")), Decision::Replace);
        }
        assert_eq!(
            decide(None, &candidate(RuleKind::Skip, 1, "1")),
            Decision::Keep
        );
    }

    #[test]
    fn empty_current_value_counts_as_vacant() {
        let empty = current(RuleKind::Extract, 1, "");
        assert_eq!(
            decide(Some(&empty), &candidate(RuleKind::Fallback, 90, "0")),
            Decision::Replace
        );
        assert_eq!(
            decide(Some(&empty), &candidate(RuleKind::Derive, 90, "x")),
            Decision::Replace
        );
    }

    #[test]
    fn fallback_never_replaces_a_value() {
        let winner = current(RuleKind::Derive, 500, "x");
        assert_eq!(
            decide(Some(&winner), &candidate(RuleKind::Fallback, 1, "0")),
            Decision::Keep
        );
    }

    #[test]
    fn derive_only_replaces_weaker_derive() {
        let derived = current(RuleKind::Derive, 50, "a");
        assert_eq!(
            decide(Some(&derived), &candidate(RuleKind::Derive, 40, "b")),
            Decision::Replace
        );
        assert_eq!(
            decide(Some(&derived), &candidate(RuleKind::Derive, 50, "b")),
            Decision::Keep
        );
        for kind in [RuleKind::Extract, RuleKind::Normalize, RuleKind::Fallback] {
            let winner = current(kind, 90, "a");
            assert_eq!(
                decide(Some(&winner), &candidate(RuleKind::Derive, 1, "b")),
                Decision::Keep
            );
        }
    }

    #[test]
    fn extract_needs_strictly_lower_priority() {
        let winner = current(RuleKind::Extract, 20, "a");
        assert_eq!(
            decide(Some(&winner), &candidate(RuleKind::Extract, 5, "b")),
            Decision::Replace
        );
        assert_eq!(
            decide(Some(&winner), &candidate(RuleKind::Normalize, 20, "b")),
            Decision::Keep
        );
    }

    #[test]
    fn low_fallback_blocks_later_extract() {
        let fallback = current(RuleKind::Fallback, 5, "0");
        assert_eq!(
            decide(Some(&fallback), &candidate(RuleKind::Extract, 50, "250")),
            Decision::Keep
        );
    }

    #[test]
    fn resolved_set_keeps_first_insertion_order() {
        let mut set = ResolvedSet::new();
        assert!(set.is_empty());
        let mut first = candidate(RuleKind::Extract, 20, "old");
        first.attribute = "Weight".to_string();
        let mut other = candidate(RuleKind::Extract, 10, "x");
        other.attribute = "Color".to_string();
        let mut better = candidate(RuleKind::Extract, 5, "new");
        better.attribute = " WEIGHT ".to_string();

        assert_eq!(set.offer(first), Decision::Replace);
        assert_eq!(set.offer(other), Decision::Replace);
        assert_eq!(set.offer(better), Decision::Replace);
        assert_eq!(set.len(), 2);

        let entries = set.into_vec();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].value, "new");
        assert_eq!(entries[0].priority, 5);
        assert_eq!(entries[1].attribute, "Color");
    }
}
