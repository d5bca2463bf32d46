//! Reconciliation of vanilla and exotic bookings by trade id.
//!
//! Matching is exact string equality on the id. The first occurrence of an id
//! within one side is the one that takes part; later occurrences are reported
//! as warnings and left out of every bucket. Empty ids never match.

use crate::domain::{ExoticTrade, TradeId, VanillaTrade};
use crate::error::DataError;
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Which booking source a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordSource {
    Vanilla,
    Exotic,
}

impl std::fmt::Display for RecordSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordSource::Vanilla => write!(f, "vanilla"),
            RecordSource::Exotic => write!(f, "exotic"),
        }
    }
}

/// A later record reusing an id already seen on the same side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateKey {
    pub trade_id: TradeId,
    pub first_index: usize,
    pub duplicate_index: usize,
}

/// Informational: attached to the result, never blocks reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateKeyWarning {
    pub source: RecordSource,
    pub trade_id: TradeId,
    pub first_index: usize,
    pub duplicate_index: usize,
}

impl std::fmt::Display for DuplicateKeyWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "duplicate {} trade id {:?} at row {} (first seen at row {})",
            self.source, self.trade_id.0, self.duplicate_index, self.first_index
        )
    }
}

/// Three-way split of two record sets keyed by trade id.
#[derive(Debug)]
pub struct KeyedPartition<'a, L, R> {
    pub matched: Vec<(&'a L, &'a R)>,
    pub left_only: Vec<&'a L>,
    pub right_only: Vec<&'a R>,
    pub left_duplicates: Vec<DuplicateKey>,
    pub right_duplicates: Vec<DuplicateKey>,
}

fn first_occurrences<'a, T, K>(items: &'a [T], key: &K) -> (HashMap<&'a str, usize>, Vec<DuplicateKey>)
where
    K: Fn(&'a T) -> &'a TradeId,
{
    let mut index: HashMap<&'a str, usize> = HashMap::with_capacity(items.len());
    let mut duplicates = Vec::new();

    for (i, item) in items.iter().enumerate() {
        let id = key(item);
        if id.is_empty() {
            continue;
        }
        match index.entry(id.as_str()) {
            Entry::Occupied(e) => duplicates.push(DuplicateKey {
                trade_id: id.clone(),
                first_index: *e.get(),
                duplicate_index: i,
            }),
            Entry::Vacant(e) => {
                e.insert(i);
            }
        }
    }

    (index, duplicates)
}

/// Partition `left` and `right` by id, preserving each side's input order.
///
/// Matched pairs follow `left` order.
pub fn partition_by_key<'a, L, R, KL, KR>(
    left: &'a [L],
    right: &'a [R],
    left_key: KL,
    right_key: KR,
) -> KeyedPartition<'a, L, R>
where
    KL: Fn(&'a L) -> &'a TradeId,
    KR: Fn(&'a R) -> &'a TradeId,
{
    let (left_index, left_duplicates) = first_occurrences(left, &left_key);
    let (right_index, right_duplicates) = first_occurrences(right, &right_key);

    let mut matched = Vec::new();
    let mut left_only = Vec::new();
    for (i, item) in left.iter().enumerate() {
        let id = left_key(item);
        if id.is_empty() {
            left_only.push(item);
            continue;
        }
        if left_index.get(id.as_str()) != Some(&i) {
            continue;
        }
        match right_index.get(id.as_str()) {
            Some(&j) => matched.push((item, &right[j])),
            None => left_only.push(item),
        }
    }

    let mut right_only = Vec::new();
    for (j, item) in right.iter().enumerate() {
        let id = right_key(item);
        if id.is_empty() {
            right_only.push(item);
            continue;
        }
        if right_index.get(id.as_str()) != Some(&j) {
            continue;
        }
        if !left_index.contains_key(id.as_str()) {
            right_only.push(item);
        }
    }

    KeyedPartition {
        matched,
        left_only,
        right_only,
        left_duplicates,
        right_duplicates,
    }
}

/// A vanilla and an exotic booking sharing one id.
///
/// Sharing the id does not mean they describe the same economics.
#[derive(Debug, Clone, Serialize)]
pub struct MatchedPair<'a> {
    pub trade_id: &'a TradeId,
    pub vanilla: &'a VanillaTrade,
    pub exotic: &'a ExoticTrade,
}

#[derive(Debug, Clone, Serialize)]
pub struct Reconciliation<'a> {
    pub matched: Vec<MatchedPair<'a>>,
    pub vanilla_only: Vec<&'a VanillaTrade>,
    pub exotic_only: Vec<&'a ExoticTrade>,
    pub warnings: Vec<DuplicateKeyWarning>,
}

impl Reconciliation<'_> {
    pub fn is_clean(&self) -> bool {
        self.vanilla_only.is_empty() && self.exotic_only.is_empty() && self.warnings.is_empty()
    }
}

/// Reconcile vanilla bookings against exotic bookings by trade id.
///
/// Only structurally invalid records fail; duplicate and missing ids are
/// ordinary outcomes.
pub fn reconcile<'a>(
    vanilla: &'a [VanillaTrade],
    exotic: &'a [ExoticTrade],
) -> Result<Reconciliation<'a>, DataError> {
    for trade in vanilla {
        trade.validate()?;
    }
    for trade in exotic {
        trade.validate()?;
    }

    let partition = partition_by_key(
        vanilla,
        exotic,
        |t: &'a VanillaTrade| &t.base.trade_id,
        |t: &'a ExoticTrade| &t.base.trade_id,
    );

    let warnings: Vec<DuplicateKeyWarning> = partition
        .left_duplicates
        .into_iter()
        .map(|d| (RecordSource::Vanilla, d))
        .chain(
            partition
                .right_duplicates
                .into_iter()
                .map(|d| (RecordSource::Exotic, d)),
        )
        .map(|(source, d)| DuplicateKeyWarning {
            source,
            trade_id: d.trade_id,
            first_index: d.first_index,
            duplicate_index: d.duplicate_index,
        })
        .collect();

    for w in &warnings {
        warn!(source = %w.source, trade_id = %w.trade_id, row = w.duplicate_index, "Duplicate trade id ignored");
    }

    let matched: Vec<MatchedPair<'a>> = partition
        .matched
        .into_iter()
        .map(|(v, e)| MatchedPair {
            trade_id: &v.base.trade_id,
            vanilla: v,
            exotic: e,
        })
        .collect();

    debug!(
        matched = matched.len(),
        vanilla_only = partition.left_only.len(),
        exotic_only = partition.right_only.len(),
        duplicates = warnings.len(),
        "Reconciliation complete"
    );

    Ok(Reconciliation {
        matched,
        vanilla_only: partition.left_only,
        exotic_only: partition.right_only,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Row {
        id: TradeId,
        tag: u32,
    }

    fn row(id: &str, tag: u32) -> Row {
        Row {
            id: TradeId::new(id),
            tag,
        }
    }

    fn ids<'a>(rows: &[&'a Row]) -> Vec<&'a str> {
        rows.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn first_occurrence_wins_within_a_side() {
        let left = vec![row("A", 1), row("A", 2)];
        let right = vec![row("A", 10)];
        let p = partition_by_key(&left, &right, |r| &r.id, |r| &r.id);
        assert_eq!(p.matched.len(), 1);
        assert_eq!(p.matched[0].0.tag, 1);
        assert!(p.left_only.is_empty());
        assert_eq!(
            p.left_duplicates,
            vec![DuplicateKey {
                trade_id: TradeId::new("A"),
                first_index: 0,
                duplicate_index: 1,
            }]
        );
    }

    #[test]
    fn empty_ids_never_match_or_duplicate() {
        let left = vec![row("", 1), row("", 2)];
        let right = vec![row("", 3)];
        let p = partition_by_key(&left, &right, |r| &r.id, |r| &r.id);
        assert!(p.matched.is_empty());
        assert_eq!(p.left_only.len(), 2);
        assert_eq!(p.right_only.len(), 1);
        assert!(p.left_duplicates.is_empty());
    }

    #[test]
    fn swapping_sides_swaps_buckets() {
        let left = vec![row("A", 1), row("B", 2), row("C", 3)];
        let right = vec![row("C", 4), row("D", 5), row("A", 6)];

        let forward = partition_by_key(&left, &right, |r| &r.id, |r| &r.id);
        let backward = partition_by_key(&right, &left, |r| &r.id, |r| &r.id);

        let mut f: Vec<&str> = forward.matched.iter().map(|(l, _)| l.id.as_str()).collect();
        let mut b: Vec<&str> = backward.matched.iter().map(|(l, _)| l.id.as_str()).collect();
        f.sort();
        b.sort();
        assert_eq!(f, b);
        assert_eq!(ids(&forward.left_only), ids(&backward.right_only));
        assert_eq!(ids(&forward.right_only), ids(&backward.left_only));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let left = vec![row("t1", 1)];
        let right = vec![row("T1", 2)];
        let p = partition_by_key(&left, &right, |r| &r.id, |r| &r.id);
        assert!(p.matched.is_empty());
        assert_eq!(p.left_only.len(), 1);
        assert_eq!(p.right_only.len(), 1);
    }

    #[test]
    fn warning_display_names_the_id() {
        let w = DuplicateKeyWarning {
            source: RecordSource::Exotic,
            trade_id: TradeId::new("DD-1"),
            first_index: 0,
            duplicate_index: 3,
        };
        assert_eq!(
            w.to_string(),
            "duplicate exotic trade id \"DD-1\" at row 3 (first seen at row 0)"
        );
    }
}
