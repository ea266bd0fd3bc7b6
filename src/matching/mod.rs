//! Similarity scoring and duplicate clustering over normalized names.

use std::cmp::Ordering;
use std::collections::HashMap;

use strsim::normalized_levenshtein;

use crate::models::{Candidate, DuplicateGroup, GroupMember};
use crate::normalize::normalize_text;

/// Similarity threshold used when the caller does not specify one.
pub const DEFAULT_THRESHOLD: f64 = 0.85;

/// Similarity of two display strings as a float in 0..=1.
///
/// Identical raw or normalized strings score 1.0; an empty input on
/// either side scores 0.0. Otherwise the score is the char-level
/// Levenshtein distance between the normalized forms scaled by the
/// longer normalized length: `1 - distance / max_len`. Symmetric and
/// reflexive; O(|a| * |b|) per pair.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }
    let na = normalize_text(a);
    let nb = normalize_text(b);
    if na == nb {
        return 1.0;
    }
    normalized_levenshtein(&na, &nb)
}

/// Partition candidates into duplicate groups at or above `threshold`.
///
/// Two phases. First, candidates are bucketed by identical normalized
/// form, each member tagged with similarity 1.0; buckets are kept in
/// first-appearance order of their normalized form so the merge phase is
/// deterministic for a given input order. Second, a greedy pairwise scan:
/// the first bucket to reach `threshold` similarity with a later bucket
/// absorbs its members (tagged with the bucket-to-bucket score), and the
/// absorbed bucket is out of play as both merge source and target.
///
/// Groups with fewer than 2 members are discarded. Members are sorted by
/// descending similarity and groups by descending member count; both
/// sorts are stable, so ties keep discovery order. Never mutates the
/// underlying records; the result is advisory for a human moderator.
pub fn find_duplicate_groups(items: &[Candidate], threshold: f64) -> Vec<DuplicateGroup> {
    let mut buckets: Vec<DuplicateGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for item in items {
        let normalized = normalize_text(&item.text);
        let idx = match index.get(&normalized) {
            Some(&i) => i,
            None => {
                buckets.push(DuplicateGroup {
                    normalized: normalized.clone(),
                    items: Vec::new(),
                });
                index.insert(normalized, buckets.len() - 1);
                buckets.len() - 1
            }
        };
        buckets[idx].items.push(GroupMember {
            id: item.id.clone(),
            original_text: item.text.clone(),
            similarity: 1.0,
        });
    }

    let mut processed = vec![false; buckets.len()];
    let mut groups: Vec<DuplicateGroup> = Vec::new();
    for i in 0..buckets.len() {
        if processed[i] {
            continue;
        }
        processed[i] = true;
        let mut current = DuplicateGroup {
            normalized: buckets[i].normalized.clone(),
            items: std::mem::take(&mut buckets[i].items),
        };
        for j in (i + 1)..buckets.len() {
            if processed[j] {
                continue;
            }
            let score = similarity(&current.normalized, &buckets[j].normalized);
            if score >= threshold {
                for mut member in std::mem::take(&mut buckets[j].items) {
                    member.similarity = score;
                    current.items.push(member);
                }
                processed[j] = true;
            }
        }
        if current.items.len() > 1 {
            current
                .items
                .sort_by(|a, b| b.similarity.partial_cmp(&a.similarity).unwrap_or(Ordering::Equal));
            groups.push(current);
        }
    }

    groups.sort_by(|a, b| b.items.len().cmp(&a.items.len()));
    groups
}
