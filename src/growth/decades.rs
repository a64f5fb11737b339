//! Decade bucketing.
//!
//! Full buckets are `[y, y + 9]` where `y ≡ 1 (mod 10)`, laid out from the
//! first such year at or after the series start. Short buckets absorb the
//! years before that grid start and after the last full bucket.

use crate::domain::DecadeBucket;

/// Smallest year `>= first` congruent to 1 modulo 10.
pub fn aligned_start(first: i32) -> i32 {
    first + (1 - first).rem_euclid(10)
}

/// Non-overlapping ascending buckets covering `[first, last]` exactly.
pub fn decade_buckets(first: i32, last: i32) -> Vec<DecadeBucket> {
    if last < first {
        return Vec::new();
    }

    let aligned = aligned_start(first);
    let mut buckets = Vec::new();

    if first < aligned {
        buckets.push(DecadeBucket::new(first, (aligned - 1).min(last)));
    }

    let mut year = aligned;
    while year + 9 <= last {
        buckets.push(DecadeBucket::new(year, year + 9));
        year += 10;
    }

    let covered = buckets.last().map_or(first - 1, |b| b.end);
    if last > covered {
        buckets.push(DecadeBucket::new(covered + 1, last));
    }

    buckets
}
