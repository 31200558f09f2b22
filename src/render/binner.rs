//! Index binning: many spans → one min/max span per braille half-column.

use crate::core::bounds::Span;

/// Split `data` into `target` contiguous buckets of (nearly) equal length
/// and keep each bucket's extrema, placed at the bucket's middle x.
///
/// Data that already fits is returned unchanged.
#[must_use]
pub fn bin_by_index(data: &[Span], target: usize) -> Vec<Span> {
    let n = data.len();
    if n == 0 || target == 0 || n <= target {
        return data.to_vec();
    }

    let mut out = Vec::with_capacity(target);
    for b in 0..target {
        // integer partition: bucket b covers [start, end)
        let start = b * n / target;
        let end = ((b + 1) * n / target).max(start + 1);
        let bucket = &data[start..end];

        let (lo, hi) = bucket
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
                (lo.min(s.lo), hi.max(s.hi))
            });
        out.push(Span {
            x: bucket[bucket.len() / 2].x,
            lo,
            hi,
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_series_pass_through() {
        let data = [Span::point(0.0, 1.0), Span::point(1.0, 2.0)];
        assert_eq!(bin_by_index(&data, 4), data.to_vec());
    }

    #[test]
    fn buckets_keep_extrema() {
        let data: Vec<Span> = (0..8).map(|i| Span::point(f64::from(i), f64::from(i % 3))).collect();
        let binned = bin_by_index(&data, 2);
        assert_eq!(binned.len(), 2);
        // first half: y = 0 1 2 0
        assert_eq!((binned[0].lo, binned[0].hi), (0.0, 2.0));
        // second half: y = 1 2 0 1
        assert_eq!((binned[1].lo, binned[1].hi), (0.0, 2.0));
        assert_eq!(binned[1].x, 6.0);
    }

    #[test]
    fn every_sample_lands_in_a_bucket() {
        let data: Vec<Span> = (0..10).map(|i| Span::point(f64::from(i), f64::from(i))).collect();
        let binned = bin_by_index(&data, 3);
        assert_eq!(binned.first().map(|s| s.lo), Some(0.0));
        assert_eq!(binned.last().map(|s| s.hi), Some(9.0));
    }
}
