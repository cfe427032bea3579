//! Ratcliff/Obershelp string similarity.
//!
//! The ratio is `2 * M / (len(a) + len(b))` where `M` counts characters in
//! matching blocks: the longest common substring, then recursively the
//! longest common substrings to its left and right.

/// Similarity between `a` and `b` in `0.0..=1.0`.
///
/// Two empty strings are identical (1.0).
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matches = matching_characters(&a, &b);
    (2 * matches) as f64 / total as f64
}

fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((a_lo, a_hi, b_lo, b_hi)) = pending.pop() {
        let (i, j, size) = longest_match(a, b, a_lo, a_hi, b_lo, b_hi);
        if size == 0 {
            continue;
        }
        matched += size;
        if a_lo < i && b_lo < j {
            pending.push((a_lo, i, b_lo, j));
        }
        if i + size < a_hi && j + size < b_hi {
            pending.push((i + size, a_hi, j + size, b_hi));
        }
    }

    matched
}

/// Longest common block within `a[a_lo..a_hi]` and `b[b_lo..b_hi]`.
///
/// Ties resolve to the block starting earliest in `a`, then earliest in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    a_lo: usize,
    a_hi: usize,
    b_lo: usize,
    b_hi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (a_lo, b_lo, 0);
    let width = b_hi - b_lo;
    let mut previous = vec![0usize; width + 1];
    let mut current = vec![0usize; width + 1];

    for i in a_lo..a_hi {
        for j in b_lo..b_hi {
            let column = j - b_lo + 1;
            current[column] = if a[i] == b[j] {
                previous[column - 1] + 1
            } else {
                0
            };
            let size = current[column];
            if size > best_size {
                best_i = i + 1 - size;
                best_j = j + 1 - size;
                best_size = size;
            }
        }
        std::mem::swap(&mut previous, &mut current);
    }

    (best_i, best_j, best_size)
}

#[cfg(test)]
mod tests {
    use super::similarity_ratio;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn identical_strings_score_one() {
        assert_close(similarity_ratio("show all", "show all"), 1.0);
        assert_close(similarity_ratio("", ""), 1.0);
    }

    #[test]
    fn disjoint_strings_score_zero() {
        assert_close(similarity_ratio("xyz", "abc"), 0.0);
        assert_close(similarity_ratio("", "abc"), 0.0);
    }

    #[test]
    fn matches_reference_ratios() {
        assert_close(similarity_ratio("abcd", "bcde"), 0.75);
        assert_close(similarity_ratio("ad contct", "add contact"), 0.9);
    }

    #[test]
    fn ratio_recurses_on_both_sides_of_the_longest_block() {
        // "cont" anchors the match; "ad" on the left and "ct" on the right follow.
        assert_close(similarity_ratio("adXcontYct", "ad cont ct"), 16.0 / 20.0);
    }
}
