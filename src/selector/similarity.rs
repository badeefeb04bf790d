/// Gestalt (Ratcliff/Obershelp) similarity of two strings, ignoring case.
///
/// `2 * M / (len(a) + len(b))`, where `M` counts the characters covered by
/// recursively taking the longest common block and matching either side of it.
/// Returns 0.0 when either string is empty.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();

    let matched = matching_chars(&a, &b);
    2.0 * matched as f64 / (a.len() + b.len()) as f64
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut total = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_block(a, b, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }

        total += size;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            pending.push((i + size, ahi, j + size, bhi));
        }
    }

    total
}

/// Longest common block of `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Ties go to the block starting earliest in `a`, then earliest in `b`.
fn longest_block(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best) = (alo, blo, 0);
    let width = bhi - blo;

    // run[j] = length of the common run ending at a[i - 1], b[blo + j - 1]
    let mut prev = vec![0usize; width + 1];
    let mut curr = vec![0usize; width + 1];

    for i in alo..ahi {
        for j in blo..bhi {
            let col = j - blo + 1;
            if a[i] == b[j] {
                let run = prev[col - 1] + 1;
                curr[col] = run;
                if run > best {
                    best = run;
                    best_i = i + 1 - run;
                    best_j = j + 1 - run;
                }
            } else {
                curr[col] = 0;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    (best_i, best_j, best)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-9
    }

    #[test]
    fn identical_strings_score_one() {
        assert!(close(similarity("Submit", "submit"), 1.0));
    }

    #[test]
    fn empty_side_scores_zero() {
        assert_eq!(similarity("", "submit"), 0.0);
        assert_eq!(similarity("submit", ""), 0.0);
    }

    #[test]
    fn prefix_match() {
        // "user" is fully contained: 2 * 4 / (8 + 4)
        assert!(close(similarity("username", "user"), 8.0 / 12.0));
    }

    #[test]
    fn scattered_blocks_are_counted() {
        // blocks "u" and "m": 2 * 2 / (8 + 6)
        assert!(close(similarity("username", "submit"), 4.0 / 14.0));
    }

    #[test]
    fn gestalt_matches_known_ratio() {
        // "abcd" / "bcde": block "bcd", 2 * 3 / 8
        assert!(close(similarity("abcd", "bcde"), 0.75));
    }

    #[test]
    fn unrelated_strings_score_zero() {
        assert_eq!(similarity("submit", "go"), 0.0);
    }
}
