// ABOUTME: Proportional ratio arrays for grid rows and columns.
// ABOUTME: Projects ratios onto millimeter spans and redistributes space when one span is edited.

/// Reset `ratios` to uniform weights when its length no longer matches the axis.
///
/// Returns the ratios unchanged when the length already matches, so custom
/// proportions survive edits that keep the grid shape.
pub fn reconcile_ratios(ratios: &[f64], target_len: usize) -> Vec<f64> {
    if ratios.len() == target_len {
        ratios.to_vec()
    } else {
        vec![1.0; target_len]
    }
}

/// Total axis length as used for projection: never below 1mm
pub fn clamp_total(total: f64) -> f64 {
    if total.is_finite() {
        total.max(1.0)
    } else {
        1.0
    }
}

/// Project ratios onto `total` millimeters, one rounded span per entry.
pub fn compute_spans(ratios: &[f64], total: f64) -> Vec<i64> {
    let total = clamp_total(total);
    let sum: f64 = ratios.iter().sum();
    let sum = if sum == 0.0 { 1.0 } else { sum };

    ratios
        .iter()
        // Halves round up
        .map(|r| (r / sum * total + 0.5).floor() as i64)
        .collect()
}

/// Set entry `index` to `value` mm and let the other entries absorb the difference.
///
/// With two entries the other one becomes the complement of the total. With
/// more, the remaining length is shared out in proportion to the entries'
/// current spans. Untouched entries never drop below 1.
pub fn edit_span(ratios: &[f64], index: usize, value: f64, total: f64) -> Vec<f64> {
    if index >= ratios.len() {
        return ratios.to_vec();
    }

    let total = clamp_total(total);
    let value = if value.is_finite() { value.max(0.0) } else { 0.0 };
    let mut next = ratios.to_vec();

    if ratios.len() == 2 {
        next[index] = value;
        next[1 - index] = (total - value).max(1.0);
        return next;
    }

    let spans = compute_spans(ratios, total);
    let remaining = total - value;
    let others: i64 = spans
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, s)| *s)
        .sum();
    let others = if others == 0 { 1.0 } else { others as f64 };

    next[index] = value;
    for (i, span) in spans.iter().enumerate() {
        if i != index {
            next[i] = (remaining * (*span as f64 / others)).max(1.0);
        }
    }
    next
}

/// Lenient number parsing for typed lengths.
///
/// Reads the longest numeric prefix after leading whitespace ("850mm" is 850).
/// Anything unreadable is 0.
pub fn parse_length(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let mut seen_dot = false;
    let mut seen_digit = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    if !seen_digit {
        return 0.0;
    }

    // Optional exponent, only if it is complete
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }

    match s[..end].parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans_sum(spans: &[i64]) -> i64 {
        spans.iter().sum()
    }

    #[test]
    fn reconcile_keeps_matching_ratios() {
        assert_eq!(reconcile_ratios(&[2.0, 1.0], 2), vec![2.0, 1.0]);
        assert_eq!(reconcile_ratios(&[2.0, 1.0], 3), vec![1.0, 1.0, 1.0]);
        assert_eq!(reconcile_ratios(&[], 1), vec![1.0]);
    }

    #[test]
    fn spans_project_onto_total() {
        assert_eq!(compute_spans(&[1.0], 800.0), vec![800]);
        assert_eq!(compute_spans(&[1.0, 1.0], 1600.0), vec![800, 800]);
        assert_eq!(compute_spans(&[3.0, 1.0], 1000.0), vec![750, 250]);
    }

    #[test]
    fn spans_guard_zero_sum_and_total() {
        assert_eq!(compute_spans(&[0.0, 0.0], 500.0), vec![0, 0]);
        assert_eq!(compute_spans(&[1.0], 0.0), vec![1]);
        assert_eq!(compute_spans(&[1.0], -40.0), vec![1]);
        assert_eq!(compute_spans(&[1.0], f64::NAN), vec![1]);
    }

    #[test]
    fn span_sum_stays_near_total() {
        let cases = vec![
            (vec![1.0, 1.0, 1.0], 1000.0),
            (vec![1.0, 2.0, 3.0, 4.0, 5.0], 2347.0),
            (vec![0.3, 0.3, 0.4], 1.0),
            (vec![7.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0], 999.0),
        ];
        for (ratios, total) in cases {
            let spans = compute_spans(&ratios, total);
            let diff = (spans_sum(&spans) - total as i64).abs();
            assert!(diff <= ratios.len() as i64, "{:?} over {}", spans, total);
        }
    }

    #[test]
    fn two_entries_take_the_complement() {
        let ratios = edit_span(&[1.0, 1.0], 0, 1000.0, 1600.0);
        assert_eq!(compute_spans(&ratios, 1600.0), vec![1000, 600]);

        let ratios = edit_span(&[1.0, 1.0], 1, 300.0, 1600.0);
        assert_eq!(ratios, vec![1300.0, 300.0]);
    }

    #[test]
    fn two_entries_floor_the_complement_at_one() {
        let ratios = edit_span(&[1.0, 1.0], 0, 2000.0, 1600.0);
        assert_eq!(ratios, vec![2000.0, 1.0]);
    }

    #[test]
    fn three_way_redistribution() {
        let ratios = edit_span(&[1.0, 1.0, 1.0], 0, 600.0, 900.0);
        assert_eq!(ratios, vec![600.0, 150.0, 150.0]);
        assert_eq!(compute_spans(&ratios, 900.0), vec![600, 150, 150]);
    }

    #[test]
    fn redistribution_follows_current_spans() {
        // Spans 200/200/600: the wide column absorbs three times as much
        let ratios = edit_span(&[1.0, 1.0, 3.0], 0, 400.0, 1000.0);
        assert_eq!(compute_spans(&ratios, 1000.0), vec![400, 150, 450]);
    }

    #[test]
    fn oversized_edit_floors_others() {
        let ratios = edit_span(&[1.0, 1.0, 1.0], 1, 1200.0, 900.0);
        assert_eq!(ratios, vec![1.0, 1200.0, 1.0]);
    }

    #[test]
    fn editing_to_current_span_is_stable() {
        let original = [2.0, 1.0, 1.0, 4.0];
        let total = 1600.0;
        let before = compute_spans(&original, total);
        let after = compute_spans(&edit_span(&original, 2, before[2] as f64, total), total);
        for (a, b) in before.iter().zip(&after) {
            assert!((a - b).abs() <= 1);
        }
    }

    #[test]
    fn edited_entry_may_be_zero() {
        let ratios = edit_span(&[1.0, 1.0, 1.0], 2, 0.0, 900.0);
        assert_eq!(ratios[2], 0.0);
        assert_eq!(compute_spans(&ratios, 900.0), vec![450, 450, 0]);

        let ratios = edit_span(&[1.0, 1.0, 1.0], 2, -50.0, 900.0);
        assert_eq!(ratios[2], 0.0);
    }

    #[test]
    fn out_of_range_edit_is_ignored() {
        assert_eq!(edit_span(&[1.0, 2.0], 5, 10.0, 100.0), vec![1.0, 2.0]);
    }

    #[test]
    fn lenient_parsing() {
        assert_eq!(parse_length("850"), 850.0);
        assert_eq!(parse_length("  12.5"), 12.5);
        assert_eq!(parse_length("850mm"), 850.0);
        assert_eq!(parse_length("1e3"), 1000.0);
        assert_eq!(parse_length("7e"), 7.0);
        assert_eq!(parse_length("-20"), -20.0);
        assert_eq!(parse_length(".5"), 0.5);
        assert_eq!(parse_length(""), 0.0);
        assert_eq!(parse_length("abc"), 0.0);
        assert_eq!(parse_length("-"), 0.0);
    }
}
