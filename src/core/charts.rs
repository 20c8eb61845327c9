//! Terminal bar charts for the two visual insights: stops by violation and
//! driver gender distribution.

use crate::utils::colors::{CYAN, GREY, RESET};
use crate::utils::table::visible_width;

const MAX_BAR_WIDTH: usize = 40;

/// Count occurrences of each non-empty value, most frequent first.
/// Ties are ordered by label so output is stable.
pub fn value_counts<'a, I>(values: I) -> Vec<(String, usize)>
where
    I: Iterator<Item = &'a str>,
{
    let mut counts: Vec<(String, usize)> = Vec::new();
    for v in values {
        if v.trim().is_empty() {
            continue;
        }
        match counts.iter_mut().find(|(label, _)| label == v) {
            Some((_, c)) => *c += 1,
            None => counts.push((v.to_string(), 1)),
        }
    }
    counts.sort_by(|(la, ca), (lb, cb)| cb.cmp(ca).then_with(|| la.cmp(lb)));
    counts
}

/// Render counts as a horizontal bar chart, bars scaled to the largest.
pub fn render_bar_chart(title: &str, counts: &[(String, usize)]) -> String {
    let mut out = format!("{CYAN}{title}{RESET}\n");

    if counts.is_empty() {
        out.push_str(&format!("{GREY}(no data){RESET}\n"));
        return out;
    }

    let label_w = counts
        .iter()
        .map(|(label, _)| visible_width(label))
        .max()
        .unwrap_or(0);
    let max_count = counts.iter().map(|(_, c)| *c).max().unwrap_or(1).max(1);

    for (label, count) in counts {
        let bar_len = (count * MAX_BAR_WIDTH).div_ceil(max_count);
        let pad = " ".repeat(label_w - visible_width(label));
        out.push_str(&format!(
            "{label}{pad}  {CYAN}{}{RESET}  {count}\n",
            "█".repeat(bar_len)
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_sort_desc_then_by_label() {
        let values = ["Speeding", "DUI", "Speeding", "Seatbelt"];
        let counts = value_counts(values.into_iter());
        assert_eq!(
            counts,
            vec![
                ("Speeding".to_string(), 2),
                ("DUI".to_string(), 1),
                ("Seatbelt".to_string(), 1),
            ]
        );
    }

    #[test]
    fn empty_values_are_not_counted() {
        let values = ["", "male", " "];
        assert_eq!(value_counts(values.into_iter()).len(), 1);
    }

    #[test]
    fn largest_bar_fills_the_width() {
        let counts = vec![("Speeding".to_string(), 10), ("DUI".to_string(), 5)];
        let chart = render_bar_chart("Stops by Violation Type", &counts);
        assert!(chart.contains(&"█".repeat(40)));
        assert!(chart.contains(&"█".repeat(20)));
        assert!(chart.contains("10"));
    }

    #[test]
    fn empty_chart_says_so() {
        let chart = render_bar_chart("Driver Gender Distribution", &[]);
        assert!(chart.contains("(no data)"));
    }
}
