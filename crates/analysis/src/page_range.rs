/// Parse a user-typed page selection like `"3, 5-7, 12"` into page
/// indices.
///
/// Tokens are comma-separated and trimmed. A token containing `-` is an
/// inclusive `start-end` range expanded ascending; an all-digit token is
/// a single index; anything else is silently dropped, never an error.
/// Output preserves token order and duplicates (no sorting, no
/// deduplication). An inverted range (`"5-3"`) expands to nothing, the
/// standard `start..=end` semantics.
pub fn parse_page_ranges(input: &str) -> Vec<usize> {
    let mut pages = Vec::new();

    for token in input.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        if let Some((start, end)) = token.split_once('-') {
            let start = start.trim().parse::<usize>();
            let end = end.trim().parse::<usize>();
            if let (Ok(start), Ok(end)) = (start, end) {
                pages.extend(start..=end);
            } else {
                log::debug!("Dropping malformed range token '{token}'");
            }
        } else if let Ok(page) = token.parse::<usize>() {
            pages.push(page);
        } else {
            log::debug!("Dropping non-numeric page token '{token}'");
        }
    }

    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_comma_separated_pages() {
        assert_eq!(parse_page_ranges("3,5,7"), vec![3, 5, 7]);
    }

    #[test]
    fn expands_inclusive_ranges() {
        assert_eq!(parse_page_ranges("13-15"), vec![13, 14, 15]);
    }

    #[test]
    fn drops_non_numeric_tokens_and_tolerates_whitespace() {
        assert_eq!(parse_page_ranges("3, 5-6 ,x,9"), vec![3, 5, 6, 9]);
    }

    #[test]
    fn empty_input_yields_empty_selection() {
        assert_eq!(parse_page_ranges(""), Vec::<usize>::new());
        assert_eq!(parse_page_ranges(" , ,"), Vec::<usize>::new());
    }

    #[test]
    fn inverted_range_expands_to_nothing() {
        assert_eq!(parse_page_ranges("5-3"), Vec::<usize>::new());
        assert_eq!(parse_page_ranges("5-3,2"), vec![2]);
    }

    #[test]
    fn malformed_range_sides_are_dropped_silently() {
        assert_eq!(parse_page_ranges("a-4,7"), vec![7]);
        assert_eq!(parse_page_ranges("4-,7"), vec![7]);
    }

    #[test]
    fn order_and_duplicates_are_preserved() {
        assert_eq!(parse_page_ranges("9,1-2,9"), vec![9, 1, 2, 9]);
    }
}
