use once_cell::sync::Lazy;
use regex::Regex;

/// Matches post ids of the form `P{week_number}-{post_index}`
static POST_ID_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^P(\d+)-(\d+)$").expect("Failed to compile post id regex"));

/// Post id for the 1-based `post_index`th post of a week
pub fn post_id(week_number: i32, post_index: usize) -> String {
    format!("P{}-{}", week_number, post_index)
}

/// Comment id for the 1-based `comment_index`th comment of a post
pub fn comment_id(week_number: i32, post_index: usize, comment_index: usize) -> String {
    format!("C{}-{}-{}", week_number, post_index, comment_index)
}

/// Split a post id back into week number and post index
pub fn parse_post_id(id: &str) -> Option<(i32, usize)> {
    let caps = POST_ID_REGEX.captures(id.trim())?;
    let week_number = caps[1].parse().ok()?;
    let post_index = caps[2].parse().ok()?;
    Some((week_number, post_index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_formats() {
        assert_eq!(post_id(3, 1), "P3-1");
        assert_eq!(comment_id(3, 1, 4), "C3-1-4");
    }

    #[test]
    fn test_parse_post_id() {
        assert_eq!(parse_post_id("P12-5"), Some((12, 5)));
        assert_eq!(parse_post_id(" P1-1 "), Some((1, 1)));
        assert_eq!(parse_post_id("C1-1-1"), None);
        assert_eq!(parse_post_id("P1"), None);
        assert_eq!(parse_post_id("p1-1"), None);
        assert_eq!(parse_post_id("P99999999999-1"), None);
    }
}
