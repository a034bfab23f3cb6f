// Catalog queries: paging window and category wildcard.

use serde::Deserialize;

pub const DEFAULT_LIMIT: i64 = 5;
pub const CATEGORY_WILDCARD: &str = "all";

/// Raw `?page=&limit=` values. Kept as strings so junk falls back to the
/// defaults instead of failing the request.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub skip: u64,
    pub limit: i64,
}

/// Integer at the start of `value` ("2abc" reads as 2), ignoring leading
/// whitespace. `None` when no digits lead.
fn leading_int(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let (negative, unsigned) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let number = unsigned[..end].parse::<i64>().ok()?;
    Some(if negative { -number } else { number })
}

impl PageQuery {
    /// Page defaults to 0 and limit to 5; zero, negative or non-numeric
    /// values take the default.
    pub fn window(&self) -> PageWindow {
        let parse = |value: &Option<String>| {
            value
                .as_deref()
                .and_then(leading_int)
                .filter(|v| *v > 0)
        };

        let page = parse(&self.page).unwrap_or(0);
        let limit = parse(&self.limit).unwrap_or(DEFAULT_LIMIT);

        PageWindow {
            skip: page.saturating_mul(limit) as u64,
            limit,
        }
    }
}

/// `None` means every category. Only an absent parameter or "all" widen
/// the filter; any other value, the empty string included, matches exactly.
pub fn category_filter(category: Option<&str>) -> Option<&str> {
    category.filter(|c| *c != CATEGORY_WILDCARD)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>, limit: Option<&str>) -> PageQuery {
        PageQuery {
            page: page.map(String::from),
            limit: limit.map(String::from),
        }
    }

    #[test]
    fn test_defaults() {
        assert_eq!(query(None, None).window(), PageWindow { skip: 0, limit: 5 });
    }

    #[test]
    fn test_skip_is_page_times_limit() {
        assert_eq!(
            query(Some("3"), Some("10")).window(),
            PageWindow { skip: 30, limit: 10 }
        );
    }

    #[test]
    fn test_junk_falls_back() {
        assert_eq!(
            query(Some("abc"), Some("0")).window(),
            PageWindow { skip: 0, limit: 5 }
        );
        assert_eq!(
            query(Some("-2"), Some("-1")).window(),
            PageWindow { skip: 0, limit: 5 }
        );
    }

    #[test]
    fn test_leading_digits_are_read() {
        assert_eq!(
            query(Some("2abc"), Some(" 10 per page")).window(),
            PageWindow { skip: 20, limit: 10 }
        );
        assert_eq!(leading_int("+3"), Some(3));
        assert_eq!(leading_int("-"), None);
        assert_eq!(leading_int("x1"), None);
    }

    #[test]
    fn test_category_wildcard() {
        assert_eq!(category_filter(Some("all")), None);
        assert_eq!(category_filter(None), None);
        assert_eq!(category_filter(Some("Physics")), Some("Physics"));
        assert_eq!(category_filter(Some("")), Some(""));
    }
}
