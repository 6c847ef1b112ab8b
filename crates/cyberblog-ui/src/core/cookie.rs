//! Cookie string parsing and CSRF token resolution.

/// Cookie the backend issues the CSRF token under.
pub const CSRF_COOKIE: &str = "csrftoken";
/// Header the backend expects the CSRF token in.
pub const CSRF_HEADER: &str = "X-CSRFToken";
/// Hidden form input rendered next to forms that carry the token.
pub const CSRF_INPUT_SELECTOR: &str = "[name=csrfmiddlewaretoken]";

/// Read a named value out of a `document.cookie` style string.
///
/// Pairs are separated by `;` with optional whitespace. The value is
/// percent-decoded; an undecodable value is returned as-is.
#[must_use]
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    if cookies.is_empty() || name.is_empty() {
        return None;
    }
    cookies.split(';').map(str::trim).find_map(|pair| {
        let value = pair.strip_prefix(name)?.strip_prefix('=')?;
        Some(
            urlencoding::decode(value)
                .map_or_else(|_| value.to_string(), std::borrow::Cow::into_owned),
        )
    })
}

/// Pick the CSRF token: cookie first, then the hidden form field, else empty.
#[must_use]
pub fn resolve_csrf_token(cookies: &str, form_field: Option<String>) -> String {
    cookie_value(cookies, CSRF_COOKIE)
        .or_else(|| form_field.filter(|value| !value.is_empty()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_name_returns_none() {
        assert_eq!(cookie_value("sessionid=abc; lang=ru", "csrftoken"), None);
        assert_eq!(cookie_value("", "csrftoken"), None);
    }

    #[test]
    fn finds_value_among_multiple_cookies() {
        let cookies = "sessionid=abc; csrftoken=tok123; theme=cyber";
        assert_eq!(cookie_value(cookies, "csrftoken").as_deref(), Some("tok123"));
        assert_eq!(cookie_value(cookies, "theme").as_deref(), Some("cyber"));
        assert_eq!(cookie_value(cookies, "sessionid").as_deref(), Some("abc"));
    }

    #[test]
    fn prefix_of_another_name_does_not_match() {
        let cookies = "csrftoken_old=stale; csrftoken=fresh";
        assert_eq!(cookie_value(cookies, "csrftoken").as_deref(), Some("fresh"));
        assert_eq!(cookie_value("csrftokenx=1", "csrftoken"), None);
    }

    #[test]
    fn value_is_percent_decoded() {
        assert_eq!(
            cookie_value("note=hello%20world%3B", "note").as_deref(),
            Some("hello world;")
        );
        assert_eq!(cookie_value("bad=%FF", "bad").as_deref(), Some("%FF"));
    }

    #[test]
    fn empty_value_is_present() {
        assert_eq!(cookie_value("csrftoken=; a=b", "csrftoken").as_deref(), Some(""));
    }

    #[test]
    fn csrf_falls_back_to_form_field() {
        assert_eq!(resolve_csrf_token("csrftoken=c", Some("f".into())), "c");
        assert_eq!(resolve_csrf_token("a=b", Some("f".into())), "f");
        assert_eq!(resolve_csrf_token("a=b", Some(String::new())), "");
        assert_eq!(resolve_csrf_token("", None), "");
    }
}
