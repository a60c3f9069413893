use actix_web::HttpRequest;
use std::collections::HashMap;

/// Collect request cookies into the name→value mapping the session resolver
/// consumes.
///
/// Raw `Cookie` header parsing is actix's job; a request whose header fails
/// to parse yields an empty map, which the resolver treats as "no session".
/// Later duplicates of a cookie name overwrite earlier ones.
#[must_use]
pub fn request_cookie_map(req: &HttpRequest) -> HashMap<String, String> {
    req.cookies().map_or_else(
        |_| HashMap::new(),
        |cookies| {
            cookies
                .iter()
                .map(|cookie| (cookie.name().to_string(), cookie.value().to_string()))
                .collect()
        },
    )
}

/// Log the cookie names present on a request. Values are deliberately not
/// logged; they hold live tokens.
pub fn log_cookie_names(req: &HttpRequest) {
    if let Ok(cookies) = req.cookies() {
        for cookie in cookies.iter() {
            log::debug!("Found cookie: name='{}'", cookie.name());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_request_cookie_map() {
        let req = TestRequest::default()
            .cookie(actix_web::cookie::Cookie::new("a", "1"))
            .cookie(actix_web::cookie::Cookie::new("b", "2"))
            .to_http_request();

        let map = request_cookie_map(&req);
        assert_eq!(map.get("a").map(String::as_str), Some("1"));
        assert_eq!(map.get("b").map(String::as_str), Some("2"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_request_cookie_map_empty_request() {
        let req = TestRequest::default().to_http_request();
        assert!(request_cookie_map(&req).is_empty());
    }
}
