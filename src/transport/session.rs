//! Scraping of session material from the provider's embed page.
//!
//! The cookie ordering and the embedded-script structure are load-bearing
//! couplings to the provider's current markup; a provider change invalidates
//! this logic by design.

use scraper::{Html, Selector};

/// Locate the session cookie among the response's `Set-Cookie` entries and
/// truncate it at the first `;`.
///
/// When `preferred_name` is set, the cookie is matched by name. Otherwise
/// the provider's fixed ordering is relied on: the session cookie is the
/// second entry (index 1). The positional form is a compatibility shim for
/// deployments where the cookie name is not known.
pub fn extract_session_cookie(set_cookie: &[String], preferred_name: Option<&str>) -> Option<String> {
    if let Some(name) = preferred_name {
        if let Some(found) = set_cookie
            .iter()
            .map(|entry| cookie_pair(entry))
            .find(|pair| cookie_name(pair) == name)
        {
            return Some(found.to_owned());
        }
    }
    set_cookie.get(1).map(|entry| cookie_pair(entry).to_owned())
}

fn cookie_pair(entry: &str) -> &str {
    entry.split(';').next().unwrap_or(entry).trim()
}

fn cookie_name(pair: &str) -> &str {
    pair.split('=').next().unwrap_or(pair)
}

/// Extract the anti-forgery token from the embed page body.
///
/// The page carries an inline `<script>` whose text is itself an HTML
/// fragment containing `<input name="authenticity_token" value="...">`.
pub fn extract_auth_token(body: &str) -> Option<String> {
    let document = Html::parse_document(body);
    let script_selector = Selector::parse("body script").ok()?;
    let script = document.select(&script_selector).next()?;
    let inline: String = script.text().collect();

    let fragment = Html::parse_fragment(&inline);
    let input_selector = Selector::parse(r#"input[name="authenticity_token"]"#).ok()?;
    let input = fragment.select(&input_selector).next()?;
    input.value().attr("value").map(str::to_owned)
}

/// Extract the failure reason shown on a non-200 embed page: the text of the
/// first `.message` element, with line breaks stripped.
pub fn extract_failure_message(body: &str) -> Option<String> {
    let document = Html::parse_document(body);
    let selector = Selector::parse(".message").ok()?;
    let element = document.select(&selector).next()?;
    let text: String = element.text().collect();
    Some(text.chars().filter(|c| *c != '\r' && *c != '\n').collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cookies() -> Vec<String> {
        vec![
            "guest_id=v1%3A1234; Domain=.example.com; Path=/".to_owned(),
            "_provider_sess=sess-value-42; Path=/; HttpOnly".to_owned(),
            "lang=en; Path=/".to_owned(),
        ]
    }

    #[test]
    fn positional_fallback_takes_the_second_cookie() {
        assert_eq!(
            extract_session_cookie(&cookies(), None).as_deref(),
            Some("_provider_sess=sess-value-42")
        );
    }

    #[test]
    fn named_lookup_wins_over_position() {
        assert_eq!(
            extract_session_cookie(&cookies(), Some("lang")).as_deref(),
            Some("lang=en")
        );
    }

    #[test]
    fn unknown_name_falls_back_to_position() {
        assert_eq!(
            extract_session_cookie(&cookies(), Some("missing")).as_deref(),
            Some("_provider_sess=sess-value-42")
        );
    }

    #[test]
    fn single_cookie_yields_none_positionally() {
        let set_cookie = vec!["only=one; Path=/".to_owned()];
        assert_eq!(extract_session_cookie(&set_cookie, None), None);
    }

    #[test]
    fn auth_token_is_read_from_the_inline_script_fragment() {
        let body = r#"<html><body>
            <script type="text/html">
              <form action="/sdk/login" method="post">
                <input type="hidden" name="authenticity_token" value="tok-123">
              </form>
            </script>
        </body></html>"#;
        assert_eq!(extract_auth_token(body).as_deref(), Some("tok-123"));
    }

    #[test]
    fn missing_script_or_input_yields_none() {
        assert_eq!(extract_auth_token("<html><body></body></html>"), None);
        let body = r#"<html><body><script>var x = 1;</script></body></html>"#;
        assert_eq!(extract_auth_token(body), None);
    }

    #[test]
    fn failure_message_is_extracted_and_stripped_of_line_breaks() {
        let body = "<html><body><div class=\"message\">Invalid\nconsumer\r\nkey</div></body></html>";
        assert_eq!(
            extract_failure_message(body).as_deref(),
            Some("Invalidconsumerkey")
        );
    }

    #[test]
    fn failure_message_absent_yields_none() {
        assert_eq!(extract_failure_message("<html><body></body></html>"), None);
    }
}
