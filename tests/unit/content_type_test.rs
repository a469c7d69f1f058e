// Property-based tests for the Content-Type descriptor used by the HTTP
// transport: the header value must always be "mime" or "mime; charset=cs"
// and a charset override must replace whatever charset the base type had.

use paygate::net::ContentType;
use proptest::prelude::*;

// Token characters that can appear in a media type or charset name
fn token() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9.+-]{0,20}"
}

proptest! {
    #[test]
    fn test_header_without_charset_is_the_bare_mime(mime in token()) {
        let content_type = ContentType::new(mime.clone());
        prop_assert_eq!(content_type.to_string(), mime);
    }

    #[test]
    fn test_header_with_charset_has_exactly_one_parameter(
        mime in token(),
        charset in token()
    ) {
        let content_type = ContentType::with_charset(mime.clone(), charset.clone());
        prop_assert_eq!(
            content_type.to_string(),
            format!("{}; charset={}", mime, charset)
        );
    }

    #[test]
    fn test_override_discards_the_original_charset(
        mime in token(),
        original in token(),
        replacement in token()
    ) {
        let base = ContentType::with_charset(mime.clone(), original.clone());
        let overridden = ContentType::with_charset(base.mime_type(), replacement.clone());

        prop_assert_eq!(overridden.mime_type(), mime.as_str());
        prop_assert_eq!(overridden.charset(), Some(replacement.as_str()));
        if original != replacement {
            let original_param = format!("charset={}", original);
            prop_assert!(!overridden.to_string().contains(&original_param));
        }
    }
}

#[test]
fn test_well_known_constructors() {
    assert_eq!(
        ContentType::json().to_string(),
        "application/json; charset=UTF-8"
    );
    assert_eq!(
        ContentType::form_urlencoded().to_string(),
        "application/x-www-form-urlencoded; charset=ISO-8859-1"
    );
}
