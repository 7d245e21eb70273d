//! Canonical query strings for GET requests.

use url::form_urlencoded;

/// Encode `params` as the canonical query string, including the leading `?`.
///
/// Pairs are emitted in the order given and percent-encoded with
/// `application/x-www-form-urlencoded` rules. An empty list gives an empty
/// string, so the result can always be appended to both the URL and the
/// signed payload.
///
/// This form leaves `*` raw and encodes `~` as `%7E`, the reverse of Python
/// `urlencode`. Signatures are unaffected because the same string is sent
/// and signed, but values containing those characters are not byte-equal to
/// what other Bitkub clients produce.
pub fn gen_query_param(params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return String::new();
    }

    let encoded = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter())
        .finish();

    format!("?{}", encoded)
}
