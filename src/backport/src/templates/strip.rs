//! Test plan stripping.

/// Removes the delimited test plan block from a pull request body.
///
/// Everything from the first occurrence of `start` through the last
/// occurrence of `end` after it (inclusive) is dropped, so markers nested
/// inside the block go with it. The body is returned unchanged when `start`
/// is absent or never terminated.
///
/// With the default `<!--` / `-->` delimiters this also drops any text
/// between two separate HTML comments, such as the hints a pull request
/// template leaves around the description. Pick dedicated delimiters (for
/// example `<!-- test-plan -->` / `<!-- /test-plan -->`) when bodies mix
/// comments with content worth keeping.
#[must_use]
pub fn strip_test_plan(body: &str, start: &str, end: &str) -> String {
    if start.is_empty() || end.is_empty() {
        return body.to_string();
    }

    let Some(open) = body.find(start) else {
        return body.to_string();
    };
    let after_open = open + start.len();
    let Some(close) = body[after_open..].rfind(end) else {
        return body.to_string();
    };

    let mut stripped = String::with_capacity(body.len());
    stripped.push_str(&body[..open]);
    stripped.push_str(&body[after_open + close + end.len()..]);
    stripped
}
