//! HTML sanitization for free-text bookmark fields.
//!
//! Tags on the allow-list are cleaned by ammonia, which drops every attribute
//! not listed for that tag (event handlers, inline styles, ...). Any other tag
//! is entity-encoded in place so it shows up as text instead of disappearing.

use std::collections::HashSet;

use ammonia::Builder;
use maplit::{hashmap, hashset};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const ALLOWED_TAGS: &[&str] = &[
    "a", "abbr", "b", "blockquote", "br", "code", "del", "em", "h1", "h2", "h3", "h4", "h5", "h6", "hr", "i",
    "img", "li", "ol", "p", "s", "small", "span", "strong", "sub", "sup", "u", "ul",
];

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?([A-Za-z][A-Za-z0-9]*)\b[^>]*>").expect("valid tag regex"));

static CLEANER: Lazy<Builder<'static>> = Lazy::new(|| {
    let mut cleaner = Builder::default();
    cleaner
        .tags(ALLOWED_TAGS.iter().copied().collect::<HashSet<&str>>())
        .generic_attributes(hashset!["title"])
        .tag_attributes(hashmap![
            "a" => hashset!["href"],
            "img" => hashset!["src", "alt", "width", "height"],
            "abbr" => hashset!["title"],
        ]);
    cleaner
});

fn is_allowed(tag: &str) -> bool {
    ALLOWED_TAGS.iter().any(|allowed| allowed.eq_ignore_ascii_case(tag))
}

fn encode_disallowed_tags(text: &str) -> String {
    TAG.replace_all(text, |caps: &Captures| {
        let tag = &caps[0];
        if is_allowed(&caps[1]) {
            tag.to_string()
        } else {
            tag.replace('<', "&lt;").replace('>', "&gt;")
        }
    })
    .into_owned()
}

/// Returns `text` in a form that is safe to embed in HTML. Idempotent.
pub fn sanitize(text: &str) -> String {
    let encoded = encode_disallowed_tags(text);
    CLEANER.clean(&encoded).to_string()
}
