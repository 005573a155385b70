//! HTML pages.
//!
//! Pure functions from structured data to markup, built with `maud` so every
//! interpolated value is escaped.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::routing::MatchResult;

const STYLE: &str = "body{font-family:system-ui,sans-serif;max-width:40rem;margin:3rem auto;padding:0 1rem;line-height:1.5}\
code{background:#f3f3f3;padding:0 .25em}\
li{margin:.75em 0}\
small{color:#666}";

fn document(title: &str, head_extra: Markup, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                (head_extra)
                style { (PreEscaped(STYLE)) }
            }
            body { (body) }
        }
    }
    .into_string()
}

/// Body sent along with a 302 for clients that ignore `Location`.
pub fn redirect_page(location: &str) -> String {
    document(
        "Redirecting…",
        html! { meta http-equiv="refresh" content={ "0;url=" (location) }; },
        html! { p { "Redirecting to " a href=(location) { (location) } } },
    )
}

/// Lists every candidate when more than one route matched `path`.
pub fn ambiguous_page(path: &str, candidates: &[MatchResult]) -> String {
    document(
        "Multiple destinations",
        html! {},
        html! {
            h1 { "Multiple destinations" }
            p {
                code { (path) }
                " is claimed by " (candidates.len()) " routes. Pick one:"
            }
            ul {
                @for candidate in candidates {
                    li {
                        a href=(candidate.target) { (candidate.target) }
                        br;
                        small {
                            "defined in "
                            a href=(candidate.definition()) { (candidate.definition()) }
                        }
                    }
                }
            }
        },
    )
}

/// Uniform failure page; `details` stays collapsed until asked for.
pub fn failure_page(request_id: &str, details: &str) -> String {
    document(
        "Something went wrong",
        html! {},
        html! {
            h1 { "Something went wrong" }
            p { "This link could not be resolved right now. Please try again in a moment." }
            details {
                summary { "Technical details" }
                pre { (details) }
                p { small { "Request ID: " (request_id) } }
            }
        },
    )
}
