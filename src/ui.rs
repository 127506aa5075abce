use crate::discovery::SearchFilters;
use crate::error::Result;
use crate::types::RepositorySummary;
use chrono::{DateTime, Utc};

/// Languages offered in the language selector.
pub const LANGUAGES: &[&str] = &[
    "JavaScript",
    "TypeScript",
    "Python",
    "Java",
    "Go",
    "Rust",
    "C++",
    "C#",
    "Ruby",
    "PHP",
    "Swift",
    "Kotlin",
];

/// Minimum-stars choices as (label, value).
pub const STAR_OPTIONS: &[(&str, u64)] = &[
    ("Any", 0),
    ("10+", 10),
    ("100+", 100),
    ("1000+", 1000),
    ("10000+", 10000),
];

pub const DEFAULT_LANGUAGE: &str = "JavaScript";

/// What the result slot is showing.
#[derive(Debug, Clone, PartialEq)]
pub enum FinderState {
    Idle,
    Loading,
    Loaded(RepositorySummary),
    Failed,
}

impl FinderState {
    /// Collapse a discovery outcome into a displayable state.
    pub fn from_outcome(outcome: Result<RepositorySummary>) -> Self {
        match outcome {
            Ok(repo) => FinderState::Loaded(repo),
            Err(_) => FinderState::Failed,
        }
    }

    pub fn repository(&self) -> Option<&RepositorySummary> {
        match self {
            FinderState::Loaded(repo) => Some(repo),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FinderState::Loading)
    }

    /// HTML for the result slot. `Failed` looks exactly like `Idle`.
    pub fn render(&self) -> String {
        match self {
            FinderState::Loaded(repo) => render_repository_card(repo),
            FinderState::Loading => render_loading(),
            FinderState::Idle | FinderState::Failed => render_empty_state(),
        }
    }
}

/// `950` → `950`, `1500` → `1.5k`, `2_300_000` → `2.3M`.
pub fn format_number(value: u64) -> String {
    if value >= 1_000_000 {
        format!("{:.1}M", value as f64 / 1_000_000.0)
    } else if value >= 1_000 {
        format!("{:.1}k", value as f64 / 1_000.0)
    } else {
        value.to_string()
    }
}

/// `2023-03-05T00:00:00Z` → `Mar 5, 2023`. Unparseable input is returned as is.
pub fn format_date(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(parsed) => parsed.with_timezone(&Utc).format("%b %-d, %Y").to_string(),
        Err(_) => timestamp.to_string(),
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn render_repository_card(repo: &RepositorySummary) -> String {
    let url = escape_html(&repo.html_url);

    let description = repo
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .map(|d| format!(r#"<p class="repo-description">{}</p>"#, escape_html(d)))
        .unwrap_or_default();

    let language = repo
        .language
        .as_deref()
        .filter(|l| !l.is_empty())
        .map(|l| format!(r#"<span class="repo-language"><i class="dot"></i>{}</span>"#, escape_html(l)))
        .unwrap_or_default();

    format!(
        concat!(
            r#"<article class="repo-card">"#,
            r#"<header><a class="repo-name" href="{url}" target="_blank" rel="noreferrer">{name}</a>"#,
            r#"<span class="repo-updated">Updated {updated}</span></header>"#,
            "{description}",
            r#"<footer class="repo-stats">"#,
            r#"<span class="repo-stars" title="Stars">&#9733; {stars}</span>"#,
            r#"<span class="repo-forks" title="Forks">&#8634; {forks}</span>"#,
            "{language}",
            r#"<a class="repo-link" href="{url}" target="_blank" rel="noreferrer">View Repository &#8599;</a>"#,
            "</footer></article>",
        ),
        url = url,
        name = escape_html(&repo.full_name),
        updated = escape_html(&format_date(&repo.updated_at)),
        description = description,
        stars = format_number(repo.stargazers_count),
        forks = format_number(repo.forks_count),
        language = language,
    )
}

fn render_loading() -> String {
    r#"<div class="loading"><span class="spinner"></span><span>Searching...</span></div>"#.to_string()
}

fn render_empty_state() -> String {
    concat!(
        r#"<div class="empty-state">"#,
        r#"<div class="empty-icon">&#128269;</div>"#,
        r#"<h3>Ready to Explore?</h3>"#,
        r#"<p>Click &quot;Discover Repository&quot; to find amazing projects</p>"#,
        r#"</div>"#,
    )
    .to_string()
}

fn render_language_options(selected: &str) -> String {
    LANGUAGES
        .iter()
        .map(|language| {
            let marker = if *language == selected { " selected" } else { "" };
            let escaped = escape_html(language);
            format!(r#"<option value="{escaped}"{marker}>{escaped}</option>"#)
        })
        .collect()
}

fn render_star_options(selected: u64) -> String {
    STAR_OPTIONS
        .iter()
        .map(|(label, value)| {
            let marker = if *value == selected { " selected" } else { "" };
            format!(r#"<option value="{value}"{marker}>{label}</option>"#)
        })
        .collect()
}

/// Full page with the control panel and the result slot pre-filled with `state`.
pub fn render_page(filters: &SearchFilters, state: &FinderState) -> String {
    let language = if filters.language.is_empty() {
        DEFAULT_LANGUAGE
    } else {
        filters.language.as_str()
    };

    PAGE_TEMPLATE
        .replace("{{language_options}}", &render_language_options(language))
        .replace("{{star_options}}", &render_star_options(filters.min_stars))
        .replace("{{empty_state}}", &FinderState::Idle.render())
        .replace("{{loading}}", &FinderState::Loading.render())
        .replace("{{result}}", &state.render())
}

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>GitHub Random Repository Finder</title>
<style>
:root { --background:#0b0d12; --surface:#141821; --border:#262c38; --accent:#7c5cff; --accent-secondary:#22d3ee; }
body { margin:0; min-height:100vh; display:flex; align-items:center; justify-content:center; background:var(--background); color:#e5e7eb; font-family:system-ui,sans-serif; }
main { width:100%; max-width:56rem; padding:1rem; }
h1 { font-size:4rem; text-align:center; margin:0; background:linear-gradient(90deg,var(--accent),var(--accent-secondary)); -webkit-background-clip:text; color:transparent; }
.subtitle { text-align:center; color:#9ca3af; font-size:1.5rem; margin-bottom:3rem; }
.panel, .repo-card { background:var(--surface); border:1px solid var(--border); border-radius:1rem; padding:1.5rem; margin-bottom:2rem; }
.panel form { display:grid; grid-template-columns:repeat(auto-fit,minmax(12rem,1fr)); gap:1.5rem; align-items:end; }
label { display:block; font-size:.875rem; color:#d1d5db; margin-bottom:.5rem; }
select, button { width:100%; padding:.75rem 1rem; border-radius:.5rem; border:1px solid var(--border); background:var(--background); color:#fff; }
button { background:linear-gradient(90deg,var(--accent),var(--accent-secondary)); font-weight:600; cursor:pointer; }
button:disabled { opacity:.5; cursor:not-allowed; }
.repo-card header { display:flex; flex-wrap:wrap; justify-content:space-between; gap:.75rem; }
.repo-name { font-size:1.25rem; font-weight:700; color:var(--accent); word-break:break-all; }
.repo-updated { color:#9ca3af; font-size:.875rem; }
.repo-stats { display:flex; flex-wrap:wrap; align-items:center; gap:1rem; padding-top:1rem; border-top:1px solid var(--border); }
.repo-link { margin-left:auto; color:#fff; border:1px solid var(--border); border-radius:.5rem; padding:.5rem 1rem; text-decoration:none; }
.dot { display:inline-block; width:.75rem; height:.75rem; border-radius:50%; background:var(--accent); margin-right:.5rem; }
.empty-state, .loading { text-align:center; padding:3rem 0; color:#9ca3af; }
.spinner { display:inline-block; width:1rem; height:1rem; border:2px solid #fff; border-top-color:transparent; border-radius:50%; animation:spin 1s linear infinite; margin-right:.5rem; }
@keyframes spin { to { transform:rotate(360deg); } }
footer.page-footer { text-align:center; color:#6b7280; font-size:.875rem; margin-top:4rem; }
</style>
</head>
<body>
<main>
<h1>GitHub</h1>
<p class="subtitle">Random Repository Finder</p>
<section class="panel">
<form id="finder" method="get" action="/">
<div><label for="language">Language</label><select id="language" name="language">{{language_options}}</select></div>
<div><label for="stars">Minimum Stars</label><select id="stars" name="stars">{{star_options}}</select></div>
<button id="discover" type="submit">Discover Repository</button>
</form>
</section>
<section id="result">{{result}}</section>
<footer class="page-footer">Discover amazing projects from the GitHub universe</footer>
</main>
<template id="empty-state">{{empty_state}}</template>
<template id="loading-state">{{loading}}</template>
<script>
(function () {
  var form = document.getElementById("finder");
  var button = document.getElementById("discover");
  var slot = document.getElementById("result");
  var empty = document.getElementById("empty-state").innerHTML;
  var loading = document.getElementById("loading-state").innerHTML;
  form.addEventListener("submit", function (event) {
    event.preventDefault();
    if (button.disabled) { return; }
    var params = new URLSearchParams({
      language: form.elements.language.value,
      stars: form.elements.stars.value
    });
    button.disabled = true;
    button.textContent = "Searching...";
    slot.innerHTML = loading;
    fetch("/finder/result?" + params.toString())
      .then(function (response) { return response.ok ? response.text() : empty; })
      .catch(function () { return empty; })
      .then(function (html) {
        slot.innerHTML = html;
        button.disabled = false;
        button.textContent = "Discover Repository";
      });
  });
})();
</script>
</body>
</html>
"#;
