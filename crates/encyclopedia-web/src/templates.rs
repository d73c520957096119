//! HTML templates
//!
//! Every page shares one layout: a sidebar with the search box and
//! navigation links, and a main column. All text that came from a user or
//! from the store is escaped, except rendered entry HTML.

use std::fmt::Write;

use encyclopedia_core::{EditPage, EntryForm, EntryPage, FormError};

const STYLE: &str = r#"
body { margin: 0; font-family: sans-serif; }
#sidebar { position: fixed; top: 0; bottom: 0; width: 200px; padding: 20px; background-color: #f0f0f0; }
#sidebar h2 { margin-top: 0; }
#sidebar .search { width: 100%; box-sizing: border-box; }
#main { margin-left: 240px; padding: 20px 40px; }
.error { color: #b00020; }
textarea { width: 100%; min-height: 320px; font-family: monospace; }
input[readonly] { background-color: #eee; }
"#;

/// Escape text for use in HTML content and double-quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encode a title for use as one URL path segment
pub fn encode_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => {
                let _ = write!(out, "%{:02X}", byte);
            }
        }
    }
    out
}

/// URL of an entry page
pub fn entry_url(title: &str) -> String {
    format!("/wiki/{}", encode_segment(title))
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
<div id="sidebar">
<h2>Wiki</h2>
<form action="/search" method="get">
<input class="search" type="text" name="q" placeholder="Search Encyclopedia">
</form>
<div><a href="/">Home</a></div>
<div><a href="/add">Create New Page</a></div>
<div><a href="/random">Random Page</a></div>
</div>
<div id="main">
{body}
</div>
</body>
</html>
"#,
        title = escape(title),
    )
}

fn entry_links(names: &[String]) -> String {
    let mut list = String::from("<ul>\n");
    for name in names {
        let _ = writeln!(
            list,
            r#"<li><a href="{}">{}</a></li>"#,
            escape(&entry_url(name)),
            escape(name)
        );
    }
    list.push_str("</ul>");
    list
}

fn error_line(error: Option<FormError>) -> String {
    error
        .map(|e| format!(r#"<p class="error">{}</p>"#, escape(&e.to_string())))
        .unwrap_or_default()
}

/// Index page listing every entry
pub fn index(names: &[String]) -> String {
    let body = format!("<h1>All Pages</h1>\n{}", entry_links(names));
    layout("Encyclopedia", &body)
}

/// A single entry
pub fn entry(page: &EntryPage) -> String {
    let edit = if page.found {
        format!(
            r#"<p><a href="{}/edit">Edit this page</a></p>"#,
            escape(&entry_url(&page.title))
        )
    } else {
        String::new()
    };
    let body = format!("{}\n{}", page.html, edit);
    layout(&page.title, &body)
}

/// Search results for a query with no exact match
pub fn search(query: &str, results: &[String]) -> String {
    let listing = if results.is_empty() {
        "<p>No matching entries.</p>".to_string()
    } else {
        entry_links(results)
    };
    let body = format!(
        "<h1>Search Results</h1>\n<p>Entries matching \"{}\":</p>\n{}",
        escape(query),
        listing
    );
    layout("Search", &body)
}

/// The new-entry form, blank or redisplayed after an error
pub fn add(form: &EntryForm, error: Option<FormError>) -> String {
    let body = format!(
        r#"<h1>Create New Page</h1>
{error}
<form action="/add" method="post">
<p><label for="title">Title:</label>
<input type="text" id="title" name="title" value="{title}" required></p>
<p><label for="content">Content:</label>
<textarea id="content" name="content" required>{content}</textarea></p>
<input type="submit" value="Save">
</form>"#,
        error = error_line(error),
        title = escape(&form.title),
        content = escape(&form.content),
    );
    layout("Create New Page", &body)
}

/// The edit form; the title is shown but cannot be changed
pub fn edit(page: &EditPage, error: Option<FormError>) -> String {
    let url = escape(&entry_url(&page.title));
    let body = format!(
        r#"<h1>Edit Page</h1>
{error}
<form action="{url}/edit" method="post">
<p><label for="title">Title:</label>
<input type="text" id="title" name="title" value="{title}" readonly></p>
<p><label for="content">Content:</label>
<textarea id="content" name="content" required>{content}</textarea></p>
<input type="submit" value="Save">
</form>"#,
        error = error_line(error),
        title = escape(&page.title),
        content = escape(&page.content),
    );
    layout(&format!("Edit {}", page.title), &body)
}
