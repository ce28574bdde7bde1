//! Escaping for user-entered text that ends up in markup

/// Escape text for use in HTML element content or quoted attribute values
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

/// Reminder list markup for the popup: one `<li>` per line, all escaped
pub fn render_list_html<S: AsRef<str>>(lines: &[S]) -> String {
    let mut html = String::from("<ul id=\"reminder-list\">");
    for line in lines {
        html.push_str("<li>");
        html.push_str(&escape_html(line.as_ref()));
        html.push_str("</li>");
    }
    html.push_str("</ul>");
    html
}
