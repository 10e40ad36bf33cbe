//! Sitemap XML serialization

pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Serializes URLs into a sitemap document, one `<url>` per line, in input order
///
/// ```
/// use rhtmx_sitemap::xml::generate_xml;
///
/// let xml = generate_xml(&["https://my-site.com/"]);
/// assert!(xml.contains("<url><loc>https://my-site.com/</loc></url>"));
/// ```
pub fn generate_xml<S: AsRef<str>>(urls: &[S]) -> String {
    let mut xml = String::with_capacity(128 + urls.len() * 64);
    xml.push_str(XML_HEADER);
    xml.push('\n');
    xml.push_str(&format!(r#"<urlset xmlns="{}">"#, SITEMAP_NAMESPACE));
    xml.push('\n');

    for url in urls {
        xml.push_str("<url><loc>");
        xml.push_str(&escape_xml(url.as_ref()));
        xml.push_str("</loc></url>\n");
    }

    xml.push_str("</urlset>");
    xml
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_document_layout() {
        let xml = generate_xml(&["/", "/contacts"]);
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n\
             <url><loc>/</loc></url>\n\
             <url><loc>/contacts</loc></url>\n\
             </urlset>"
        );
    }

    #[test]
    fn test_empty_urlset() {
        let xml = generate_xml::<&str>(&[]);
        assert!(xml.ends_with("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n</urlset>"));
    }

    #[test]
    fn test_loc_is_escaped() {
        let xml = generate_xml(&["/search?q=a&b=<c>"]);
        assert!(xml.contains("<loc>/search?q=a&amp;b=&lt;c&gt;</loc>"));
        assert_eq!(escape_xml(r#"it's "x""#), "it&apos;s &quot;x&quot;");
    }
}
