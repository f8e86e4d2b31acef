//! SPARQL text for endpoint lookups

use super::types::SearchRequest;

/// Number of columns selected by [`build_search`]: url, title, kind
pub const SEARCH_COLUMNS: usize = 3;

/// Escape a string for use inside a double-quoted SPARQL literal
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str(r"\\"),
            '"' => out.push_str(r#"\""#),
            '\'' => out.push_str(r"\'"),
            '\n' => out.push_str(r"\n"),
            '\r' => out.push_str(r"\r"),
            c => out.push(c),
        }
    }
    out
}

/// Build the lookup for a search request
///
/// Full-text queries are ordered by the index's own rank; a blank query
/// inside a scope lists the container alphabetically by URL.
pub fn build_search(request: &SearchRequest) -> String {
    let text = request.text.trim();
    let mut patterns = String::new();

    if !text.is_empty() {
        patterns.push_str(&format!("    ?s fts:match \"{}\" .\n", escape(text)));
    }

    patterns.push_str(
        "    ?s nie:isStoredAs/nie:dataSource/tracker:available
        | nie:dataSource/tracker:available true .
    ?s nie:url ?uri .
    OPTIONAL { ?s nie:title ?title . }
    BIND(IF(EXISTS { ?s nie:interpretedAs/rdf:type nfo:Folder } || EXISTS { ?s a nfo:Folder },
            \"folder\",
            IF(EXISTS { ?s a nfo:FileDataObject }, \"file\", \"other\")) AS ?kind)\n",
    );

    if let Some(scope) = &request.scope {
        let scope = escape(scope);
        patterns.push_str(&format!(
            "    ?s nfo:belongsToContainer ?parent .
    {{ ?parent nie:url \"{scope}\" }} UNION {{ ?parent nie:isStoredAs/nie:url \"{scope}\" }}\n"
        ));
    }

    let order = if text.is_empty() {
        "ORDER BY ASC(?uri)"
    } else {
        "ORDER BY DESC(fts:rank(?s))"
    };

    format!(
        "SELECT DISTINCT ?uri ?title ?kind\nWHERE {{\n{}}}\n{}\nOFFSET 0 LIMIT {}",
        patterns, order, request.limit
    )
}
