/// Marker that flags a documented field as required.
pub const REQUIRED_MARKER: &str = "@required";

/// Placeholder used when a field has no documentation.
pub const NO_DESCRIPTION: &str = "no description";

/// Renders `text` as a JSDoc block, one ` * ` line per source line.
pub fn doc_block(text: &str, indent: &str) -> String {
    let mut out = format!("{indent}/**\n");
    for line in text.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            out.push_str(&format!("{indent} *\n"));
        } else {
            out.push_str(&format!("{indent} * {}\n", line.replace("*/", "*\\/")));
        }
    }
    out.push_str(&format!("{indent} */\n"));
    out
}
