/// Prefix every resolvable `$ref` starts with.
pub const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// Converts snake or kebab case to camel case.
///
/// The first segment is kept as written, every later segment gets its first
/// letter uppercased. Runs of separators collapse, so `Foo__Bar` becomes
/// `FooBar` and `get_user-info` becomes `getUserInfo`.
pub fn to_camel_case(s: &str) -> String {
    let mut segments = s.split(['_', '-']).filter(|s| !s.is_empty());
    let mut out = segments.next().unwrap_or_default().to_string();
    for segment in segments {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// TypeScript name of a definition key.
///
/// Dots become `__` and every other character that can't appear in an
/// identifier becomes `_` before the camel case conversion, so `Foo.Bar` and
/// `Result«User»` come out as `FooBar` and `ResultUser`.
pub fn definition_type_name(name: &str) -> String {
    let sanitized: String = name
        .replace('.', "__")
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '$' { c } else { '_' })
        .collect();
    to_camel_case(&sanitized)
}

/// Definition key a `$ref` points at.
///
/// Returns `None` for anything that is not a local definitions reference.
pub fn reference_target(reference: &str) -> Option<&str> {
    reference
        .strip_prefix(DEFINITIONS_PREFIX)
        .filter(|name| !name.is_empty())
}

/// TypeScript name a `$ref` resolves to.
pub fn reference_type_name(reference: &str) -> String {
    let target = reference_target(reference)
        .unwrap_or_else(|| reference.rsplit('/').next().unwrap_or(reference));
    definition_type_name(target)
}

/// Name of the request function generated for `method` on `path`.
///
/// Segments up to and including the first version segment (`v1`, `v2`, ...)
/// are dropped, e.g. `post /api/v1/user-info/save` gives `postUserInfoSave`.
pub fn request_function_name(method: &str, path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let start = segments
        .iter()
        .position(|s| is_version_segment(s))
        .map_or(0, |i| i + 1);

    let mut name = method.to_string();
    for segment in &segments[start..] {
        name.push('_');
        name.extend(
            segment
                .chars()
                .map(|c| if c.is_alphanumeric() { c } else { '_' }),
        );
    }
    to_camel_case(&name)
}

fn is_version_segment(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
}

/// Renders an object key, quoting it when it isn't a valid identifier
/// (`page.size` becomes `'page.size'`).
pub fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        format!("'{}'", name.replace('\\', "\\\\").replace('\'', "\\'"))
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {
            chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}
