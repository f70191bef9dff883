// ============================================================================
// Identifier case conversion
// ============================================================================
//
// Element ids arrive in kebab-case (`search-result[]`) and are exposed in
// PascalCase (`SearchResult[]`). Generated CSS selectors go the other way.

/// `foo-bar` -> `fooBar`. Only a lowercase ASCII letter after a hyphen is
/// folded; any other hyphen is kept verbatim.
pub fn kebab_to_camel(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '-' {
            if let Some(&next) = chars.peek() {
                if next.is_ascii_lowercase() {
                    out.push(next.to_ascii_uppercase());
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }

    out
}

/// `foo-bar` -> `FooBar`
pub fn kebab_to_pascal(input: &str) -> String {
    first_to_upper(&kebab_to_camel(input))
}

/// `FooBar` -> `foo-bar`
pub fn pascal_to_kebab(input: &str) -> String {
    camel_to_kebab(&first_to_lower(input))
}

/// `fooBar` -> `foo-bar`
pub fn camel_to_kebab(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    for c in input.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

pub fn first_to_upper(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn first_to_lower(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
