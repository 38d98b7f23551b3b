//! Archive path primitives
//!
//! Helpers for working with the flat, archive-relative path strings the host
//! hands to the installers. Archive indexes are produced on either platform,
//! so both `/` and `\` count as separators, and all directory-name matching
//! is case-insensitive (source archives use inconsistent casing).

/// True for either platform's path separator.
pub fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// True if the entry denotes a directory rather than a file.
///
/// Archive indexes mark directories with a trailing separator; such entries
/// never become copy instructions.
pub fn is_dir_entry(path: &str) -> bool {
    path.chars().next_back().is_some_and(is_separator)
}

/// Index of the first path component equal to `name`, ignoring case.
pub fn component_index(path: &str, name: &str) -> Option<usize> {
    path.split(is_separator)
        .position(|c| c.eq_ignore_ascii_case(name))
}

/// True if the first path component equals `name` (ignoring case) and a
/// separator follows it, i.e. the path actually descends into `name/`.
pub fn starts_with_component(path: &str, name: &str) -> bool {
    let mut parts = path.split(is_separator);
    match parts.next() {
        Some(first) => first.eq_ignore_ascii_case(name) && parts.next().is_some(),
        None => false,
    }
}

/// Everything after the first path component, or `""` for a bare name.
pub fn skip_first_component(path: &str) -> &str {
    match path.char_indices().find(|&(_, c)| is_separator(c)) {
        Some((i, c)) => &path[i + c.len_utf8()..],
        None => "",
    }
}

/// Case-insensitively strips `prefix` from the front of `path`, returning
/// the remainder of the original (un-lowercased) text. Separators in the
/// prefix match either separator in the path. An empty prefix always
/// matches.
pub fn strip_prefix_ignore_case<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    let mut rest = path;
    for pc in prefix.chars() {
        let mut chars = rest.chars();
        let sc = chars.next()?;
        let matched = if is_separator(pc) {
            is_separator(sc)
        } else if pc.is_ascii() && sc.is_ascii() {
            sc.eq_ignore_ascii_case(&pc)
        } else {
            sc.to_lowercase().eq(pc.to_lowercase())
        };
        if !matched {
            return None;
        }
        rest = chars.as_str();
    }
    Some(rest)
}
