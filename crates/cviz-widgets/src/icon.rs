//! Icon name to glyph lookup.
//!
//! Names follow the icon set agents are prompted with (`check-circle`,
//! `CheckCircle` and `check_circle` are the same icon). Unknown names resolve
//! to `None` and callers draw no icon.

/// Known icons, keyed by normalized name (lowercase, separators removed).
static ICONS: &[(&str, char)] = &[
    ("activity", '⚡'),
    ("alertcircle", '⊘'),
    ("alerttriangle", '⚠'),
    ("archive", '▤'),
    ("award", '✪'),
    ("bell", '♪'),
    ("book", '▥'),
    ("bookopen", '▥'),
    ("bug", '✱'),
    ("calendar", '▦'),
    ("check", '✓'),
    ("checkcircle", '✔'),
    ("circle", '○'),
    ("clock", '◷'),
    ("cloud", '☁'),
    ("code", '⌘'),
    ("database", '⛁'),
    ("download", '⇣'),
    ("file", '▯'),
    ("filetext", '▤'),
    ("flag", '⚑'),
    ("gitbranch", '⑂'),
    ("gitcommit", '◉'),
    ("gitmerge", '⑃'),
    ("globe", '◍'),
    ("heart", '♥'),
    ("home", '⌂'),
    ("info", 'ℹ'),
    ("key", '⚷'),
    ("lock", '⚿'),
    ("mail", '✉'),
    ("mappin", '⌖'),
    ("messagecircle", '◌'),
    ("package", '▣'),
    ("play", '▶'),
    ("rocket", '⇪'),
    ("search", '⌕'),
    ("server", '▭'),
    ("settings", '⚙'),
    ("shield", '⛨'),
    ("star", '★'),
    ("sun", '☀'),
    ("target", '◎'),
    ("terminal", '❯'),
    ("trophy", '♛'),
    ("upload", '⇡'),
    ("user", '☺'),
    ("users", '☻'),
    ("wrench", '⚒'),
    ("x", '✗'),
    ("xcircle", '⊗'),
    ("zap", 'ϟ'),
];

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Glyph for `name`, or `None` if the icon is unknown.
pub fn lookup(name: &str) -> Option<char> {
    let key = normalize(name);
    ICONS
        .binary_search_by(|(k, _)| (*k).cmp(key.as_str()))
        .ok()
        .map(|i| ICONS[i].1)
}
