//! Hints attached to YAML parse errors, keyed by a lower-case fragment of the
//! parser's message.

pub(crate) const YAML_HINTS: [(&str, &str); 6] = [
    (
        "did not find expected '-'",
        "Start each module entry with '-' and indent its keys consistently.",
    ),
    (
        "expected ':'",
        "Ensure each key is followed by ':' separating key and value.",
    ),
    (
        "mapping values are not allowed",
        "Quote values containing ':' such as `-DFOO=a:b` options.",
    ),
    (
        "found character that cannot start any token",
        "Remove stray characters and ensure indentation uses spaces (no tabs).",
    ),
    (
        "unknown escape character",
        "Use valid YAML escape sequences or single-quote the string.",
    ),
    (
        "did not find expected node content",
        "A list or mapping entry is empty; remove the dangling '-' or key.",
    ),
];
