//! Escaping of selection text into the transform tool's string-literal syntax

/// Escape text for embedding in the tool's double-quoted string literals.
///
/// Substitutions run in a fixed order: backslashes first, then double quotes,
/// then the interpolation opener `#{`. Running them in any other order would
/// re-escape the backslashes inserted by the earlier steps.
pub fn escape_literal(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace("#{", "\\#{")
}
