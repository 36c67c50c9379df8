// Shared prompt fragments and prompt-building utilities.
// Each feature that needs model calls defines its own prompts.rs alongside it.

/// Appended to every rewrite prompt so the reply is usable as-is.
pub const NO_COMMENTARY_INSTRUCTION: &str = "\
    Return ONLY the rewritten text. Do NOT add any commentary, preamble, headings, \
    quotation marks, or notes about what you changed.";

/// Minimum fence length, matching the familiar triple-quote block.
const MIN_FENCE_LEN: usize = 3;

/// Returns a run of double quotes that cannot occur inside `text`.
///
/// The fence is at least three quotes long and one longer than the longest run
/// of quotes already in `text`, so user content can never close the block early.
pub fn fence_for(text: &str) -> String {
    let mut longest = 0;
    let mut current = 0;
    for ch in text.chars() {
        if ch == '"' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    "\"".repeat((longest + 1).max(MIN_FENCE_LEN))
}

/// Substitutes `{key}` placeholders in a single pass.
///
/// Substituted values are never rescanned, so braces inside user text stay literal.
/// Braces that do not name a known key are copied through unchanged.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let hit = values
            .iter()
            .find(|(key, _)| tail.starts_with(key) && tail[key.len()..].starts_with('}'));
        match hit {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len() + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Wraps `text` verbatim between fences chosen by [`fence_for`].
pub fn fenced(text: &str) -> String {
    let fence = fence_for(text);
    format!("{fence}\n{text}\n{fence}")
}
