// Shared prompt fragments.
// Each module that talks to the model keeps its own prompts.rs alongside it;
// only cross-cutting pieces live here.

/// System prompt suffix that enforces JSON-only output.
pub const JSON_ONLY_INSTRUCTION: &str = "Always return valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Renders a platform list the way prompts and fallbacks quote it.
pub fn platform_text(platforms: &[String]) -> String {
    platforms.join(", ")
}

/// Fills `{name}` placeholders in one pass. Substituted text is never rescanned,
/// so user input containing `{...}` stays literal. Braces that do not enclose a
/// known name (JSON examples in templates) are copied through.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (close, *value))
        });
        match value {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
