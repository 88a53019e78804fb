//! Prompt template filling.

/// Replaces each `{name}` placeholder in `template` with its value from `vars`, in one pass.
///
/// Substituted values are never rescanned, so a document that contains `{question}` stays
/// verbatim. Braces that do not enclose a known name (JSON examples in prompts) are kept.
pub fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        let hit = tail.find('}').and_then(|close| {
            let name = &tail[..close];
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (close, *value))
        });
        match hit {
            Some((close, value)) => {
                out.push_str(value);
                rest = &tail[close + 1..];
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

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: A placeholder inside a substituted value is not expanded again.
    #[test]
    fn substituted_text_is_not_rescanned() {
        let filled = fill_template(
            "Doc: {document}\nQ: {question}",
            &[("document", "format!(\"{question}\")"), ("question", "WHAT-IS-IT")],
        );
        assert_eq!(filled, "Doc: format!(\"{question}\")\nQ: WHAT-IS-IT");
    }

    #[test]
    fn unknown_braces_are_kept() {
        let filled = fill_template(
            r#"Reply {"binary_score": "yes"} for {question} {missing"#,
            &[("question", "q")],
        );
        assert_eq!(filled, r#"Reply {"binary_score": "yes"} for q {missing"#);
    }

    #[test]
    fn repeated_placeholders() {
        assert_eq!(fill_template("{a}-{a}", &[("a", "x")]), "x-x");
    }
}
