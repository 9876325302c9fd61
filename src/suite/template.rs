use crate::fixtures::FixtureIds;

/// Replaces `{{name}}` placeholders with fixture identifiers. Unknown
/// names, unterminated placeholders and everything else are copied as-is.
pub(crate) fn render_template(input: &str, fixtures: Option<&FixtureIds>) -> String {
    let Some(fixtures) = fixtures else {
        return input.to_owned();
    };
    let mut rest = input;
    let mut output = String::with_capacity(input.len());

    loop {
        let Some(start) = rest.find("{{") else {
            output.push_str(rest);
            break;
        };
        let (before, after_start) = rest.split_at(start);
        output.push_str(before);
        let Some(after) = after_start.strip_prefix("{{") else {
            output.push_str(after_start);
            break;
        };
        let Some(end) = after.find("}}") else {
            output.push_str(after_start);
            break;
        };
        let (key_part, after_end) = after.split_at(end);
        match fixtures.lookup(key_part.trim()) {
            Some(value) => output.push_str(value),
            None => {
                output.push_str("{{");
                output.push_str(key_part);
                output.push_str("}}");
            }
        }
        rest = match after_end.strip_prefix("}}") {
            Some(remaining) => remaining,
            None => {
                output.push_str(after_end);
                break;
            }
        };
    }

    output
}
