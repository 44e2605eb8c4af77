use std::borrow::Cow;

const SECRET_JSON_FIELDS: [&str; 4] = ["access", "refresh", "password", "password2"];

fn find_ascii_case_insensitive(haystack: &str, needle: &str) -> Option<usize> {
    let hay = haystack.as_bytes();
    let nee = needle.as_bytes();
    if nee.is_empty() {
        return Some(0);
    }
    if nee.len() > hay.len() {
        return None;
    }

    (0..=hay.len() - nee.len()).find(|&i| {
        hay[i..i + nee.len()]
            .iter()
            .zip(nee)
            .all(|(a, b)| a.to_ascii_lowercase() == b.to_ascii_lowercase())
    })
}

fn redact_header_value(text: String, header: &str, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text.as_str();
    loop {
        let Some(idx) = find_ascii_case_insensitive(rest, header) else {
            out.push_str(rest);
            break;
        };
        out.push_str(&rest[..idx]);
        rest = &rest[idx..];

        // Keep the header name exactly as written.
        out.push_str(&rest[..header.len()]);
        rest = &rest[header.len()..];

        if let Some(stripped) = rest.strip_prefix(' ') {
            out.push(' ');
            rest = stripped;
        }

        let consumed = rest.find(['\n', '\r']).unwrap_or(rest.len());
        out.push_str(replacement);
        rest = &rest[consumed..];
    }
    out
}

/// Masks the string value of `"field": "..."` wherever it appears.
fn redact_json_field(text: String, field: &str) -> String {
    let key = format!("\"{field}\"");
    if !text.contains(&key) {
        return text;
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text.as_str();
    while let Some(idx) = rest.find(&key) {
        out.push_str(&rest[..idx + key.len()]);
        rest = &rest[idx + key.len()..];

        let after_ws = rest.trim_start();
        let Some(after_colon) = after_ws.strip_prefix(':') else {
            continue;
        };
        let value = after_colon.trim_start();
        if !value.starts_with('"') {
            continue;
        }

        // Separator is copied verbatim, then the quoted value is replaced.
        let separator_len = rest.len() - value.len();
        out.push_str(&rest[..separator_len]);
        let body = &value[1..];

        let mut escaped = false;
        let mut end = None;
        for (i, ch) in body.char_indices() {
            match ch {
                '\\' if !escaped => escaped = true,
                '"' if !escaped => {
                    end = Some(i);
                    break;
                }
                _ => escaped = false,
            }
        }

        out.push_str("\"REDACTED\"");
        rest = match end {
            Some(i) => &body[i + 1..],
            None => "",
        };
    }
    out.push_str(rest);
    out
}

/// Strips bearer tokens and credential fields from text that may end up in logs or error output.
pub fn redact_secrets(input: &str) -> Cow<'_, str> {
    let mut value = redact_header_value(input.to_string(), "Authorization: Bearer", "REDACTED");
    for field in SECRET_JSON_FIELDS {
        value = redact_json_field(value, field);
    }

    if value == input {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(value)
    }
}
