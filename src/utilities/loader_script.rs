use crate::utilities::ScriptElement;

/// Generates the body of one inline script that re-creates the given sourced scripts at
/// runtime. Every injected script has `async = false`, so they still execute in the order
/// they appeared in the document.
///
/// Returns an empty string when there is nothing to load.
pub fn synthesize_loader(sourced: &[ScriptElement]) -> String {
    let urls = sourced
        .iter()
        .filter_map(|script| script.src.as_deref())
        .map(|src| format!("'{}'", escape_js_string(src)))
        .collect::<Vec<String>>();

    if urls.is_empty() {
        return String::new();
    }

    format!(
        "var scripts = [{}];
    scripts.forEach(function(scriptUrl) {{
      var s = document.createElement('script');
      s.src = scriptUrl;
      s.async = false;
      document.body.appendChild(s);
    }});\n",
        urls.join(",")
    )
}

fn escape_js_string(value: &str) -> String {
    let mut output = String::with_capacity(value.len());

    for character in value.chars() {
        match character {
            '\\' => output.push_str("\\\\"),
            '\'' => output.push_str("\\'"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            // keeps "</script>" from terminating the surrounding element
            '<' => output.push_str("\\x3C"),
            _ => output.push(character),
        }
    }

    output
}
