//! Small utility helpers used across modules.

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
/// Substitution is single-pass: text coming from a value is never rescanned,
/// so user input containing `{...}` comes through untouched.
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = String::with_capacity(tpl.len());
  let mut rest = tpl;
  while let Some(open) = rest.find('{') {
    out.push_str(&rest[..open]);
    let after = &rest[open + 1..];
    let replaced = after.find('}').and_then(|close| {
      let key = &after[..close];
      pairs
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| (*v, close))
    });
    match replaced {
      Some((value, close)) => {
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

/// Upper-case the first character and lower-case the rest ("assistant" → "Assistant").
pub fn capitalize(s: &str) -> String {
  let mut chars = s.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
    None => String::new(),
  }
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge request/response payloads.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut cut = max;
  while !s.is_char_boundary(cut) {
    cut -= 1;
  }
  format!("{}… ({} bytes total)", &s[..cut], s.len())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fills_known_keys_and_leaves_json_braces() {
    let tpl = "{\n  \"topic\": \"{topic}\"\n} {unknown}";
    let out = fill_template(tpl, &[("topic", "food")]);
    assert_eq!(out, "{\n  \"topic\": \"food\"\n} {unknown}");
  }

  #[test]
  fn substituted_values_are_not_rescanned() {
    let out = fill_template("{a} / {b}", &[("a", "{b}"), ("b", "x")]);
    assert_eq!(out, "{b} / x");
  }

  #[test]
  fn capitalize_matches_title_style_roles() {
    assert_eq!(capitalize("user"), "User");
    assert_eq!(capitalize("ASSISTANT"), "Assistant");
    assert_eq!(capitalize(""), "");
  }

  #[test]
  fn trunc_respects_char_boundaries() {
    let s = "ẹ".repeat(10);
    let t = trunc_for_log(&s, 4);
    assert!(t.starts_with("ẹ"));
    assert!(t.ends_with("(30 bytes total)"));
  }
}
