/// Build the three-tab markdown fragment for one API entry.
///
/// The fragment contains a `GDScript` tab, a `C++ Header` tab and a
/// `C++ Source` tab, always in that order. Each snippet is placed verbatim
/// inside a fenced code block. Nothing is escaped or validated, so empty
/// strings and snippets containing backticks or newlines are passed straight
/// through.
///
/// The indentation inside the tabs is consumed by the tabbed-content markdown
/// extension and must not change.
///
/// # Example
///
/// ```
/// let tabs = tabdoc_snippets::format_impl("var x = 1", "void f();", "void f() {}");
/// assert!(tabs.contains("=== \"GDScript\""));
/// assert!(tabs.contains("        void f();\n"));
/// ```
#[must_use]
pub fn format_impl(gdscript: &str, header: &str, source: &str) -> String {
  format!(
    concat!(
      "\n",
      "=== \"GDScript\"\n",
      "\n",
      "        ``` gdscript \n",
      "        {gdscript}\n",
      "        ```\n",
      "\n",
      "=== \"C++ Header\"\n",
      "\n",
      "        ``` cpp \n",
      "        {header}\n",
      "        ```\n",
      "\n",
      "=== \"C++ Source\"\n",
      "\n",
      "        ``` cpp \n",
      "        {source}\n",
      "        ```\n",
      "            ",
    ),
    gdscript = gdscript,
    header = header,
    source = source,
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  const EXPECTED: &str = "\n=== \"GDScript\"\n\n        ``` gdscript \n        \
                          var x = 1\n        ```\n\n=== \"C++ Header\"\n\n        \
                          ``` cpp \n        void f();\n        ```\n\n=== \"C++ \
                          Source\"\n\n        ``` cpp \n        void f() {}\n        \
                          ```\n            ";

  #[test]
  fn test_format_impl_matches_template() {
    assert_eq!(format_impl("var x = 1", "void f();", "void f() {}"), EXPECTED);
  }

  #[test]
  fn test_format_impl_is_deterministic() {
    let first = format_impl("func _ready():\n\tpass", "class A;", "A::A() {}");
    let second = format_impl("func _ready():\n\tpass", "class A;", "A::A() {}");
    assert_eq!(first, second);
  }

  #[test]
  fn test_tab_order() {
    let out = format_impl("c++ header", "gdscript", "=== \"GDScript\"");
    let gd = out.find("=== \"GDScript\"").unwrap_or(usize::MAX);
    let header = out.find("=== \"C++ Header\"").unwrap_or(usize::MAX);
    let source = out.find("=== \"C++ Source\"").unwrap_or(usize::MAX);
    assert!(gd < header);
    assert!(header < source);
    assert_ne!(source, usize::MAX);
  }

  #[test]
  fn test_empty_inputs_keep_structure() {
    let out = format_impl("", "", "");
    assert_eq!(out.matches("=== \"").count(), 3);
    assert_eq!(out.matches("``` cpp \n        \n        ```").count(), 2);
    assert!(out.contains("``` gdscript \n        \n        ```"));
  }

  #[test]
  fn test_backticks_pass_through() {
    let gdscript = "```\nprint(\"hi\")\n```";
    let out = format_impl(gdscript, "", "");
    assert!(out.contains(gdscript));
    assert_eq!(out.matches("```").count(), 8);
  }

  #[test]
  fn test_multiline_snippets_are_not_reindented() {
    let source = "void Node::_ready() {\n\tprint_line(\"ready\");\n}";
    let out = format_impl("", "", source);
    assert!(out.contains(
      "        ``` cpp \n        void Node::_ready() {\n\tprint_line(\"ready\");\n}\n        ```"
    ));
  }
}
