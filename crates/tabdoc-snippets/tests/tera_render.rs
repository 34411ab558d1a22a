#![allow(clippy::expect_used, reason = "Expect is acceptable in tests")]

use std::error::Error as _;

use tabdoc_snippets::{format_impl, register};
use tera::{Context, Tera};

fn environment() -> Tera {
  let mut tera = Tera::default();
  register(&mut tera);
  tera
}

fn error_chain(err: &tera::Error) -> String {
  let mut messages = vec![err.to_string()];
  let mut source = err.source();
  while let Some(cause) = source {
    messages.push(cause.to_string());
    source = cause.source();
  }
  messages.join(": ")
}

#[test]
fn test_impl_renders_literal_arguments() {
  let mut tera = environment();
  let rendered = tera
    .render_str(
      r#"{{ impl(gdscript="var x = 1", header="void f();", source="void f() {}") }}"#,
      &Context::new(),
    )
    .expect("render impl call");

  assert_eq!(rendered, format_impl("var x = 1", "void f();", "void f() {}"));
}

#[test]
fn test_impl_output_is_not_escaped() {
  let mut tera = environment();
  let mut ctx = Context::new();
  ctx.insert("g", "if a < b and c > d:\n\tprint(\"&\")");
  ctx.insert("h", "template <typename T> struct Ref;");
  ctx.insert("s", "```\nraw\n```");

  let rendered = tera
    .render_str("{{ impl(gdscript=g, header=h, source=s) }}", &ctx)
    .expect("render impl call");

  assert_eq!(
    rendered,
    format_impl(
      "if a < b and c > d:\n\tprint(\"&\")",
      "template <typename T> struct Ref;",
      "```\nraw\n```",
    )
  );
}

#[test]
fn test_impl_inside_markdown_page() {
  let mut tera = environment();
  let page = "# Node\n\n## ready\n{{ impl(gdscript=\"func _ready():\", \
              header=\"void _ready();\", source=\"void Node::_ready() {}\") \
              }}\n\nMore text.\n";

  let rendered = tera.render_str(page, &Context::new()).expect("render page");

  assert!(rendered.starts_with("# Node\n\n## ready\n\n=== \"GDScript\"\n"));
  assert!(rendered.contains("        void Node::_ready() {}\n"));
  assert!(rendered.ends_with("        ```\n            \n\nMore text.\n"));
}

#[test]
fn test_impl_rejects_non_string_argument() {
  let mut tera = environment();
  let err = tera
    .render_str(
      r#"{{ impl(gdscript=42, header="", source="") }}"#,
      &Context::new(),
    )
    .expect_err("numbers are not snippets");

  assert!(
    error_chain(&err).contains("argument `gdscript` must be a string")
  );
}

#[test]
fn test_impl_rejects_missing_argument() {
  let mut tera = environment();
  let err = tera
    .render_str(r#"{{ impl(gdscript="", header="") }}"#, &Context::new())
    .expect_err("source is required");

  assert!(error_chain(&err).contains("missing argument `source`"));
}
