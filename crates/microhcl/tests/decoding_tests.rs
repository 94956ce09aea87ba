// microhcl - a parser and document model for HCL1
//
// Copyright (c) 2025 the microhcl contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! End-to-end decoding tests: whole documents against expected value trees.

use microhcl::{parse, parse_slice, Value};
use pretty_assertions::assert_eq;

fn obj(entries: Vec<(&str, Value)>) -> Value {
    let mut root = Value::Object(microhcl::Object::new());
    for (key, value) in entries {
        root.set_child(key, value).unwrap();
    }
    root
}

fn list(items: Vec<Value>) -> Value {
    Value::List(items)
}

#[test]
fn decode_basic() {
    let doc = parse(
        r#"foo = "bar"
bar = "${file(\"bing/bong.txt\")}"
"#,
    )
    .unwrap();
    let expected = obj(vec![
        ("foo", "bar".into()),
        ("bar", r#"${file("bing/bong.txt")}"#.into()),
    ]);
    assert_eq!(doc, expected);
}

#[test]
fn decode_basic_squish() {
    let doc = parse(
        r#"foo="bar"
bar="${file(\"bing/bong.txt\")}"
foo-bar="baz"
"#,
    )
    .unwrap();
    let expected = obj(vec![
        ("foo", "bar".into()),
        ("bar", r#"${file("bing/bong.txt")}"#.into()),
        ("foo-bar", "baz".into()),
    ]);
    assert_eq!(doc, expected);
}

#[test]
fn decode_empty_block() {
    let doc = parse("resource \"foo\" {}\n").unwrap();
    let expected = obj(vec![("resource", obj(vec![("foo", obj(vec![]))]))]);
    assert_eq!(doc, expected);
}

#[test]
fn decode_tfvars_keeps_dotted_idents_literal() {
    // `map.key1` is one identifier; the parser stores it as a flat key.
    let doc = parse(
        "regularvar = \"Should work\"\nmap.key1 = \"Value\"\nmap.key2 = \"Other value\"\n",
    )
    .unwrap();
    let expected = obj(vec![
        ("regularvar", "Should work".into()),
        ("map.key1", "Value".into()),
        ("map.key2", "Other value".into()),
    ]);
    assert_eq!(doc, expected);
}

#[test]
fn decode_escapes() {
    let doc = parse(
        r#"foo = "bar\"baz\\n"
qux = "back\\slash"
bar = "new\nline"
qax = "slash\\:colon"
nested = "${HH\\\\:mm\\\\:ss}"
nestedquotes = "${"\\"stringwrappedinquotes\\""}"
"#,
    )
    .unwrap();
    let expected = obj(vec![
        ("foo", "bar\"baz\\n".into()),
        ("qux", "back\\slash".into()),
        ("bar", "new\nline".into()),
        ("qax", "slash\\:colon".into()),
        ("nested", r"${HH\\:mm\\:ss}".into()),
        ("nestedquotes", r#"${"\"stringwrappedinquotes\""}"#.into()),
    ]);
    assert_eq!(doc, expected);
}

#[test]
fn decode_escaped_backslashes_in_interpolation() {
    let doc = parse(
        r#"output {
    one = "${replace(var.sub_domain, ".", "\\.")}"
    two = "${replace(var.sub_domain, ".", "\\\\.")}"
}"#,
    )
    .unwrap();
    let expected = obj(vec![(
        "output",
        obj(vec![
            ("one", r#"${replace(var.sub_domain, ".", "\.")}"#.into()),
            ("two", r#"${replace(var.sub_domain, ".", "\\.")}"#.into()),
        ]),
    )]);
    assert_eq!(doc, expected);
}

#[test]
fn decode_float_and_int_stay_distinct() {
    let doc = parse("a = 1.02\nb = 2\n").unwrap();
    let expected = obj(vec![("a", (1.02).into()), ("b", 2.into())]);
    assert_eq!(doc, expected);
}

#[test]
fn decode_multiline_literal_with_interpolation() {
    let doc = parse("multiline_literal_with_hil = \"${hello\n world}\"\n").unwrap();
    let expected = obj(vec![("multiline_literal_with_hil", "${hello\n world}".into())]);
    assert_eq!(doc, expected);
}

#[test]
fn decode_multiline_heredoc() {
    let doc = parse("foo = <<EOF\nbar\nbaz\nEOF\n").unwrap();
    let expected = obj(vec![("foo", "bar\nbaz\n".into())]);
    assert_eq!(doc, expected);
}

#[test]
fn decode_multiline_heredoc_indented() {
    let doc = parse("foo = <<-EOF\n        bar\n        baz\n      EOF\n").unwrap();
    let expected = obj(vec![("foo", "  bar\n  baz\n".into())]);
    assert_eq!(doc, expected);
}

#[test]
fn decode_multiline_heredoc_no_hanging_indent() {
    let doc =
        parse("foo = <<-EOF\n        baz\n          bar\n            foo\n      EOF\n").unwrap();
    let expected = obj(vec![("foo", "  baz\n    bar\n      foo\n".into())]);
    assert_eq!(doc, expected);
}

#[test]
fn decode_content_after_heredoc() {
    let doc = parse("foo = <<EOF\nbar\nbaz\nEOF\nkey = \"value\"").unwrap();
    let expected = obj(vec![
        ("foo", "bar\nbaz\n".into()),
        ("key", "value".into()),
    ]);
    assert_eq!(doc, expected);
}

#[test]
fn decode_scientific_notation() {
    let doc = parse(
        "a = 1e-10\nb = 1e+10\nc = 1e10\nd = 1.2e-10\ne = 1.2e+10\nf = 1.2e10\n",
    )
    .unwrap();
    let expected = obj(vec![
        ("a", (1e-10).into()),
        ("b", (1e10).into()),
        ("c", (1e10).into()),
        ("d", (1.2e-10).into()),
        ("e", (1.2e10).into()),
        ("f", (1.2e10).into()),
    ]);
    assert_eq!(doc, expected);
}

#[test]
fn decode_terraform_heroku() {
    let doc = parse(
        "name = \"terraform-test-app\"\n\nconfig_vars {\n    FOO = \"bar\"\n}\n",
    )
    .unwrap();
    let expected = obj(vec![
        ("name", "terraform-test-app".into()),
        ("config_vars", obj(vec![("FOO", "bar".into())])),
    ]);
    assert_eq!(doc, expected);
}

#[test]
fn decode_structure_multi() {
    // Distinct labels fuse into one object rather than promoting to a list.
    let doc = parse("foo \"baz\" {\n    key = 7\n}\nfoo \"bar\" {\n    key = 12\n}\n").unwrap();
    let expected = obj(vec![(
        "foo",
        obj(vec![
            ("baz", obj(vec![("key", 7.into())])),
            ("bar", obj(vec![("key", 12.into())])),
        ]),
    )]);
    assert_eq!(doc, expected);
}

#[test]
fn decode_list_of_lists() {
    let doc = parse("foo = [[\"foo\"], [\"bar\"]]\n").unwrap();
    let expected = obj(vec![(
        "foo",
        list(vec![
            list(vec!["foo".into()]),
            list(vec!["bar".into()]),
        ]),
    )]);
    assert_eq!(doc, expected);
}

#[test]
fn decode_list_of_maps() {
    let doc = parse(
        "foo = [\n  {somekey1 = \"someval1\"},\n  {somekey2 = \"someval2\", someextrakey = \"someextraval\"},\n]\n",
    )
    .unwrap();
    let expected = obj(vec![(
        "foo",
        list(vec![
            obj(vec![("somekey1", "someval1".into())]),
            obj(vec![
                ("somekey2", "someval2".into()),
                ("someextrakey", "someextraval".into()),
            ]),
        ]),
    )]);
    assert_eq!(doc, expected);
}

#[test]
fn decode_assign_deep() {
    let doc = parse("resource = [{\n  foo = [{\n    bar = {}\n  }]\n}]\n").unwrap();
    let expected = obj(vec![(
        "resource",
        list(vec![obj(vec![(
            "foo",
            list(vec![obj(vec![("bar", obj(vec![]))])]),
        )])]),
    )]);
    assert_eq!(doc, expected);
}

#[test]
fn decode_object_with_bool() {
    let doc = parse(
        "path {\n    policy = \"write\"\n    permissions = {\n        \"bool\" = [false]\n    }\n}\n",
    )
    .unwrap();
    let expected = obj(vec![(
        "path",
        obj(vec![
            ("policy", "write".into()),
            ("permissions", obj(vec![("bool", list(vec![false.into()]))])),
        ]),
    )]);
    assert_eq!(doc, expected);
}

#[test]
fn decode_invalid_documents_fail() {
    let invalid: &[&str] = &[
        // string literal broken across lines
        "foo = \"bar\nbaz\"",
        // heredoc with trailing junk on the anchor line
        "foo = <<EOF bar\n",
        // heredoc with no anchor at all
        "foo = <<\nbar\n",
        // block comments are unsupported
        "/* comment */\nfoo = bar",
        "unterminated = \"cool\" /*",
        // unterminated block
        "foo \"bar\" {\n",
        // nested block after an assignment value
        "resource \"aws\" \"web\" {\n provider = \"aws\" {}\n}",
        // assignment to a labeled block path
        "foo bar = {}",
    ];
    for input in invalid {
        assert!(parse(input).is_err(), "expected failure: {input:?}");
    }
}

#[test]
fn decode_binary_garbage_fails() {
    let err = parse_slice(b"\x00GITCRYPT\x00\xff\xfe").unwrap_err();
    assert!(err.to_string().starts_with("Error: line 1: "));
}

#[test]
fn parse_file_reads_from_disk() {
    let path = std::env::temp_dir().join(format!("microhcl-decode-{}.hcl", std::process::id()));
    std::fs::write(&path, "name = \"from-disk\"\nport = 8080\n").unwrap();

    let doc = microhcl::parse_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(doc.get::<String>("name").unwrap(), "from-disk");
    assert_eq!(doc.get::<i64>("port").unwrap(), 8080);
}
