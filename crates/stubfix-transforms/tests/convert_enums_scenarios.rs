//! Behavioural tests for the enum rewriter on realistic stub fragments.

use std::fs;
use stubfix_core::Runner;
use stubfix_transforms::convert_enums::{rewrite, rewrite_stream};
use stubfix_transforms::ConvertEnums;
use tempfile::TempDir;

#[test]
fn rewrites_module_level_enum() {
    let input = "\
class MyEnum(int): ...
MyEnum.Field1 = ...  # type: MyEnum
MyEnum.Field2 = ...  # type: MyEnum
";

    insta::assert_snapshot!(rewrite(input), @r"
class MyEnum(int):
    Field1: 'MyEnum'
    Field2: 'MyEnum'
");
}

#[test]
fn plain_code_is_byte_identical() {
    let input = "def foo(x: int) -> int:\n    return x + 1\n";
    assert_eq!(rewrite(input), input);
}

#[test]
fn header_without_fields_gets_empty_body() {
    let input = "class Empty(int): ...\ndef bar(): ...\n";
    assert_eq!(rewrite(input), "class Empty(int):\ndef bar(): ...\n");
}

#[test]
fn nested_block_keeps_indentation() {
    let input = "    class Inner(int): ...\n    Inner.A = ...  # type: Inner\n";
    assert_eq!(rewrite(input), "    class Inner(int):\n        A: 'Inner'\n");
}

#[test]
fn quoted_annotation_is_not_double_quoted() {
    let input = "\
class X(int): ...
X.A = ...  # type: 'some.module.X'
";

    insta::assert_snapshot!(rewrite(input), @r"
class X(int):
    A: 'some.module.X'
");
}

#[test]
fn quoted_and_bare_annotations_render_the_same() {
    let quoted = rewrite("class E(int): ...\nE.A = ...  # type: 'Foo.Bar'\n");
    let bare = rewrite("class E(int): ...\nE.A = ...  # type: Foo.Bar\n");
    assert_eq!(quoted, bare);
}

#[test]
fn line_count_is_conserved() {
    let input = "\
import typing

class QgsUnitTypes(sip.wrapper):

    class DistanceUnit(int): ...
    DistanceMeters = ...  # type: 'QgsUnitTypes.DistanceUnit'
    DistanceKilometers = ...  # type: 'QgsUnitTypes.DistanceUnit'
    DistanceFeet = ...  # type: 'QgsUnitTypes.DistanceUnit'

    def __init__(self) -> None: ...
";
    let output = rewrite(input);

    assert_eq!(output.lines().count(), input.lines().count());
    assert!(output.contains("    class DistanceUnit(int):\n"));
    assert!(output.contains("        DistanceFeet: 'QgsUnitTypes.DistanceUnit'\n"));
    assert!(output.contains("\n\n    def __init__(self) -> None: ...\n"));
}

#[test]
fn rewrite_is_idempotent() {
    let cases = [
        (
            "module-level enum",
            "class MyEnum(int): ...\nMyEnum.Field1 = ...  # type: MyEnum\nMyEnum.Field2 = ...  # type: MyEnum\n",
        ),
        (
            "plain code",
            "def foo(x: int) -> int:\n    return x + 1\n",
        ),
        (
            "header without fields",
            "class Empty(int): ...\ndef bar(): ...\n",
        ),
        (
            "nested block",
            "    class Inner(int): ...\n    Inner.A = ...  # type: Inner\n",
        ),
        (
            "quoted annotation",
            "class X(int): ...\nX.A = ...  # type: 'some.module.X'\n",
        ),
        (
            "crlf line endings",
            "class A(int): ...\r\nA.X = ...  # type: A\r\nA.Y = ...  # type: 'A'\r\nx = 1\r\n",
        ),
        (
            "header at end of input",
            "x = 1\nclass Last(int): ...",
        ),
        (
            "field on unterminated last line",
            "class A(int): ...\nA.X = ...  # type: A",
        ),
    ];

    for (name, input) in cases {
        let once = rewrite(input);
        assert_eq!(rewrite(&once), once, "{name}: second pass");
    }
}

#[test]
fn header_directly_after_block_is_copied_verbatim() {
    let input = "\
class A(int): ...
A.X = ...  # type: A
class B(int): ...
B.Y = ...  # type: B
";
    assert_eq!(
        rewrite(input),
        "class A(int):\n    X: 'A'\nclass B(int): ...\nB.Y = ...  # type: B\n"
    );
}

#[test]
fn field_lines_without_header_are_untouched() {
    let input = "Orphan.A = ...  # type: Orphan\n";
    assert_eq!(rewrite(input), input);
}

#[test]
fn stream_matches_whole_text_rewrite() {
    let input = "class A(int): ...\nA.X = ...  # type: A\nx = 1\n";
    let mut out = Vec::new();
    rewrite_stream(input.as_bytes(), &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), rewrite(input));
}

#[test]
fn runner_rewrites_stub_tree() {
    let tmp = TempDir::new().unwrap();
    let core = tmp.path().join("qgis/core");
    fs::create_dir_all(&core).unwrap();
    fs::write(
        core.join("__init__.pyi"),
        "class Qgis(sip.wrapper):\n    class MessageLevel(int): ...\n    Info = ...  # type: 'Qgis.MessageLevel'\n",
    )
    .unwrap();
    fs::write(core.join("README"), "class R(int): ...\n").unwrap();

    let report = Runner::builder()
        .root(tmp.path())
        .transform(ConvertEnums::new())
        .build()
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(report.files_scanned, 1);
    assert_eq!(report.changes.len(), 2);
    assert_eq!(
        fs::read_to_string(core.join("__init__.pyi")).unwrap(),
        "class Qgis(sip.wrapper):\n    class MessageLevel(int):\n        Info: 'Qgis.MessageLevel'\n"
    );
    assert_eq!(
        fs::read_to_string(core.join("README")).unwrap(),
        "class R(int): ...\n"
    );
}
