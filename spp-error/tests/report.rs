use spp_attrs::ErrorKind;
use spp_error::Error;

#[derive(Debug, ErrorKind)]
#[error(
    message = "unknown function",
    labels = [format!("`{}` is not defined", name)],
    help = "check the spelling of the function name",
)]
struct UnknownFunction {
    name: String,
}

#[derive(Debug, ErrorKind)]
#[error(message = "unexpected end of file", labels = [""])]
struct Eof;

/// Renders the error into a string with the ANSI colors removed.
fn render(err: &Error, input: &str) -> String {
    let mut buf = Vec::new();
    err.write_report("input", input, &mut buf).unwrap();
    String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap()
}

#[test]
fn report_contains_message_label_and_help() {
    let input = "foo(x) + 1";
    let err = Error::new(vec![0..3], UnknownFunction { name: "foo".to_string() });
    let report = render(&err, input);

    assert!(report.contains("unknown function"));
    assert!(report.contains("`foo` is not defined"));
    assert!(report.contains("check the spelling of the function name"));
}

#[test]
fn report_for_unit_struct() {
    let input = "x +";
    let err = Error::new(vec![2..3], Eof);
    let report = render(&err, input);

    assert!(report.contains("unexpected end of file"));
}
