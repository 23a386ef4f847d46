use std::io::Write;

use pretty_assertions::assert_eq;

use super::*;

fn drain(source: &mut dyn LineSource) -> Vec<SourceLine> {
    let mut lines = Vec::new();
    loop {
        let line = source.next_line().unwrap();
        let done = !matches!(line, SourceLine::Text(_));
        lines.push(line);
        if done {
            return lines;
        }
    }
}

#[test]
fn text_source_ends_with_end_of_file() {
    let mut source = TextSource::new("A = 1;\r\n\nB = 2;");
    assert_eq!(
        drain(&mut source),
        vec![
            SourceLine::Text("A = 1;".into()),
            SourceLine::Text(String::new()),
            SourceLine::Text("B = 2;".into()),
            SourceLine::EndOfFile,
        ]
    );
    assert_eq!(source.next_line().unwrap(), SourceLine::EndOfFile);
}

#[test]
fn member_source_ends_with_end_of_member() {
    let mut source = TextSource::member("X;");
    assert_eq!(
        drain(&mut source),
        vec![SourceLine::Text("X;".into()), SourceLine::EndOfMember]
    );
}

#[test]
fn file_source_strips_line_terminators() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, " FIRST\r\n SECOND\n").unwrap();
    let mut source = FileSource::open(file.path()).unwrap();
    assert_eq!(
        drain(&mut source),
        vec![
            SourceLine::Text(" FIRST".into()),
            SourceLine::Text(" SECOND".into()),
            SourceLine::EndOfFile,
        ]
    );
}

#[test]
fn file_source_replaces_invalid_utf8() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"A\xFFB\n").unwrap();
    let mut source = FileSource::open_member(file.path()).unwrap();
    assert_eq!(source.next_line().unwrap(), SourceLine::Text("A\u{FFFD}B".into()));
    assert_eq!(source.next_line().unwrap(), SourceLine::EndOfMember);
}

#[test]
fn missing_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.hal");
    let err = FileSource::open(&path).unwrap_err();
    assert!(matches!(err, SourceError::Open { .. }));
    assert!(err.to_string().contains("absent.hal"));
}
