use std::fs;

use pretty_assertions::assert_eq;

use super::*;
use crate::source::SourceLine;

#[test]
fn memory_library_opens_members_by_exact_name() {
    let library = MemoryLibrary::new().with_member("CONSTS", " DECLARE PI CONSTANT(3.14);");
    assert_eq!(library.len(), 1);

    let mut member = library.open_member("CONSTS").unwrap();
    assert_eq!(
        member.next_line().unwrap(),
        SourceLine::Text(" DECLARE PI CONSTANT(3.14);".into())
    );
    assert_eq!(member.next_line().unwrap(), SourceLine::EndOfMember);

    assert!(matches!(
        library.open_member("consts").map(|_| ()),
        Err(SourceError::MemberNotFound { .. })
    ));
}

#[test]
fn directory_library_tries_extension_and_upper_case() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("GUIDANCE.hal"), " X = 1;\n").unwrap();
    let library = DirectoryLibrary::new(dir.path());

    let mut member = library.open_member("guidance").unwrap();
    assert_eq!(member.next_line().unwrap(), SourceLine::Text(" X = 1;".into()));
    assert_eq!(member.next_line().unwrap(), SourceLine::EndOfMember);
}

#[test]
fn directory_library_reports_missing_members() {
    let dir = tempfile::tempdir().unwrap();
    let library = DirectoryLibrary::new(dir.path());
    let err = library.open_member("NOPE").map(|_| ()).unwrap_err();
    assert!(err.to_string().starts_with("member `NOPE` not found in "));
}
