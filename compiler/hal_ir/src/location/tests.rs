use super::*;

#[test]
fn add_assigns_sequential_ids() {
    let mut map = SourceMap::new();
    let main = map.add("flight.hal", SourceKind::Primary);
    let member = map.add("NAVCONST", SourceKind::Member);

    assert_eq!(main, SourceId::new(0));
    assert_eq!(member, SourceId::new(1));
    assert_eq!(map.len(), 2);
    assert_eq!(map.name(member), "NAVCONST");
    assert_eq!(map.kind(member), Some(SourceKind::Member));
}

#[test]
fn describe_includes_source_name() {
    let mut map = SourceMap::new();
    let id = map.add("flight.hal", SourceKind::Primary);

    assert_eq!(map.describe(Location::new(id, 12, 7)), "flight.hal:12:7");
    assert_eq!(map.describe(Location::synthetic(1, 3)), "<macro text>:1:3");
}

#[test]
fn unknown_ids_do_not_panic() {
    let map = SourceMap::new();
    assert_eq!(map.name(SourceId::new(5)), "<unknown>");
    assert_eq!(map.kind(SourceId::new(5)), None);
    assert!(map.is_empty());
}

#[test]
fn locations_order_by_source_then_position() {
    let a = Location::new(SourceId::new(0), 3, 9);
    let b = Location::new(SourceId::new(0), 4, 1);
    assert!(a < b);
    assert_eq!(a.with_column(1).column, 1);
}
