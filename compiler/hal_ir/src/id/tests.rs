use super::*;

#[test]
fn from_index_rejects_values_that_do_not_fit() {
    assert_eq!(SymbolId::from_index(12), Some(SymbolId::new(12)));
    assert_eq!(SymbolId::from_index(usize::from(u16::MAX) + 1), None);
    assert_eq!(StateId::from_index(70_000), None);
}

#[test]
fn debug_output_names_the_index_kind() {
    assert_eq!(format!("{:?}", SymbolId::new(9)), "sym#9");
    assert_eq!(format!("{:?}", StateId::new(0)), "state#0");
    assert_eq!(format!("{:?}", ProductionId::new(4)), "prod#4");
    assert_eq!(format!("{}", ProductionId::new(4)), "4");
}

#[test]
fn synthetic_source_is_distinct_from_registered_ids() {
    assert!(SourceId::SYNTHETIC.is_synthetic());
    assert!(!SourceId::new(0).is_synthetic());
}

#[test]
fn ids_order_by_raw_value() {
    let mut ids = vec![SymbolId::new(3), SymbolId::new(1), SymbolId::new(2)];
    ids.sort();
    assert_eq!(ids, vec![SymbolId::new(1), SymbolId::new(2), SymbolId::new(3)]);
}
