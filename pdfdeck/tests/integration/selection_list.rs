//! The ordered selection list through the public API.

use pdfdeck::{ItemId, OrderedSelectionList, PdfDeckError};
use rstest::rstest;

fn list_of(n: usize) -> (OrderedSelectionList<usize>, Vec<ItemId>) {
    let mut list = OrderedSelectionList::new();
    let ids = (0..n).map(|i| list.insert(i)).collect();
    (list, ids)
}

fn payloads(list: &OrderedSelectionList<usize>) -> Vec<usize> {
    list.iter().map(|entry| entry.payload).collect()
}

#[test]
fn test_selection_follows_moved_items() {
    let mut list: OrderedSelectionList<&str> = OrderedSelectionList::new();
    let x = list.insert("X");
    let y = list.insert("Y");
    let z = list.insert("Z");

    list.select(y).unwrap();
    list.select(z).unwrap();
    list.move_to_position(x, 2).unwrap();

    let order: Vec<&str> = list.iter().map(|entry| entry.payload).collect();
    assert_eq!(order, vec!["Y", "Z", "X"]);
    assert_eq!(list.selected_ids(), vec![y, z]);
    assert_eq!(list.selected_positions(), vec![0, 1]);
}

#[rstest]
#[case(0, 3, vec![1, 2, 3, 0])]
#[case(3, 0, vec![3, 0, 1, 2])]
#[case(1, 99, vec![0, 2, 3, 1])]
#[case(2, 2, vec![0, 1, 2, 3])]
fn test_move_to_position_clamps(
    #[case] from: usize,
    #[case] to: usize,
    #[case] expected: Vec<usize>,
) {
    let (mut list, ids) = list_of(4);

    let landed = list.move_to_position(ids[from], to).unwrap();

    assert_eq!(payloads(&list), expected);
    assert_eq!(landed, to.min(3));
}

#[rstest]
#[case(0, -1, vec![0, 1, 2])]
#[case(2, 1, vec![0, 1, 2])]
#[case(0, 1, vec![1, 0, 2])]
#[case(2, -5, vec![2, 0, 1])]
fn test_move_by_offset_stops_at_edges(
    #[case] from: usize,
    #[case] delta: isize,
    #[case] expected: Vec<usize>,
) {
    let (mut list, ids) = list_of(3);
    list.select(ids[from]).unwrap();

    list.move_by_offset(ids[from], delta).unwrap();

    assert_eq!(payloads(&list), expected);
    assert_eq!(list.selected_ids(), vec![ids[from]]);
}

#[test]
fn test_reorder_keeps_selection_and_rejects_bad_orders() {
    let (mut list, ids) = list_of(3);
    list.select(ids[0]).unwrap();

    list.reorder_by_permutation(&[ids[2], ids[0], ids[1]]).unwrap();
    assert_eq!(payloads(&list), vec![2, 0, 1]);
    assert_eq!(list.selected_positions(), vec![1]);

    let before = list.snapshot();
    for bad in [
        vec![ids[0], ids[1]],
        vec![ids[0], ids[0], ids[1]],
        vec![ids[0], ids[1], ItemId::from_raw(42)],
    ] {
        assert!(matches!(
            list.reorder_by_permutation(&bad),
            Err(PdfDeckError::InvalidPermutation { .. })
        ));
        assert_eq!(list.snapshot(), before);
    }
}

#[test]
fn test_removed_identity_is_gone_everywhere() {
    let (mut list, ids) = list_of(3);
    list.select_all();

    list.remove(ids[1]).unwrap();

    assert_eq!(list.selected_ids(), vec![ids[0], ids[2]]);
    assert!(matches!(
        list.select(ids[1]),
        Err(PdfDeckError::NotFound { .. })
    ));
    assert!(matches!(
        list.remove(ids[1]),
        Err(PdfDeckError::NotFound { .. })
    ));

    let fresh = list.insert(7);
    assert!(!ids.contains(&fresh));
}

#[test]
fn test_toggle_twice_is_identity() {
    let (mut list, ids) = list_of(2);
    let before = list.snapshot();

    assert!(list.toggle_select(ids[1]).unwrap());
    assert!(!list.toggle_select(ids[1]).unwrap());

    assert_eq!(list.snapshot(), before);
}
