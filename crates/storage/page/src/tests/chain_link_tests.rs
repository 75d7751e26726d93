use crate::impls::Page;

#[test]
fn a_fresh_page_has_no_next_page() {
    let page = Page::test_empty_heap();
    assert_eq!(page.next_page().unwrap(), None);
}

#[test]
fn next_page_round_trips_through_the_header() {
    let mut page = Page::test_empty_heap();

    page.set_next_page(Some(7)).unwrap();
    assert_eq!(page.next_page().unwrap(), Some(7));

    page.set_next_page(None).unwrap();
    assert_eq!(page.next_page().unwrap(), None);
}

#[test]
fn setting_the_link_does_not_disturb_records() {
    let mut page = Page::test_empty_heap();
    let slot_no = page.insert_row(&[5u8; 40]).unwrap();

    page.set_next_page(Some(3)).unwrap();

    assert_eq!(page.row(slot_no).unwrap(), &[5u8; 40]);
    assert_eq!(page.next_page().unwrap(), Some(3));
}
