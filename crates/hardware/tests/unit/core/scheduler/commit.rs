//! Commit: in-order retirement into the committed register file.

use pretty_assertions::assert_eq;

use o3sim_core::{CapabilityMask, SlotTag};

use crate::common::{add, li, scheduler};

#[test]
fn test_out_of_order_completion_commits_in_order() {
    let mut s = scheduler(4, &[]);
    let tags: Vec<SlotTag> = (0..3).map(|i| s.dispatch(&li(i + 1, 10 * i as i64)).unwrap()).collect();
    for _ in 0..3 {
        let _ = s.issue(CapabilityMask::ALL).unwrap();
    }

    s.complete(tags[2], 20).unwrap();
    s.complete(tags[1], 10).unwrap();
    assert_eq!(s.commit(), None, "head not complete");
    assert_eq!(s.registers().values()[1..4], [0, 0, 0]);

    s.complete(tags[0], 0).unwrap();
    let order: Vec<u64> = std::iter::from_fn(|| s.commit()).map(|r| r.seq).collect();
    assert_eq!(order, vec![0, 1, 2]);
    assert_eq!(s.registers().values()[1..4], [0, 10, 20]);
}

#[test]
fn test_commit_on_empty_window() {
    let mut s = scheduler(2, &[]);
    assert_eq!(s.commit(), None);
}

#[test]
fn test_commit_reports_destination_and_value() {
    let mut s = scheduler(2, &[(1, 2)]);
    let tag = s.dispatch(&add(5, 1, 1)).unwrap();
    let _ = s.issue(CapabilityMask::ALL).unwrap();
    s.complete(tag, 4).unwrap();

    let retired = s.commit().unwrap();
    assert_eq!(retired.tag, tag);
    assert_eq!(retired.rd, Some(5));
    assert_eq!(retired.value, 4);
    assert_eq!(s.committed(5), 4);
    assert_eq!(s.rat().producer(5), None);
}

#[test]
fn test_write_to_zero_register_is_discarded() {
    let mut s = scheduler(2, &[]);
    let tag = s.dispatch(&li(0, 77)).unwrap();
    let _ = s.issue(CapabilityMask::ALL).unwrap();
    s.complete(tag, 77).unwrap();
    let retired = s.commit().unwrap();
    assert_eq!(retired.rd, None);
    assert_eq!(s.committed(0), 0);
}

#[test]
fn test_older_commit_keeps_younger_rename() {
    let mut s = scheduler(4, &[]);
    let w1 = s.dispatch(&li(1, 1)).unwrap();
    let w2 = s.dispatch(&li(1, 2)).unwrap();
    let _ = s.issue(CapabilityMask::ALL).unwrap();
    s.complete(w1, 1).unwrap();
    let _ = s.commit().unwrap();

    assert_eq!(s.rat().producer(1), Some(w2));
    let reader = s.dispatch(&add(2, 1, 1)).unwrap();
    assert!(s.matrix().waits_on(reader, w2));
}

#[test]
fn test_head_wraps_around_window() {
    let mut s = scheduler(2, &[]);
    for i in 0..5 {
        let tag = s.dispatch(&li(1, i)).unwrap();
        assert_eq!(tag, SlotTag((i % 2) as u32));
        let _ = s.issue(CapabilityMask::ALL).unwrap();
        s.complete(tag, i as u64).unwrap();
        assert_eq!(s.commit().map(|r| r.seq), Some(i as u64));
    }
    assert_eq!(s.committed(1), 4);
    assert!(s.is_empty());
}
