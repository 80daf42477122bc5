use super::*;

fn drain(s: &mut Scheduler<&'static str>, now: u64) -> Vec<&'static str> {
    std::iter::from_fn(|| s.pop_due(now)).collect()
}

#[test]
fn new_scheduler_is_empty() {
    let mut s = Scheduler::<u32>::new();
    assert!(s.is_empty());
    assert_eq!(s.next_deadline(), None);
    assert_eq!(s.now(), 0);
}

#[test]
fn nothing_runs_before_due() {
    let mut s = Scheduler::new();
    s.schedule(100, "a");
    assert_eq!(s.pop_due(99), None);
    assert_eq!(s.now(), 99);
    assert_eq!(s.pop_due(100), Some("a"));
}

#[test]
fn entries_run_in_due_order() {
    let mut s = Scheduler::new();
    s.schedule(300, "c");
    s.schedule(100, "a");
    s.schedule(200, "b");
    assert_eq!(drain(&mut s, 1000), vec!["a", "b", "c"]);
}

#[test]
fn equal_due_times_run_in_schedule_order() {
    let mut s = Scheduler::new();
    s.schedule(50, "first");
    s.schedule(50, "second");
    s.schedule(50, "third");
    assert_eq!(drain(&mut s, 50), vec!["first", "second", "third"]);
}

#[test]
fn clock_moves_to_entry_due_time() {
    let mut s = Scheduler::new();
    s.schedule(100, "a");
    assert_eq!(s.pop_due(500), Some("a"));
    assert_eq!(s.now(), 100);
    // Work scheduled from inside "a" is relative to when "a" was due.
    s.schedule(20, "b");
    assert_eq!(s.next_deadline(), Some(120));
}

#[test]
fn cancel_removes_entry() {
    let mut s = Scheduler::new();
    let a = s.schedule(10, "a");
    s.schedule(20, "b");
    assert!(s.cancel(a));
    assert!(!s.cancel(a));
    assert_eq!(s.len(), 1);
    assert_eq!(s.next_deadline(), Some(20));
    assert_eq!(drain(&mut s, 100), vec!["b"]);
}

#[test]
fn cancel_after_run_is_false() {
    let mut s = Scheduler::new();
    let a = s.schedule(10, "a");
    assert_eq!(s.pop_due(10), Some("a"));
    assert!(!s.cancel(a));
}

#[test]
fn clear_drops_everything() {
    let mut s = Scheduler::new();
    s.schedule(10, "a");
    s.schedule(20, "b");
    s.clear();
    assert!(s.is_empty());
    assert_eq!(drain(&mut s, 10_000), Vec::<&str>::new());
}
