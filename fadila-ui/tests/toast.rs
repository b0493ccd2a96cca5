use std::time::{Duration, Instant};

use fadila_ui::toast::{Toast, ToastLevel, ToastPhase, ToastQueue};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn test_toast_lifecycle() {
    let start = Instant::now();
    let mut queue = ToastQueue::new();
    let id = queue.push(Toast::success("Enregistré"), start);

    assert_eq!(queue.phase(id, start + ms(2_900)), Some(ToastPhase::Visible));
    assert_eq!(queue.phase(id, start + ms(3_100)), Some(ToastPhase::Exiting));
    assert!(queue.tick(start + ms(3_100)).is_empty());
    assert_eq!(queue.tick(start + ms(3_200)), vec![id]);
    assert!(queue.is_empty());
}

#[test]
fn test_toasts_expire_independently() {
    let start = Instant::now();
    let mut queue = ToastQueue::new();
    let first = queue.push("un", start);
    let second = queue.push(Toast::error("deux"), start + ms(1_000));

    assert_eq!(queue.tick(start + ms(3_250)), vec![first]);
    let active = queue.active(start + ms(3_250));
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].0, second);
    assert_eq!(active[0].1.level, ToastLevel::Error);
}

#[test]
fn test_close_starts_exit() {
    let start = Instant::now();
    let mut queue = ToastQueue::new();
    let id = queue.push("bonjour", start);

    assert!(queue.close(id, start + ms(500)));
    assert_eq!(queue.phase(id, start + ms(600)), Some(ToastPhase::Exiting));
    assert!(!queue.close(id, start + ms(600)));
    assert_eq!(queue.tick(start + ms(700)), vec![id]);
}

#[test]
fn test_next_deadline() {
    let start = Instant::now();
    let mut queue = ToastQueue::new();
    assert_eq!(queue.next_deadline(start), None);

    queue.push("a", start);
    assert_eq!(queue.next_deadline(start), Some(start + ms(3_000)));
    assert_eq!(queue.next_deadline(start + ms(3_000)), Some(start + ms(3_200)));
}
