use super::*;
use tokio::time::{sleep, Instant};

fn send(screen: &mut ChatScreen, text: &str) -> ChatMessageId {
    screen.set_draft(text);
    screen
        .send_message()
        .expect("runtime available")
        .expect("non-blank message")
}

#[test]
fn starts_with_the_greeting() {
    let screen = ChatScreen::new();
    assert_eq!(screen.messages().len(), 1);
    assert_eq!(screen.messages()[0].text, GREETING);
    assert!(!screen.messages()[0].from_user);
    assert_eq!(screen.pending_replies(), 0);
}

#[test]
fn time_label_is_hours_and_minutes() {
    let screen = ChatScreen::new();
    let label = screen.messages()[0].time_label();
    assert_eq!(label.len(), 5);
    assert_eq!(&label[2..3], ":");
}

#[test]
fn sending_outside_a_runtime_fails_and_keeps_the_draft() {
    let mut screen = ChatScreen::new();
    screen.set_draft("oi");

    assert!(matches!(screen.send_message(), Err(ChatError::NoRuntime)));
    assert_eq!(screen.draft(), "oi");
    assert_eq!(screen.messages().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn blank_draft_sends_nothing() {
    let mut screen = ChatScreen::new();
    screen.set_draft("   \n");

    assert!(screen.send_message().expect("runtime").is_none());
    assert_eq!(screen.messages().len(), 1);
    assert_eq!(screen.pending_replies(), 0);
    assert!(screen.next_reply().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn reply_arrives_after_the_delay() {
    let mut screen = ChatScreen::new();
    let start = Instant::now();
    send(&mut screen, "Quero uma pizza");

    assert_eq!(screen.draft(), "");
    assert_eq!(screen.messages()[1].text, "Quero uma pizza");
    assert!(screen.messages()[1].from_user);
    assert_eq!(screen.drain_ready_replies(), 0);

    let reply = screen.next_reply().await.expect("reply").clone();

    assert!(start.elapsed() >= DEFAULT_REPLY_DELAY);
    assert_eq!(reply.text, SCRIPTED_REPLY);
    assert!(!reply.from_user);
    assert_eq!(screen.messages().len(), 3);
    assert_eq!(screen.pending_replies(), 0);
    assert!(screen.next_reply().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn second_message_does_not_cancel_the_first_reply() {
    let mut screen = ChatScreen::new();
    send(&mut screen, "primeira");
    sleep(Duration::from_millis(500)).await;
    send(&mut screen, "segunda");
    assert_eq!(screen.pending_replies(), 2);

    assert!(screen.next_reply().await.is_some());
    assert!(screen.next_reply().await.is_some());
    assert!(screen.next_reply().await.is_none());

    let transcript: Vec<(&str, bool)> = screen
        .messages()
        .iter()
        .map(|m| (m.text.as_str(), m.from_user))
        .collect();
    assert_eq!(
        transcript,
        [
            (GREETING, false),
            ("primeira", true),
            ("segunda", true),
            (SCRIPTED_REPLY, false),
            (SCRIPTED_REPLY, false),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn replies_follow_timer_order() {
    let mut screen = ChatScreen::with_reply_delay(Duration::from_secs(3));
    let slow = send(&mut screen, "lenta");
    screen.set_reply_delay(Duration::from_secs(1));
    let fast = send(&mut screen, "rápida");

    screen.next_reply().await.expect("first reply");

    assert_eq!(screen.pending_replies(), 1);
    assert!(screen.cancel_reply(&slow), "slow reply still pending");
    assert!(!screen.cancel_reply(&fast), "fast reply already delivered");
}

#[tokio::test(start_paused = true)]
async fn cancelled_reply_never_arrives() {
    let mut screen = ChatScreen::new();
    let id = send(&mut screen, "cancela");

    assert!(screen.cancel_reply(&id));
    assert!(!screen.cancel_reply(&id));
    assert!(screen.next_reply().await.is_none());

    sleep(Duration::from_secs(2)).await;
    assert_eq!(screen.drain_ready_replies(), 0);
    assert_eq!(screen.messages().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn reply_cancelled_after_firing_is_dropped() {
    let mut screen = ChatScreen::with_reply_delay(Duration::from_millis(10));
    let id = send(&mut screen, "tarde demais");

    sleep(Duration::from_millis(50)).await;
    assert!(screen.cancel_reply(&id));

    assert_eq!(screen.drain_ready_replies(), 0);
    assert_eq!(screen.messages().len(), 2);
}
