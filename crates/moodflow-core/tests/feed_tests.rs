// Host-side tests for the recent-mood feed, the loopback transport and occupancy.

use moodflow_core::{
    displayed_occupancy, Color, FeedEntry, LoopbackTransport, MoodError, MoodEvent, MoodFeed,
    MoodPublisher, RoomTransport,
};

fn entry(label: &str, timestamp: f64) -> FeedEntry {
    FeedEntry {
        glyph: "🌙".to_string(),
        label: label.to_string(),
        color: Color::new(0x93, 0x70, 0xDB),
        timestamp,
    }
}

#[test]
fn feed_is_newest_first_and_capped() {
    let mut feed = MoodFeed::new(3);
    for i in 0..5 {
        feed.push(entry(&format!("m{i}"), i as f64));
    }
    assert_eq!(feed.len(), 3);
    let labels: Vec<&str> = feed.entries().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, ["m4", "m3", "m2"]);
    assert_eq!(feed.newest().map(|e| e.timestamp), Some(4.0));
    feed.clear();
    assert!(feed.is_empty());
}

#[test]
fn captions_append_vibe() {
    assert_eq!(entry("Calm", 0.0).caption(), "Calm vibe");
}

#[test]
fn loopback_echoes_only_subscribed_channels() {
    let mut t = LoopbackTransport::new();
    let event = MoodEvent {
        label: "Happy".into(),
        color: "#FFD700".into(),
        glyph: "😊".into(),
        timestamp: 3.0,
        originator_id: "user_a".into(),
    };
    t.publish("moodflow_zen", &event).unwrap();
    assert!(t.drain_echoes().is_empty());

    t.subscribe("moodflow_zen").unwrap();
    t.publish("moodflow_zen", &event).unwrap();
    let echoes = t.drain_echoes();
    assert_eq!(echoes.len(), 1);
    assert_eq!(MoodEvent::from_json(&echoes[0]).unwrap(), event);
    assert_eq!(t.published().len(), 2);

    t.unsubscribe("moodflow_zen").unwrap();
    assert!(!t.is_subscribed("moodflow_zen"));
}

#[test]
fn failing_loopback_reports_transport_failure() {
    let mut t = LoopbackTransport::new();
    t.set_failing(true);
    assert!(matches!(t.subscribe("moodflow_x"), Err(MoodError::TransportFailure(_))));
    assert!(t.subscriptions().next().is_none());
}

#[test]
fn occupancy_falls_back_to_this_session() {
    assert_eq!(displayed_occupancy(Some(4.0)), 4);
    assert_eq!(displayed_occupancy(Some(0.0)), 1);
    assert_eq!(displayed_occupancy(Some(f64::NAN)), 1);
    assert_eq!(displayed_occupancy(None), 1);

    let mut t = LoopbackTransport::new();
    assert_eq!(t.occupancy("moodflow_cosmic"), None);
    t.subscribe("moodflow_cosmic").unwrap();
    assert_eq!(displayed_occupancy(t.occupancy("moodflow_cosmic")), 1);
}
