// tests/movement.rs
//
// Movement classification against a previous snapshot, per the published
// rules: NEW for debuts, SURGE/DROP past the five-place noise band, silence
// inside it.

use std::collections::HashMap;

use rankland::delta::{analyze, MovementInsight};

fn previous(pairs: &[(&str, u32)]) -> HashMap<String, u32> {
    pairs.iter().map(|(t, r)| (t.to_string(), *r)).collect()
}

#[test]
fn classification_examples() {
    let current = vec![
        ("Climber".to_string(), 3),
        ("Newcomer".to_string(), 4),
        ("Slider".to_string(), 9),
        ("Stable".to_string(), 2),
    ];
    let prev = previous(&[("Climber", 20), ("Slider", 3), ("Stable", 5)]);

    let got = analyze(&current, &prev);
    assert_eq!(got.len(), 3);

    assert_eq!(got[0].title, "Climber");
    assert_eq!(got[0].insight, MovementInsight::Surge(17));

    assert_eq!(got[1].title, "Newcomer");
    assert_eq!(got[1].insight, MovementInsight::New);

    assert_eq!(got[2].title, "Slider");
    assert_eq!(got[2].insight, MovementInsight::Drop(6));
}

#[test]
fn drop_magnitude_counts_places_fallen() {
    let current = vec![("Faller".to_string(), 15)];
    let got = analyze(&current, &previous(&[("Faller", 3)]));
    assert_eq!(got[0].insight, MovementInsight::Drop(12));
}

#[test]
fn five_places_is_still_noise_in_both_directions() {
    let current = vec![("Up5".to_string(), 1), ("Down5".to_string(), 8)];
    let prev = previous(&[("Up5", 6), ("Down5", 3)]);
    assert!(analyze(&current, &prev).is_empty());
}

#[test]
fn first_run_marks_the_whole_top_ten_new() {
    let current: Vec<(String, u32)> = (1..=10)
        .map(|i| (format!("Song {i}"), i))
        .collect();
    let got = analyze(&current, &HashMap::new());
    assert_eq!(got.len(), 10);
    assert!(got.iter().all(|m| m.insight == MovementInsight::New));
}

#[test]
fn descriptions_read_naturally() {
    assert_eq!(
        MovementInsight::Surge(17).describe("Climber", 3),
        "Climber: surges 17 places up to #3"
    );
    assert_eq!(
        MovementInsight::Drop(12).describe("Faller", 15),
        "Faller: drops 12 places down to #15"
    );
    assert_eq!(
        MovementInsight::New.describe("Newcomer", 4),
        "Newcomer: debuts at #4 (NEW)"
    );
}
