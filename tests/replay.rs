use helpers::sequences::TestSequence;
use kth_heap_replay::{
    base::HeapValue, simulate, InputPosition, ReplayCursor, SimulationOptions, StepAction,
    StepLog, StepLogViolation,
};
use rstest::rstest;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn example_log() -> StepLog<HeapValue> {
    simulate(&[3, 1, 5, 12, 2, 11], 3, &SimulationOptions::default())
        .expect("Error while simulating")
}

#[test]
fn test_cursor_walk() {
    init_logger();
    let log = example_log();
    let mut cursor = log.cursor();
    assert_eq!(cursor.current().action, StepAction::Start);
    assert!(cursor.current().heap.is_empty());

    for _ in 0..log.len() - 1 {
        cursor.advance();
    }
    cursor.retreat();
    assert_eq!(cursor.current(), &log.steps()[log.len() - 2]);
}

#[test]
fn test_cursor_ends_are_noops() {
    let log = example_log();
    let mut cursor = log.cursor();

    assert!(!cursor.retreat());
    assert_eq!(cursor.position(), 0);

    cursor.fast_forward();
    let last = cursor.current().clone();
    assert!(!cursor.advance());
    assert_eq!(cursor.current(), &last);
    assert!(matches!(last.action, StepAction::Done { kth_largest: 5 }));
}

#[test]
fn test_back_and_forth() {
    let log = example_log();
    let mut cursor = log.cursor();
    let mut visited = vec![cursor.current().clone()];
    while cursor.advance() {
        visited.push(cursor.current().clone());
    }
    assert_eq!(visited.len(), log.len());

    // Walking back gives the same steps
    for expected in visited.iter().rev().skip(1) {
        assert!(cursor.retreat());
        assert_eq!(cursor.current(), expected);
    }
    assert!(cursor.is_at_start());
}

#[test]
fn test_snapshots_are_not_shared() {
    let log = example_log();

    // Node 1 (value 1) is the root after its insertion, and is gone later on
    let step = &log.steps()[2];
    assert_eq!(step.heap[0].id, 1);
    assert!(log.last().unwrap().position_of(1).is_none());

    // Replaying the whole log does not alter earlier snapshots
    let copy = log.clone();
    let mut cursor = ReplayCursor::new(&log);
    while cursor.advance() {}
    assert_eq!(copy, log);
}

#[test]
fn test_input_positions() {
    let log = example_log();
    assert_eq!(log.first().unwrap().index, InputPosition::Start);
    assert_eq!(log.last().unwrap().index, InputPosition::End);

    for step in log.iter() {
        if let StepAction::Add { added, .. } = step.action {
            match step.index {
                InputPosition::Element(ix) => assert_eq!(log.input()[ix], added),
                other => panic!("Add step at {:?}", other),
            }
        }
    }
}

#[rstest]
#[case(10, 100, Some(11))]
#[case(30, 5, Some(12))]
fn test_json_hand_off(
    #[case] length: usize,
    #[case] max_value: HeapValue,
    #[case] seed: Option<u64>,
) {
    let sequence = TestSequence::new(length, max_value, seed);
    let log = simulate(&sequence.values, sequence.k, &SimulationOptions::default()).unwrap();

    let mut buffer = Vec::new();
    log.write_json(&mut buffer).unwrap();
    let json = String::from_utf8(buffer).unwrap();

    let back = StepLog::<HeapValue>::from_json(&json).unwrap();
    assert_eq!(back, log);
    assert_eq!(back.validate(), Ok(()));
}

#[test]
fn test_tampered_json() {
    let log = example_log();
    let mut json: serde_json::Value = serde_json::from_str(&log.to_json().unwrap()).unwrap();

    // The second add claims the ID of the first one
    json["steps"][2]["added_node_id"] = 0.into();
    json["steps"][2]["heap"][0]["id"] = 0.into();

    let tampered = StepLog::<HeapValue>::from_json(&json.to_string()).unwrap();
    assert_eq!(
        tampered.validate(),
        Err(StepLogViolation::ReusedId { step: 2, id: 0 })
    );
}
