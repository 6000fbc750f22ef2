use keypad_clock::render::{render_at, Phase};
use keypad_clock::segment::{segment_containing, SEGMENTS, TOTAL_WIDTH};
use keypad_clock::{ClockProvider, DateTime, EditSession, FieldKind, Key, SoftClock};

const START: DateTime = DateTime::new(12, 34, 56, 15, 6, 2024);

fn clock() -> SoftClock {
    SoftClock::new(&START).unwrap()
}

fn press(session: &mut EditSession, clock: &mut SoftClock, keys: &str) {
    for symbol in keys.chars() {
        session.handle_key(Key::from(symbol), clock);
    }
}

fn check_invariants(session: &EditSession) {
    assert!(session.cursor() <= TOTAL_WIDTH);
    if session.is_active() {
        let index = segment_containing(session.cursor()).expect("cursor inside a segment");
        assert!(session.pending().len() <= SEGMENTS[index].width);
    } else {
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.pending(), "");
    }
}

#[test]
fn invariants_hold_for_every_short_key_sequence() {
    const ALPHABET: [char; 6] = ['#', '0', '1', '3', '9', '*'];
    const LEN: u32 = 6;

    for n in 0..ALPHABET.len().pow(LEN) {
        let mut session = EditSession::new();
        let mut c = clock();
        let mut rest = n;
        for _ in 0..LEN {
            let symbol = ALPHABET[rest % ALPHABET.len()];
            rest /= ALPHABET.len();
            session.handle_key(Key::from(symbol), &mut c);
            check_invariants(&session);
        }
    }
}

#[test]
fn skipping_through_every_field_visits_each_start_once() {
    let mut session = EditSession::new();
    let mut c = clock();

    press(&mut session, &mut c, "#");
    let mut visited = vec![session.cursor()];
    for _ in 0..5 {
        press(&mut session, &mut c, "#");
        assert!(session.is_active());
        visited.push(session.cursor());
    }
    let starts: Vec<usize> = SEGMENTS.iter().map(|seg| seg.start).collect();
    assert_eq!(visited, starts);

    press(&mut session, &mut c, "#");
    assert!(!session.is_active());
    assert_eq!(session.cursor(), 0);
    assert_eq!(DateTime::read(&c), START);
}

#[test]
fn typing_every_field_sets_the_whole_clock() {
    let mut session = EditSession::new();
    let mut c = clock();
    press(&mut session, &mut c, "#07153024122030");
    assert!(!session.is_active());
    assert_eq!(DateTime::read(&c), DateTime::new(7, 15, 30, 24, 12, 2030));
    assert_eq!(c.field(FieldKind::Weekday), 3);
}

#[test]
fn hour_entry_commits_and_moves_to_minutes() {
    let mut session = EditSession::new();
    let mut c = clock();
    press(&mut session, &mut c, "#13");
    assert_eq!(c.field(FieldKind::Hour), 13);
    assert_eq!(session.cursor(), SEGMENTS[1].start);
    assert_eq!(session.pending(), "");
}

#[test]
fn earlier_commits_survive_a_later_rejection() {
    let mut session = EditSession::new();
    let mut c = clock();
    press(&mut session, &mut c, "#08");
    press(&mut session, &mut c, "###");
    assert_eq!(session.cursor(), SEGMENTS[4].start);

    press(&mut session, &mut c, "19");
    assert_eq!(DateTime::read(&c), DateTime::new(8, 34, 56, 15, 6, 2024));
    assert_eq!(session.cursor(), SEGMENTS[4].start);

    press(&mut session, &mut c, "09");
    assert_eq!(c.field(FieldKind::Month), 9);
    assert_eq!(session.cursor(), SEGMENTS[5].start);
}

#[test]
fn rejected_day_restores_every_field() {
    let mut session = EditSession::new();
    let mut c = clock();
    press(&mut session, &mut c, "####");
    c.advance(3_000);
    press(&mut session, &mut c, "3");
    let snapshot = DateTime::read(&c);
    press(&mut session, &mut c, "1");
    // June has 30 days: 31/06 reads back as 01/07
    assert_eq!(DateTime::read(&c), snapshot);
    assert_eq!(session.cursor(), SEGMENTS[3].start);
    assert_eq!(session.pending(), "");
}

#[test]
fn unedited_fields_follow_the_running_clock() {
    let mut session = EditSession::new();
    let mut c = clock();
    press(&mut session, &mut c, "#");
    c.advance(5_000);
    press(&mut session, &mut c, "10");
    assert_eq!(DateTime::read(&c), DateTime::new(10, 35, 1, 15, 6, 2024));
}

#[test]
fn year_needs_four_digits() {
    let mut session = EditSession::new();
    let mut c = clock();
    press(&mut session, &mut c, "######0025");
    // 25 is stored as 2025 and so does not read back
    assert_eq!(c.field(FieldKind::Year), 2024);
    assert!(session.is_active());
    assert_eq!(session.cursor(), SEGMENTS[5].start);

    press(&mut session, &mut c, "2025");
    assert_eq!(c.field(FieldKind::Year), 2025);
    assert!(!session.is_active());
}

#[test]
fn flash_only_blanks_the_edited_field() {
    let mut session = EditSession::new();
    let mut c = clock();
    press(&mut session, &mut c, "##");

    let blank = Phase {
        field_blank: true,
        colon_blank: false,
    };
    let frame = render_at(&session, &c, blank);
    assert_eq!(frame.line().as_str(), "12:  :56  15/06/2024");

    let lit = Phase {
        field_blank: false,
        colon_blank: true,
    };
    let frame = render_at(&session, &c, lit);
    assert_eq!(frame.line().as_str(), "12:34 56  15/06/2024");

    press(&mut session, &mut c, "5");
    let frame = render_at(&session, &c, lit);
    assert_eq!(frame.line().as_str(), "12:5  56  15/06/2024");
}

#[test]
fn separator_blink_is_independent_of_edit_mode() {
    let mut c = clock();
    let idle = EditSession::new();
    let mut editing = EditSession::new();
    editing.handle_key(Key::Advance, &mut c);

    for millis in [0, 999, 1_000, 1_001, 1_999, 2_000, 3_500] {
        let phase = Phase::at(millis);
        assert_eq!(phase.colon_blank, millis % 2_000 > 1_000);
        assert_eq!(render_at(&idle, &c, phase).colon_blank, phase.colon_blank);
        assert_eq!(render_at(&editing, &c, phase).colon_blank, phase.colon_blank);
    }
}
