use super::*;
use rand::{rngs::StdRng, SeedableRng};

const GENERATED: &str = "(Rome was founded in 1066 AD. @ False) | (Rome sits on the Tiber. @ True) | \
(The Pantheon is in Rome. @ True) | (Rome is the capital of Italy. @ True)";

#[test]
fn parses_pipe_separated_statements() {
    let facts = parse_statements(GENERATED);
    assert_eq!(
        facts,
        vec![
            Fact::new("Rome was founded in 1066 AD.", false),
            Fact::new("Rome sits on the Tiber.", true),
            Fact::new("The Pantheon is in Rome.", true),
            Fact::new("Rome is the capital of Italy.", true),
        ]
    );
}

#[test]
fn skips_malformed_items() {
    let raw = "\n(no verdict here) | (two @ signs @ True) | ( @ True) | (kept @ TRUE)\n";
    assert_eq!(parse_statements(raw), vec![Fact::new("kept", true)]);
}

#[test]
fn unknown_verdict_counts_as_false() {
    let facts = parse_statements("(maybe @ Perhaps)");
    assert_eq!(facts, vec![Fact::new("maybe", false)]);
}

#[test]
fn fake_index_points_at_first_false_statement() {
    let facts = vec![
        Fact::new("a", true),
        Fact::new("b", false),
        Fact::new("c", false),
    ];
    assert_eq!(fake_index(&facts), Some(1));
    assert_eq!(fake_index(&[Fact::new("a", true)]), None);
}

#[test]
fn shuffle_keeps_exactly_one_fake_and_index_tracks_it() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..16 {
        let mut facts = parse_statements(GENERATED);
        shuffle_facts(&mut facts, &mut rng);

        assert_eq!(facts.len(), 4);
        assert_eq!(facts.iter().filter(|fact| !fact.is_true).count(), 1);
        let index = fake_index(&facts).expect("fake");
        assert_eq!(facts[index].text, "Rome was founded in 1066 AD.");
    }
}
