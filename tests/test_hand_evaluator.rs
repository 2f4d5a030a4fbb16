use std::cmp::Ordering;

use mc_poker::cards::*;
use mc_poker::error::PokerError;
use mc_poker::hand_evaluator::*;

fn cards(notation: &str) -> Vec<Card> {
    parse_cards(notation).unwrap()
}

fn five(notation: &str) -> HandRank {
    evaluate_five(&cards(notation)).unwrap()
}

fn seven(notation: &str) -> HandRank {
    best_hand(&cards(notation)).unwrap()
}

fn hole(notation: &str) -> [Card; 2] {
    parse_hole_cards(notation).unwrap()
}

fn board(notation: &str) -> [Card; 5] {
    cards(notation).try_into().unwrap()
}

#[test]
fn test_straight_flush() {
    let r = five("9h8h7h6h5h");
    assert_eq!(r.category(), HandCategory::StraightFlush);
    assert_eq!(r.tiebreakers(), &[9]);
}

#[test]
fn test_royal_flush_is_straight_flush_high_ace() {
    let r = five("AsKsQsJsTs");
    assert_eq!(r.category(), HandCategory::StraightFlush);
    assert_eq!(r.category().value(), 8);
    assert_eq!(r.tiebreakers(), &[14]);
}

#[test]
fn test_four_of_a_kind() {
    let r = five("KsKhKdKc5s");
    assert_eq!(r.category(), HandCategory::FourOfAKind);
    assert_eq!(r.tiebreakers(), &[13, 5]);
}

#[test]
fn test_full_house() {
    let r = five("3s3h3dAsAh");
    assert_eq!(r.category(), HandCategory::FullHouse);
    assert_eq!(r.tiebreakers(), &[3, 14]);
}

#[test]
fn test_flush() {
    let r = five("As8sTs5s2s");
    assert_eq!(r.category(), HandCategory::Flush);
    assert_eq!(r.tiebreakers(), &[14, 10, 8, 5, 2]);
}

#[test]
fn test_straight() {
    let r = five("9s8h7d6c5s");
    assert_eq!(r.category(), HandCategory::Straight);
    assert_eq!(r.tiebreakers(), &[9]);
}

#[test]
fn test_broadway_straight() {
    let r = five("AsKhQdJcTs");
    assert_eq!(r.category(), HandCategory::Straight);
    assert_eq!(r.tiebreakers(), &[14]);
}

#[test]
fn test_three_of_a_kind() {
    let r = five("QsQhQd2c7d");
    assert_eq!(r.category(), HandCategory::ThreeOfAKind);
    assert_eq!(r.tiebreakers(), &[12, 7, 2]);
}

#[test]
fn test_two_pair() {
    let r = five("5sAhKdAsKs");
    assert_eq!(r.category(), HandCategory::TwoPair);
    assert_eq!(r.tiebreakers(), &[14, 13, 5]);
}

#[test]
fn test_one_pair() {
    let r = five("AsAhKd7s5d");
    assert_eq!(r.category(), HandCategory::OnePair);
    assert_eq!(r.tiebreakers(), &[14, 13, 7, 5]);
}

#[test]
fn test_high_card() {
    let r = five("As9hKd3c5d");
    assert_eq!(r.category(), HandCategory::HighCard);
    assert_eq!(r.tiebreakers(), &[14, 13, 9, 5, 3]);
}

#[test]
fn test_wheel_straight_flush_plays_ace_low() {
    let r = five("As2s3s4s5s");
    assert_eq!(r.category(), HandCategory::StraightFlush);
    assert_eq!(r.tiebreakers(), &[5]);
}

#[test]
fn test_wheel_straight_plays_ace_low() {
    let r = five("As2h3d4c5s");
    assert_eq!(r.category(), HandCategory::Straight);
    assert_eq!(r.tiebreakers(), &[5]);
    assert!(five("2s3h4d5c6s") > r);
}

#[test]
fn test_no_wraparound_straight() {
    assert_eq!(five("QsKhAd2c3s").category(), HandCategory::HighCard);
}

#[test]
fn test_straight_flush_needs_both_conditions() {
    // suited but not connected, connected but not suited
    assert_eq!(five("As9s7s4s2s").category(), HandCategory::Flush);
    assert_eq!(five("9s8s7s6s5h").category(), HandCategory::Straight);
}

#[test]
fn test_wrong_size_rejected() {
    assert!(matches!(
        evaluate_five(&cards("AsKs")),
        Err(PokerError::InvalidHandSize { expected: 5, got: 2 })
    ));
    assert!(matches!(
        best_hand(&cards("AsKsQsJsTs")),
        Err(PokerError::InvalidHandSize { expected: 7, got: 5 })
    ));
}

#[test]
fn test_seven_royal_flush() {
    let r = seven("AsKsQsJsTs2h3d");
    assert_eq!(r.category(), HandCategory::StraightFlush);
    assert_eq!(r.tiebreakers(), &[14]);
}

#[test]
fn test_seven_straight_beats_pair() {
    let r = seven("9s9h8d7c6s5hKd");
    assert_eq!(r.category(), HandCategory::Straight);
    assert_eq!(r.tiebreakers(), &[9]);
}

#[test]
fn test_seven_picks_highest_straight() {
    let r = seven("9s8h7d6c5s4hTd");
    assert_eq!(r.category(), HandCategory::Straight);
    assert_eq!(r.tiebreakers(), &[10]);
}

#[test]
fn test_seven_full_house_from_two_trips() {
    let r = seven("KsKhKd7s7h7dAc");
    assert_eq!(r.category(), HandCategory::FullHouse);
    assert_eq!(r.tiebreakers(), &[13, 7]);
}

#[test]
fn test_seven_best_kickers() {
    let r = seven("AsAh2d3c9sKdQh");
    assert_eq!(r.category(), HandCategory::OnePair);
    assert_eq!(r.tiebreakers(), &[14, 13, 12, 9]);
}

#[test]
fn test_seven_flush_uses_top_five_suited() {
    let r = seven("As9s7s4s2sKsQh");
    assert_eq!(r.category(), HandCategory::Flush);
    assert_eq!(r.tiebreakers(), &[14, 13, 9, 7, 4]);
}

#[test]
fn test_seven_order_independent() {
    assert_eq!(seven("2h3dAsKsQsJsTs"), seven("AsKsQsJsTs2h3d"));
}

#[test]
fn test_category_dominates_tiebreakers() {
    let high = HandRank::new(HandCategory::HighCard, &[14, 13, 12, 11, 9]);
    let pair = HandRank::new(HandCategory::OnePair, &[2, 5, 4, 3]);
    assert!(pair > high);
}

#[test]
fn test_kicker_decides() {
    let h1 = HandRank::new(HandCategory::OnePair, &[14, 13, 12, 11]);
    let h2 = HandRank::new(HandCategory::OnePair, &[14, 13, 12, 10]);
    assert!(h1 > h2);
}

#[test]
fn test_order_is_total_and_consistent() {
    let hands: Vec<HandRank> = [
        "9h8h7h6h5h", "KsKhKdKc5s", "3s3h3dAsAh", "As8sTs5s2s", "9s8h7d6c5s",
        "As2h3d4c5s", "QsQhQd2c7d", "5sAhKdAsKs", "AsAhKd7s5d", "AsAhKd7s4d",
        "As9hKd3c5d", "As9hKd3c4d", "Ad9cKh3s5c",
    ]
    .iter()
    .map(|n| five(n))
    .collect();

    for a in &hands {
        for b in &hands {
            assert_eq!(a.cmp(b), b.cmp(a).reverse());
            assert_eq!(a.cmp(b) == Ordering::Equal, a == b);
            for c in &hands {
                if a > b && b > c {
                    assert!(a > c);
                }
            }
        }
    }
}

#[test]
fn test_suits_never_break_ties() {
    assert_eq!(five("As9hKd3c5d"), five("Ad9cKh3s5c"));
}

#[test]
fn test_flush_beats_straight() {
    assert_eq!(
        showdown(&hole("As2s"), &hole("8h9h"), &board("7s6s5s4dAh")),
        Ordering::Greater
    );
}

#[test]
fn test_higher_pair_wins() {
    assert_eq!(
        showdown(&hole("AsAh"), &hole("KsKh"), &board("2s5d8cTh3d")),
        Ordering::Greater
    );
}

#[test]
fn test_kicker_decides_showdown() {
    assert_eq!(
        showdown(&hole("AdKh"), &hole("AhQd"), &board("As5d8cTh3d")),
        Ordering::Greater
    );
}

#[test]
fn test_board_plays_tie() {
    assert_eq!(
        showdown(&hole("2h3d"), &hole("4h5d"), &board("AsKdQhJsTs")),
        Ordering::Equal
    );
}

#[test]
fn test_two_pair_kicker() {
    assert_eq!(
        showdown(&hole("Kh3c"), &hole("Qh3d"), &board("AsAd5s5d2c")),
        Ordering::Greater
    );
}

#[test]
fn test_royal_beats_low_pair() {
    assert_eq!(
        showdown(&hole("AsKs"), &hole("2s3s"), &board("QsJsTs2h3d")),
        Ordering::Greater
    );
}
