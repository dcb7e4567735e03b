use bpims_core::entry::{append_digit, backspace, Ceiling};
use bpims_core::quantity::{EntryMode, Quantity};
use bpims_core::types::StockScope;
use bpims_core::{KeypadKey, QuantityEntryController};
use proptest::prelude::*;

fn digit_strategy() -> impl Strategy<Value = char> {
    (0u32..10).prop_map(|d| char::from_digit(d, 10).unwrap_or('0'))
}

fn mode_strategy() -> impl Strategy<Value = EntryMode> {
    prop_oneof![Just(EntryMode::Unit), Just(EntryMode::Decimal)]
}

fn scope_strategy() -> impl Strategy<Value = StockScope> {
    prop_oneof![Just(StockScope::Branch), Just(StockScope::Warehouse)]
}

proptest! {
    #[test]
    fn unit_entry_parses_like_the_typed_digits(digits in proptest::collection::vec(digit_strategy(), 1..13)) {
        let mut buffer = String::new();
        for &d in &digits {
            let outcome = append_digit(&buffer, d, EntryMode::Unit, None);
            prop_assert!(outcome.accepted);
            buffer = outcome.buffer;
        }

        let typed: String = digits.iter().collect();
        let expected = typed.parse::<i64>().unwrap();
        prop_assert_eq!(Quantity::parse(&buffer), Quantity::from_units(expected));
        prop_assert_eq!(buffer, expected.to_string());
    }

    #[test]
    fn decimal_backspace_undoes_append(
        start in 0i64..1_000_000,
        digits in proptest::collection::vec(digit_strategy(), 0..9),
    ) {
        let original = Quantity::from_hundredths(start).format(EntryMode::Decimal);
        let mut buffer = original.clone();
        for &d in &digits {
            let outcome = append_digit(&buffer, d, EntryMode::Decimal, None);
            prop_assert!(outcome.accepted);
            buffer = outcome.buffer;
        }
        for _ in &digits {
            buffer = backspace(&buffer, EntryMode::Decimal);
        }
        prop_assert_eq!(buffer, original);
    }

    #[test]
    fn entry_never_exceeds_ceiling(
        limit in 0i64..10_000_000,
        mode in mode_strategy(),
        scope in scope_strategy(),
        digits in proptest::collection::vec(digit_strategy(), 0..20),
    ) {
        let ceiling = Ceiling::new(Quantity::from_hundredths(limit), scope);
        let mut buffer = mode.zero_display().to_string();
        for &d in &digits {
            let outcome = append_digit(&buffer, d, mode, Some(&ceiling));
            if outcome.accepted {
                prop_assert!(Quantity::parse(&outcome.buffer) <= ceiling.limit);
                prop_assert!(outcome.message.is_none());
            } else {
                prop_assert_eq!(&outcome.buffer, &buffer);
                let message = outcome.message.unwrap_or_default();
                prop_assert!(message.contains("Available stock: "));
            }
            buffer = outcome.buffer;
        }
    }

    #[test]
    fn controller_commit_respects_ceiling(
        limit in 0i64..1_000_000,
        mode in mode_strategy(),
        keys in proptest::collection::vec(0u8..11, 0..24),
    ) {
        let ceiling = Ceiling::new(Quantity::from_hundredths(limit), StockScope::Branch);
        let mut entry = QuantityEntryController::new(mode, Some(ceiling));
        entry.begin((), Quantity::ZERO).unwrap();
        for k in keys {
            let key = KeypadKey::digit(k).unwrap_or(KeypadKey::Backspace);
            let feedback = entry.press(key).unwrap();
            prop_assert_eq!(Quantity::parse(&feedback.display), entry.buffer().unwrap());
        }
        let commit = entry.done().unwrap();
        prop_assert!(commit.value <= ceiling.limit);
    }
}

#[test]
fn format_scenarios() {
    assert_eq!(bpims_core::format_quantity(3.0, EntryMode::Unit), "3");
    assert_eq!(bpims_core::format_quantity(3.2, EntryMode::Decimal), "3.20");
    assert_eq!(bpims_core::format_quantity(3.456, EntryMode::Unit), "3");
}
