//! Property-based tests for selection sequencing and session invariants.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use panelsim_core::config::{MAX_BATTERY_LEVEL, MAX_CYCLE_COUNT, MAX_TORQUE_LIMIT};
use panelsim_core::state::selection::is_selectable;
use panelsim_core::state::{
    adjust_selection, full_sequence, CustomLevelKey, CustomLevels, Event, HammerMode,
    IndStatusKey, Session, SpeedLevel, StepButton, ToolStatus, TorqueSelection,
};
use panelsim_core::Variant;
use proptest::prelude::*;

prop_compose! {
    fn arbitrary_levels()(flags in prop::array::uniform3(any::<bool>())) -> CustomLevels {
        CustomLevels::from_flags(flags)
    }
}

fn arbitrary_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        Just(Event::TogglePower),
        (0..4u8).prop_map(|i| Event::SelectVariant(Variant::from_index(i).unwrap())),
        (0..4u8).prop_map(|i| Event::SetToolStatus(ToolStatus::from_index(i).unwrap())),
        any::<u8>().prop_map(Event::SetMaxTorqueLimit),
        any::<u8>().prop_map(Event::SetBatteryLevel),
        any::<u16>().prop_map(Event::SetCycleCount),
        (0..3u8).prop_map(|i| Event::ToggleCustomLevel(CustomLevelKey::from_index(i).unwrap())),
        (0..4u8).prop_map(|i| Event::ToggleIndStatus(IndStatusKey::from_index(i).unwrap())),
        prop_oneof![Just(HammerMode::Max), Just(HammerMode::Soft)].prop_map(Event::SelectMode),
        prop_oneof![Just(1i8), Just(-1i8)].prop_map(Event::StepTorque),
        Just(Event::ToggleAutoMode),
        Just(Event::CycleSpeed),
        (1..=3u8).prop_map(|n| Event::SelectSpeed(SpeedLevel::new(n).unwrap())),
        Just(Event::ToggleLock),
    ]
}

proptest! {
    #[test]
    fn sequence_shape(max_limit in 0..=MAX_TORQUE_LIMIT, levels in arbitrary_levels()) {
        let sequence = full_sequence(max_limit, &levels);
        let numeric = max_limit as usize + 1;

        prop_assert_eq!(sequence.len(), numeric + levels.active_count());
        for (i, selection) in sequence[..numeric].iter().enumerate() {
            prop_assert_eq!(*selection, TorqueSelection::Numeric(i as u8));
        }

        let customs: Vec<CustomLevelKey> = sequence[numeric..]
            .iter()
            .map(|s| match s {
                TorqueSelection::Custom(key) => *key,
                TorqueSelection::Numeric(n) => panic!("numeric {} after custom keys", n),
            })
            .collect();
        let mut sorted = customs.clone();
        sorted.sort();
        prop_assert_eq!(&customs, &sorted);
        for key in &customs {
            prop_assert!(levels.is_active(*key));
        }
    }

    #[test]
    fn step_up_then_down_returns(
        max_limit in 0..=MAX_TORQUE_LIMIT,
        levels in arbitrary_levels(),
        pick in any::<prop::sample::Index>(),
    ) {
        let sequence = full_sequence(max_limit, &levels);
        let i = pick.index(sequence.len());
        prop_assume!(i + 1 < sequence.len());

        let current = sequence[i];
        let up = adjust_selection(current, 1, &sequence);
        prop_assert_eq!(up, sequence[i + 1]);
        prop_assert_eq!(adjust_selection(up, -1, &sequence), current);
    }

    #[test]
    fn stepping_past_ends_is_noop(max_limit in 0..=MAX_TORQUE_LIMIT, levels in arbitrary_levels()) {
        let sequence = full_sequence(max_limit, &levels);
        let first = sequence[0];
        let last = sequence[sequence.len() - 1];

        prop_assert_eq!(adjust_selection(first, -1, &sequence), first);
        prop_assert_eq!(adjust_selection(last, 1, &sequence), last);
    }

    #[test]
    fn session_invariants_hold(events in prop::collection::vec(arbitrary_event(), 0..64)) {
        let mut session = Session::default();

        for event in events {
            session.apply(event);
            let snap = session.snapshot();

            prop_assert!(snap.max_torque_limit <= MAX_TORQUE_LIMIT);
            prop_assert!(snap.battery_level <= MAX_BATTERY_LEVEL);
            prop_assert!(snap.cycle_count <= MAX_CYCLE_COUNT);
            prop_assert!(is_selectable(
                snap.torque_selection,
                snap.max_torque_limit,
                &snap.custom_levels
            ));

            let features = snap.variant.features();
            if features.has_industrial_status && snap.ind_status.kickback {
                prop_assert_eq!(snap.tool_status, ToolStatus::SafetyError);
            }
            if features.has_industrial_status && !snap.ind_status.kickback {
                prop_assert_ne!(snap.tool_status, ToolStatus::SafetyError);
            }

            let disabled = !snap.power_on
                || snap.tool_status.is_tool_locked()
                || (features.has_industrial_status && snap.ind_status.locked);
            prop_assert_eq!(snap.interaction_disabled, disabled);
        }
    }

    #[test]
    fn disabled_session_ignores_steps(events in prop::collection::vec(arbitrary_event(), 0..32)) {
        let mut session = Session::default();
        for event in events {
            session.apply(event);
        }
        prop_assume!(session.is_interaction_disabled());

        let before = session.snapshot();
        session.step_torque(1);
        session.step_torque(-1);
        session.toggle_ind_status(IndStatusKey::Maintenance);
        prop_assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn maintenance_follows_cycle_threshold(count in 0..=MAX_CYCLE_COUNT, manual in any::<bool>()) {
        let mut session = Session::default();
        session.set_cycle_count(count);
        if manual {
            session.toggle_ind_status(IndStatusKey::Maintenance);
        }
        prop_assert_eq!(session.is_maintenance_needed(), count >= 10_000 || manual);
    }

    #[test]
    fn press_outcome_depends_on_hold_time(hold in 0u64..6_000) {
        let mut session = Session::default();
        session.press_start(StepButton::Plus, 0);
        session.tick(hold);
        session.press_end(StepButton::Plus, hold);

        let long = hold >= 3_000;
        prop_assert_eq!(session.ind_status().locked, long);
        let expected = if long {
            TorqueSelection::Numeric(50)
        } else {
            TorqueSelection::Custom(CustomLevelKey::C1)
        };
        prop_assert_eq!(session.torque_selection(), expected);
    }
}
