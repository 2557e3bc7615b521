use lock_fund::constants::SECONDS_PER_DAY;
use lock_fund::error::LockFundError;
use lock_fund::state::ConfigAccount;
use lock_fund::utils::release::ReleasePlan;
use lock_fund::utils::vesting::{eligible_amount, elapsed_days, VestingInput};
use proptest::prelude::*;

const DAY: i64 = SECONDS_PER_DAY;
const CLIFF: i64 = 1_735_689_600;

fn input(now: i64, amount_per_day: u64, released_total: u64, vault_balance: u64) -> VestingInput {
    VestingInput {
        now,
        cliff_time: CLIFF,
        amount_per_day,
        released_total,
        vault_balance,
        enable_full_withdrawal: false,
    }
}

fn record(amount_per_day: u64) -> ConfigAccount {
    let mut c: ConfigAccount = bytemuck::Zeroable::zeroed();
    c.cliff_time = CLIFF;
    c.amount_per_day = amount_per_day;
    c
}

proptest! {
    #[test]
    fn nothing_vests_before_cliff(
        before in 1i64..=10 * 365 * DAY,
        rate in 0u64..=u64::MAX,
        released in 0u64..=1_000_000_000u64,
        balance in 0u64..=1_000_000_000u64,
    ) {
        let i = input(CLIFF - before, rate, released, balance);
        prop_assert_eq!(eligible_amount(&i), Ok(0));
    }
}

proptest! {
    #[test]
    fn eligible_grows_with_time(
        t1 in 0i64..=5_000 * DAY,
        dt in 0i64..=5_000 * DAY,
        rate in 0u64..=1_000_000_000_000u64,
        released in 0u64..=1_000_000_000_000u64,
        balance in 0u64..=1_000_000_000_000u64,
    ) {
        let early = eligible_amount(&input(CLIFF + t1, rate, released, balance)).unwrap();
        let late = eligible_amount(&input(CLIFF + t1 + dt, rate, released, balance)).unwrap();
        prop_assert!(early <= late);
    }
}

proptest! {
    #[test]
    fn eligible_grows_with_rate(
        t in 0i64..=5_000 * DAY,
        rate in 0u64..=1_000_000_000_000u64,
        extra in 0u64..=1_000_000_000_000u64,
        released in 0u64..=1_000_000_000_000u64,
        balance in 0u64..=1_000_000_000_000u64,
    ) {
        let slow = eligible_amount(&input(CLIFF + t, rate, released, balance)).unwrap();
        let fast = eligible_amount(&input(CLIFF + t, rate + extra, released, balance)).unwrap();
        prop_assert!(slow <= fast);
    }
}

proptest! {
    #[test]
    fn eligible_never_exceeds_vault(
        t in -100i64 * DAY..=5_000 * DAY,
        rate in 0u64..=1_000_000_000_000u64,
        released in 0u64..=1_000_000_000_000u64,
        balance in 0u64..=1_000_000_000_000u64,
        full in any::<bool>(),
    ) {
        let mut i = input(CLIFF + t, rate, released, balance);
        i.enable_full_withdrawal = full;
        let eligible = eligible_amount(&i).unwrap();
        prop_assert!(eligible <= balance);
        if full {
            prop_assert_eq!(eligible, balance);
        }
    }
}

proptest! {
    #[test]
    fn release_sequence_conserves_value(
        deposit in 1u64..=1_000_000_000u64,
        rate in 1u64..=100_000_000u64,
        steps in prop::collection::vec((0i64..=4, 0u64..=200_000_000u64), 1..40),
    ) {
        let mut config = record(rate);
        let mut vault = deposit;
        let mut now = CLIFF - DAY;

        for (days, ask) in steps {
            now += days * DAY;
            let released_before = config.released_total;
            match ReleasePlan::prepare(&config, now, vault, ask) {
                Ok(plan) => {
                    vault -= plan.amount;
                    plan.commit(&mut config).unwrap();
                    prop_assert!(config.released_total > released_before);
                }
                Err(e) => {
                    prop_assert!(
                        e == LockFundError::InvalidAmount
                            || e == LockFundError::InsufficientVestedAmount
                    );
                    prop_assert_eq!(config.released_total, released_before);
                }
            }

            prop_assert_eq!(vault + config.released_total, deposit);
            let vested = elapsed_days(now, CLIFF).unwrap() * rate;
            prop_assert!(config.released_total <= vested.min(deposit));
        }
    }
}

proptest! {
    #[test]
    fn over_asking_changes_nothing(
        t in 0i64..=1_000 * DAY,
        rate in 1u64..=1_000_000u64,
        deposit in 1u64..=1_000_000_000u64,
        over in 1u64..=1_000u64,
    ) {
        let config = record(rate);
        let eligible = eligible_amount(&input(CLIFF + t, rate, 0, deposit)).unwrap();
        let result = ReleasePlan::prepare(&config, CLIFF + t, deposit, eligible + over);
        prop_assert_eq!(result, Err(LockFundError::InsufficientVestedAmount));
        prop_assert_eq!(config.released_total, 0);
    }
}
