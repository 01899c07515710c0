//! Outcome rules for menu actions.
use rand::Rng;

use crate::player::reputation::ReputationLedger;

use super::{catalog::ActionKind, config::ReputationRules};

/// What happened when an action was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionOutcome {
    pub kind: ActionKind,
    pub success: bool,
    pub reputation_delta: i32,
}

/// Probability that a steal attempt succeeds at the given reputation.
pub fn steal_success_chance(reputation: i32, rules: &ReputationRules) -> f64 {
    (f64::from(reputation) / rules.steal_divisor).clamp(0.0, rules.steal_chance_cap)
}

/// Grants the one-off reputation bonus for opening a conversation.
pub fn reward_talk<L>(player: &mut L, rules: &ReputationRules) -> ActionOutcome
where
    L: ReputationLedger + ?Sized,
{
    player.modify(rules.talk);
    ActionOutcome {
        kind: ActionKind::Talk,
        success: true,
        reputation_delta: rules.talk,
    }
}

/// Resolves an action and applies its reputation delta to `player`.
///
/// Steal is the only kind that consumes a draw from `rng`.
pub fn resolve_action<L, R>(
    kind: ActionKind,
    player: &mut L,
    rules: &ReputationRules,
    rng: &mut R,
) -> ActionOutcome
where
    L: ReputationLedger + ?Sized,
    R: Rng + ?Sized,
{
    let (success, reputation_delta) = match kind {
        ActionKind::Talk => return reward_talk(player, rules),
        ActionKind::Buy | ActionKind::Sell => (true, rules.trade),
        ActionKind::Steal => {
            let chance = steal_success_chance(player.value(), rules);
            let roll: f64 = rng.gen();
            if roll < chance {
                (true, rules.steal_success)
            } else {
                (false, rules.steal_failure)
            }
        }
    };

    player.modify(reputation_delta);
    ActionOutcome {
        kind,
        success,
        reputation_delta,
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::mock::StepRng, rngs::StdRng, SeedableRng};

    use super::*;
    use crate::player::reputation::Reputation;

    /// Always draws 0.0.
    fn lucky_rng() -> StepRng {
        StepRng::new(0, 0)
    }

    /// Always draws the largest value below 1.0.
    fn unlucky_rng() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    #[test]
    fn steal_odds_are_capped() {
        let rules = ReputationRules::default();
        assert_eq!(steal_success_chance(0, &rules), 0.0);
        assert_eq!(steal_success_chance(100, &rules), 0.5);
        assert_eq!(steal_success_chance(200, &rules), 0.5);
        assert_eq!(steal_success_chance(1000, &rules), 0.5);
        assert_eq!(steal_success_chance(-40, &rules), 0.0);
        assert_eq!(steal_success_chance(50, &rules), 0.25);
    }

    #[test]
    fn steal_always_fails_without_reputation() {
        let rules = ReputationRules::default();
        let mut player = Reputation::new(0);
        let outcome = resolve_action(ActionKind::Steal, &mut player, &rules, &mut lucky_rng());

        assert!(!outcome.success);
        assert_eq!(outcome.reputation_delta, -20);
        assert_eq!(player.value(), 0);
    }

    #[test]
    fn steal_success_and_failure_branches() {
        let rules = ReputationRules::default();

        let mut player = Reputation::new(60);
        let outcome = resolve_action(ActionKind::Steal, &mut player, &rules, &mut lucky_rng());
        assert!(outcome.success);
        assert_eq!(player.value(), 50);

        let mut player = Reputation::new(60);
        let outcome = resolve_action(ActionKind::Steal, &mut player, &rules, &mut unlucky_rng());
        assert!(!outcome.success);
        assert_eq!(player.value(), 40);
    }

    #[test]
    fn talking_grants_the_talk_bonus() {
        let rules = ReputationRules::default();
        let mut player = Reputation::new(99);
        let outcome = reward_talk(&mut player, &rules);
        assert_eq!(outcome.kind, ActionKind::Talk);
        assert_eq!(player.value(), 100);

        let outcome = resolve_action(ActionKind::Talk, &mut player, &rules, &mut lucky_rng());
        assert!(outcome.success);
        assert_eq!(player.value(), 100);
    }

    #[test]
    fn trades_always_succeed() {
        let rules = ReputationRules::default();
        let mut player = Reputation::new(30);
        let mut rng = StdRng::seed_from_u64(7);

        let buy = resolve_action(ActionKind::Buy, &mut player, &rules, &mut rng);
        let sell = resolve_action(ActionKind::Sell, &mut player, &rules, &mut rng);

        assert!(buy.success && sell.success);
        assert_eq!(buy.reputation_delta, 1);
        assert_eq!(player.value(), 32);
    }
}
