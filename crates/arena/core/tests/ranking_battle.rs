//! End-to-end ranking battle scenarios through `ArenaEngine`.

use arena_core::{
    Action, ActionContext, ActionResult, ActivateEntry, Address, AgentState, ArenaConfig,
    ArenaEngine, ArenaEnv, ArenaError, ArenaInfo, AvatarState, BattleEvent, BattleLog, BattleResult,
    CombatResolver, CombatSnapshot, ConfigOracle, DuelResolver, EndWeeklyArena, Env, ExecuteError,
    ExecutionOutcome, Inventory, InventoryItem, ItemId, ItemKind, JoinArena, JoinArenaError,
    RankingBattle, RankingBattleError, RemoveEntry, ResetDailyChallenges, ResolverError,
    RewardOracle, RewardRow, RewardTable, Side, StateSubject, SystemAction, TransitionPhase,
    WeeklyArenaState, WorldState,
};

const SIGNER: Address = Address::from_low_u64(100);
const ENEMY_AGENT: Address = Address::from_low_u64(200);
const ACTOR: Address = Address::from_low_u64(1);
const ENEMY: Address = Address::from_low_u64(2);
const ARENA: Address = Address::from_low_u64(50);

const COSTUME_SHEET: u32 = 40100000;
const SWORD: ItemId = ItemId::from_u128(0xA1);
const POTION: ItemId = ItemId::from_u128(0xA2);

/// Resolver that always returns the same result.
struct FixedResolver(BattleResult);

impl CombatResolver for FixedResolver {
    fn resolve(
        &self,
        _actor: &CombatSnapshot,
        _enemy: &CombatSnapshot,
        _seed: u64,
    ) -> Result<BattleLog, ResolverError> {
        Ok(BattleLog::new(self.0, Vec::new()))
    }
}

struct BrokenResolver;

impl CombatResolver for BrokenResolver {
    fn resolve(
        &self,
        _actor: &CombatSnapshot,
        _enemy: &CombatSnapshot,
        _seed: u64,
    ) -> Result<BattleLog, ResolverError> {
        Err(ResolverError::Engine("boom".into()))
    }
}

struct Fixture {
    config: ArenaConfig,
    rewards: RewardTable,
}

impl Fixture {
    fn new() -> Self {
        Self {
            config: ArenaConfig::default(),
            rewards: RewardTable::new(vec![
                RewardRow::material(303000, 2),
                RewardRow::new(10200000, ItemKind::Equipment, 1, 1),
            ]),
        }
    }

    fn env<'a>(&'a self, resolver: &'a dyn CombatResolver) -> ArenaEnv<'a> {
        let config: &dyn ConfigOracle = &self.config;
        let rewards: &dyn RewardOracle = &self.rewards;
        Env::new(Some(config), Some(rewards), Some(resolver))
    }

    fn world(&self) -> WorldState {
        let actor_inventory = Inventory::new(vec![
            InventoryItem::new(ItemId::from_u128(0xA0), COSTUME_SHEET, ItemKind::Costume, 1),
            InventoryItem::new(SWORD, 10100000, ItemKind::Equipment, 2),
            InventoryItem::new(POTION, 20100000, ItemKind::Consumable, 1),
        ]);
        let enemy_inventory = Inventory::new(vec![
            InventoryItem::new(ItemId::from_u128(0xB0), 10100000, ItemKind::Equipment, 1)
                .with_equipped(true),
        ]);

        let mut arena = WeeklyArenaState::new(ARENA);
        for (avatar, agent) in [(ACTOR, SIGNER), (ENEMY, ENEMY_AGENT)] {
            let mut info = ArenaInfo::new(
                avatar,
                agent,
                self.config.initial_score,
                self.config.max_daily_challenges,
            );
            info.activate();
            arena.set(info);
        }

        let mut state = WorldState::new();
        state.set_agent_state(AgentState::new(SIGNER).with_avatar(0, ACTOR));
        state.set_agent_state(AgentState::new(ENEMY_AGENT).with_avatar(0, ENEMY));
        state.set_avatar_state(
            AvatarState::new(ACTOR, SIGNER, "actor")
                .with_level(30)
                .with_cleared_stage(self.config.required_stage)
                .with_inventory(actor_inventory),
        );
        state.set_avatar_state(
            AvatarState::new(ENEMY, ENEMY_AGENT, "enemy")
                .with_level(30)
                .with_cleared_stage(self.config.required_stage)
                .with_inventory(enemy_inventory),
        );
        state.set_weekly_arena_state(arena);
        state
    }
}

fn battle() -> Action {
    Action::RankingBattle(
        RankingBattle::new(ACTOR, ENEMY, ARENA)
            .with_costumes([COSTUME_SHEET])
            .with_equipment(vec![SWORD])
            .with_consumables(vec![POTION]),
    )
}

fn ctx() -> ActionContext {
    ActionContext::new(SIGNER, 1_000, 0xDEAD_BEEF)
}

fn edit_arena(state: &mut WorldState, edit: impl FnOnce(&mut WeeklyArenaState)) {
    let mut arena = state.weekly_arena_state(&ARENA).unwrap().clone();
    edit(&mut arena);
    state.set_weekly_arena_state(arena);
}

fn battle_error(result: Result<ExecutionOutcome, ExecuteError>) -> RankingBattleError {
    match result {
        Err(ExecuteError::RankingBattle(e)) => e.error,
        other => panic!("expected a ranking battle error, got {other:?}"),
    }
}

fn run(
    fixture: &Fixture,
    state: &WorldState,
    resolver: &dyn CombatResolver,
    action: &Action,
) -> Result<ExecutionOutcome, ExecuteError> {
    ArenaEngine::new().execute(state, &fixture.env(resolver), action, &ctx())
}

// ============================================================================
// Validation order
// ============================================================================

#[test]
fn self_target_is_rejected_regardless_of_state() {
    let fixture = Fixture::new();
    let action = Action::RankingBattle(RankingBattle::new(ACTOR, ACTOR, ARENA));
    let win = FixedResolver(BattleResult::Win);

    for state in [WorldState::new(), fixture.world()] {
        assert_eq!(
            battle_error(run(&fixture, &state, &win, &action)),
            RankingBattleError::InvalidTarget
        );
    }
}

#[test]
fn missing_enemy_avatar_is_state_not_found_before_rank_check() {
    let fixture = Fixture::new();
    let mut state = fixture.world();
    state.remove_state(&ENEMY);
    edit_arena(&mut state, |arena| {
        arena.remove(&ENEMY);
    });

    let err = battle_error(run(&fixture, &state, &FixedResolver(BattleResult::Win), &battle()));
    assert_eq!(
        err,
        RankingBattleError::StateNotFound {
            which: StateSubject::Enemy,
            address: ENEMY
        }
    );
}

#[test]
fn unowned_actor_is_unauthorized() {
    let fixture = Fixture::new();
    let state = fixture.world();
    let action = battle();
    let result = ArenaEngine::new().execute(
        &state,
        &fixture.env(&FixedResolver(BattleResult::Win)),
        &action,
        &ActionContext::new(ENEMY_AGENT, 1, 1),
    );
    assert!(matches!(
        battle_error(result),
        RankingBattleError::UnauthorizedActor { .. }
    ));
}

#[test]
fn insufficient_progress_even_when_everything_else_holds() {
    let fixture = Fixture::new();
    let mut state = fixture.world();
    let actor = state.avatar_state(&ACTOR).unwrap().clone();
    state.set_avatar_state(actor.with_cleared_stage(fixture.config.required_stage - 1));

    assert_eq!(
        battle_error(run(&fixture, &state, &FixedResolver(BattleResult::Win), &battle())),
        RankingBattleError::InsufficientProgress {
            required: fixture.config.required_stage,
            cleared: fixture.config.required_stage - 1,
        }
    );
}

#[test]
fn ended_arena_is_closed_independent_of_challenges() {
    let fixture = Fixture::new();
    let mut state = fixture.world();
    edit_arena(&mut state, |arena| {
        arena.end();
        arena.get_mut(&ACTOR).unwrap().daily_challenge_count = 0;
    });

    assert_eq!(
        battle_error(run(&fixture, &state, &FixedResolver(BattleResult::Win), &battle())),
        RankingBattleError::ArenaClosed(ARENA)
    );
}

#[test]
fn missing_entries_name_the_absent_side() {
    let fixture = Fixture::new();
    let win = FixedResolver(BattleResult::Win);

    for (absent, side) in [(ACTOR, Side::Actor), (ENEMY, Side::Enemy)] {
        let mut state = fixture.world();
        edit_arena(&mut state, |arena| {
            arena.remove(&absent);
        });
        assert_eq!(
            battle_error(run(&fixture, &state, &win, &battle())),
            RankingBattleError::ActorNotRanked { which: side }
        );
    }
}

#[test]
fn exhausted_challenges_are_rejected() {
    let fixture = Fixture::new();
    let mut state = fixture.world();
    edit_arena(&mut state, |arena| {
        arena.get_mut(&ACTOR).unwrap().daily_challenge_count = 0;
    });

    let err = battle_error(run(&fixture, &state, &FixedResolver(BattleResult::Win), &battle()));
    assert_eq!(err, RankingBattleError::ChallengeExhausted);
    assert!(err.severity().is_recoverable());
}

#[test]
fn each_battle_consumes_exactly_one_challenge() {
    let fixture = Fixture::new();
    let lose = FixedResolver(BattleResult::Lose);
    let mut state = fixture.world();

    for expected in (0..fixture.config.max_daily_challenges).rev() {
        state = run(&fixture, &state, &lose, &battle()).unwrap().state;
        let info = state.weekly_arena_state(&ARENA).unwrap().get(&ACTOR).unwrap();
        assert_eq!(info.daily_challenge_count, expected);
    }

    assert_eq!(
        battle_error(run(&fixture, &state, &lose, &battle())),
        RankingBattleError::ChallengeExhausted
    );
}

#[test]
fn unowned_loadout_item_is_rejected_in_validation() {
    let fixture = Fixture::new();
    let stranger = ItemId::from_u128(0xFFFF);
    let action = Action::RankingBattle(
        RankingBattle::new(ACTOR, ENEMY, ARENA).with_equipment(vec![stranger]),
    );

    let result = run(&fixture, &fixture.world(), &FixedResolver(BattleResult::Win), &action);
    let Err(ExecuteError::RankingBattle(err)) = result else {
        panic!("expected ranking battle error");
    };
    assert_eq!(err.phase, TransitionPhase::Validate);
    assert_eq!(err.error, RankingBattleError::ItemNotOwned { id: stranger });
}

// ============================================================================
// Battle outcomes
// ============================================================================

#[test]
fn win_raises_score_and_grants_rewards() {
    let fixture = Fixture::new();
    let prior = fixture.world();
    let before = prior.weekly_arena_state(&ARENA).unwrap().clone();

    let outcome = run(&fixture, &prior, &FixedResolver(BattleResult::Win), &battle()).unwrap();
    let arena = outcome.state.weekly_arena_state(&ARENA).unwrap();
    let actor_before = before.get(&ACTOR).unwrap();
    let actor_after = arena.get(&ACTOR).unwrap();

    assert!(actor_after.score > actor_before.score);
    assert_eq!(actor_after.win_count, actor_before.win_count + 1);
    assert_eq!(actor_after.lose_count, actor_before.lose_count);
    assert_eq!(actor_after.daily_challenge_count, 4);
    assert_eq!(arena.get(&ENEMY), before.get(&ENEMY), "enemy entry is untouched");

    let actor = outcome.state.avatar_state(&ACTOR).unwrap();
    assert_eq!(actor.inventory.count_of(303000), 2);
    assert_eq!(actor.inventory.count_of(10200000), 1);
    assert_eq!(
        outcome.state.avatar_state(&ENEMY),
        prior.avatar_state(&ENEMY),
        "enemy avatar is untouched"
    );

    let ActionResult::RankingBattle(output) = &outcome.result else {
        panic!("expected ranking battle result");
    };
    assert_eq!(
        i64::from(actor_after.score) - i64::from(actor_before.score),
        output.score_delta
    );
    assert_eq!(output.rank, 1);
    assert_eq!(output.rewards.len(), 2);
    assert!(outcome.battle_log().is_some_and(BattleLog::is_win));
    assert_eq!(
        output.log.events.last(),
        Some(&BattleEvent::Reward {
            items: output.rewards.clone()
        })
    );

    assert_eq!(outcome.delta.updated, vec![ACTOR, ARENA]);
    assert!(outcome.delta.created.is_empty() && outcome.delta.removed.is_empty());
}

#[test]
fn repeated_wins_under_one_context_keep_minting() {
    let fixture = Fixture::new();
    let win = FixedResolver(BattleResult::Win);

    let first = run(&fixture, &fixture.world(), &win, &battle()).unwrap();
    let second = run(&fixture, &first.state, &win, &battle()).unwrap();

    let actor = second.state.avatar_state(&ACTOR).unwrap();
    assert_eq!(actor.inventory.count_of(303000), 4);
    assert_eq!(actor.inventory.count_of(10200000), 2);

    let (ActionResult::RankingBattle(a), ActionResult::RankingBattle(b)) =
        (&first.result, &second.result)
    else {
        panic!("expected ranking battle results");
    };
    let equipment = |items: &[InventoryItem]| {
        items
            .iter()
            .filter(|item| item.kind == ItemKind::Equipment)
            .map(|item| item.id)
            .collect::<Vec<_>>()
    };
    assert_ne!(equipment(&a.rewards), equipment(&b.rewards));
}

#[test]
fn loss_counts_without_rewards() {
    let fixture = Fixture::new();
    let prior = fixture.world();
    let before = prior.weekly_arena_state(&ARENA).unwrap().get(&ACTOR).unwrap().clone();

    let outcome = run(&fixture, &prior, &FixedResolver(BattleResult::Lose), &battle()).unwrap();
    let after = outcome.state.weekly_arena_state(&ARENA).unwrap().get(&ACTOR).unwrap();

    assert!(after.score <= before.score);
    assert_eq!(after.lose_count, before.lose_count + 1);
    assert_eq!(after.win_count, before.win_count);
    assert_eq!(after.daily_challenge_count, 4);
    assert_eq!(
        outcome.state.avatar_state(&ACTOR).unwrap().inventory,
        prior.avatar_state(&ACTOR).unwrap().inventory
    );
    assert_eq!(outcome.delta.updated, vec![ARENA]);
}

#[test]
fn resolver_failure_commits_nothing() {
    let fixture = Fixture::new();
    let prior = fixture.world();
    let root = prior.state_root().unwrap();

    let result = run(&fixture, &prior, &BrokenResolver, &battle());
    let Err(ExecuteError::RankingBattle(err)) = result else {
        panic!("expected ranking battle error");
    };
    assert_eq!(err.phase, TransitionPhase::Resolve);
    assert_eq!(
        err.error,
        RankingBattleError::ResolverFailure(ResolverError::Engine("boom".into()))
    );
    assert_eq!(prior.state_root().unwrap(), root);
}

#[test]
fn execution_is_deterministic_and_leaves_prior_untouched() {
    let fixture = Fixture::new();
    let prior = fixture.world();
    let prior_root = prior.state_root().unwrap();
    let duel = DuelResolver::new(fixture.config.max_turns);

    let first = run(&fixture, &prior, &duel, &battle()).unwrap();
    let second = run(&fixture, &prior, &duel, &battle()).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.state.state_root().unwrap(), second.state.state_root().unwrap());
    assert_eq!(prior.state_root().unwrap(), prior_root);
    assert_eq!(hex::encode(prior_root).len(), 64);
    assert!(first.state.shares_record(&prior, &ENEMY));
}

#[test]
fn active_gate_is_opt_in() {
    let mut fixture = Fixture::new();
    let mut state = fixture.world();
    edit_arena(&mut state, |arena| {
        arena.get_mut(&ENEMY).unwrap().active = false;
    });
    let win = FixedResolver(BattleResult::Win);

    assert!(run(&fixture, &state, &win, &battle()).is_ok());

    fixture.config = fixture.config.clone().with_require_active(true);
    assert_eq!(
        battle_error(run(&fixture, &state, &win, &battle())),
        RankingBattleError::EntryInactive { which: Side::Enemy }
    );
}

// ============================================================================
// Join and system actions
// ============================================================================

#[test]
fn joined_avatar_can_battle_immediately() {
    let fixture = Fixture::new();
    let newcomer = Address::from_low_u64(3);
    let mut state = fixture.world();
    state.set_agent_state(AgentState::new(SIGNER).with_avatar(0, ACTOR).with_avatar(1, newcomer));
    state.set_avatar_state(
        AvatarState::new(newcomer, SIGNER, "newcomer")
            .with_cleared_stage(fixture.config.required_stage),
    );

    let win = FixedResolver(BattleResult::Win);
    let join = Action::JoinArena(JoinArena::new(newcomer, ARENA));
    let outcome = run(&fixture, &state, &win, &join).unwrap();
    let info = outcome.state.weekly_arena_state(&ARENA).unwrap().get(&newcomer).unwrap();
    assert_eq!(info.score, fixture.config.initial_score);
    assert_eq!(info.daily_challenge_count, fixture.config.max_daily_challenges);
    assert!(info.active);

    let again = run(&fixture, &outcome.state, &win, &join);
    assert!(matches!(
        again,
        Err(ExecuteError::JoinArena(ref e)) if e.error == JoinArenaError::AlreadyRanked(newcomer)
    ));

    let fight = Action::RankingBattle(RankingBattle::new(newcomer, ENEMY, ARENA));
    assert!(run(&fixture, &outcome.state, &win, &fight).is_ok());
}

#[test]
fn system_actions_require_the_system_signer() {
    let fixture = Fixture::new();
    let action = Action::System(SystemAction::EndWeeklyArena(EndWeeklyArena::new(ARENA)));
    let result = run(&fixture, &fixture.world(), &FixedResolver(BattleResult::Win), &action);
    assert_eq!(
        result.unwrap_err(),
        ExecuteError::SystemActionNotFromSystem { signer: SIGNER }
    );
}

#[test]
fn epoch_lifecycle_through_system_actions() {
    let fixture = Fixture::new();
    let win = FixedResolver(BattleResult::Win);
    let env = fixture.env(&win);
    let engine = ArenaEngine::new();
    let system = ActionContext::system(2_000, 7);

    let mut state = fixture.world();
    for _ in 0..2 {
        state = engine.execute(&state, &env, &battle(), &ctx()).unwrap().state;
    }

    let reset =
        Action::System(SystemAction::ResetDailyChallenges(ResetDailyChallenges::new(ARENA)));
    state = engine.execute(&state, &env, &reset, &system).unwrap().state;
    let info = state.weekly_arena_state(&ARENA).unwrap().get(&ACTOR).unwrap();
    assert_eq!(info.daily_challenge_count, fixture.config.max_daily_challenges);
    assert_eq!(info.win_count, 2);

    let remove = Action::System(SystemAction::RemoveEntry(RemoveEntry::new(ARENA, ENEMY)));
    let removed = engine.execute(&state, &env, &remove, &system).unwrap().state;
    assert_eq!(
        battle_error(engine.execute(&removed, &env, &battle(), &ctx())),
        RankingBattleError::ActorNotRanked { which: Side::Enemy }
    );

    let activate = Action::System(SystemAction::ActivateEntry(ActivateEntry::new(ARENA, ENEMY)));
    assert!(engine.execute(&removed, &env, &activate, &system).is_err());

    let end = Action::System(SystemAction::EndWeeklyArena(EndWeeklyArena::new(ARENA)));
    let ended = engine.execute(&state, &env, &end, &system).unwrap().state;
    assert_eq!(
        battle_error(engine.execute(&ended, &env, &battle(), &ctx())),
        RankingBattleError::ArenaClosed(ARENA)
    );
    assert!(engine.execute(&ended, &env, &reset, &system).is_err());
}

#[test]
fn encoded_action_executes_identically() {
    let fixture = Fixture::new();
    let prior = fixture.world();
    let action = battle();
    let decoded = Action::decode(&action.encode().unwrap()).unwrap();
    let duel = DuelResolver::new(fixture.config.max_turns);

    let direct = run(&fixture, &prior, &duel, &action).unwrap();
    let replayed = run(&fixture, &prior, &duel, &decoded).unwrap();
    assert_eq!(direct.state.state_root().unwrap(), replayed.state.state_root().unwrap());
}
