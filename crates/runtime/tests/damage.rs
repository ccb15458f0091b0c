//! Damage routing through the composition pipeline.

mod common;

use common::{Failure, Recording, builder};
use game_core::{DamageEvent, PlayerId, Scope, Tick};
use runtime::Runtime;

fn armed_runtime(slot_first: bool) -> (Runtime, PlayerId, PlayerId) {
    let armor = Recording::new("HeavyArmor", 1).contributing(Scope::Server, 0.4);
    let bonus = Recording::new("Pairing", 1).contributing(Scope::Attacker, 2.0);
    let builder = builder(17);
    let builder = if slot_first {
        builder.reserved_slot(armor, 0, true).skill(bonus)
    } else {
        builder.skill(bonus).reserved_slot(armor, 0, true)
    };
    let mut runtime = builder.build().unwrap();
    let attacker = runtime.on_player_connect(0);
    let victim = runtime.on_player_connect(1);
    runtime.on_round_start();
    runtime.on_tick(Tick(1));
    (runtime, attacker, victim)
}

#[test]
fn armor_and_pairing_bonus_compose_to_point_eight() {
    for slot_first in [true, false] {
        let (runtime, attacker, victim) = armed_runtime(slot_first);
        let hit = DamageEvent::new(victim, 100.0).with_attacker(attacker);

        let resolved = runtime.on_damage(hit);
        assert_eq!(resolved.multiplier(), 0.8);
        assert_eq!(resolved.final_amount(), 80.0);
    }
}

#[test]
fn nothing_active_means_identity() {
    let runtime = builder(1).build().unwrap();
    let hit = DamageEvent::new(PlayerId(1), 35.0);
    assert_eq!(runtime.on_damage(hit).multiplier(), 1.0);
}

#[test]
fn halves_cancel_doubles() {
    let mut runtime = builder(3)
        .event(Recording::new("Double", 1).contributing(Scope::Server, 2.0))
        .skill(Recording::new("Tough", 1).contributing(Scope::Victim, 0.5))
        .build()
        .unwrap();
    let attacker = runtime.on_player_connect(0);
    let victim = runtime.on_player_connect(1);
    runtime.on_round_start();
    runtime.on_tick(Tick(0));

    let hit = DamageEvent::new(victim, 50.0).with_attacker(attacker);
    assert_eq!(runtime.on_damage(hit).multiplier(), 1.0);
}

#[test]
fn self_damage_asks_skills_in_both_roles() {
    let mut runtime = builder(3)
        .skill(
            Recording::new("Reckless", 1)
                .contributing(Scope::Attacker, 3.0),
        )
        .build()
        .unwrap();
    let player = runtime.on_player_connect(0);
    runtime.on_round_start();
    runtime.on_tick(Tick(0));

    let grenade = DamageEvent::new(player, 10.0).with_attacker(player);
    assert_eq!(runtime.on_damage(grenade).multiplier(), 3.0);
}

#[test]
fn event_stops_contributing_after_round_end() {
    let mut runtime = builder(3)
        .event(Recording::new("Double", 1).contributing(Scope::Server, 2.0))
        .build()
        .unwrap();
    runtime.on_round_start();
    let hit = DamageEvent::new(PlayerId(1), 10.0);
    assert_eq!(runtime.on_damage(hit.clone()).multiplier(), 2.0);

    runtime.on_round_end();
    assert_eq!(runtime.on_damage(hit).multiplier(), 1.0);
}

#[test]
fn faulted_modifier_keeps_contributing() {
    let mut runtime = builder(3)
        .event(
            Recording::new("Shaky", 1)
                .failing(Failure::ApplyPanic)
                .contributing(Scope::Server, 0.5),
        )
        .build()
        .unwrap();
    runtime.on_round_start();
    let hit = DamageEvent::new(PlayerId(1), 10.0);
    assert_eq!(runtime.on_damage(hit).final_amount(), 5.0);
}
