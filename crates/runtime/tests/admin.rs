//! Administrative surface and the next-tick command queue.

mod common;

use common::{Recording, builder};
use game_core::{AdminCommand, ErrorSeverity, GameError, ModifierKind, RegistryError, Tick};
use runtime::{Runtime, RuntimeError, RuntimeEvent, Topic};

fn runtime() -> Runtime {
    builder(10)
        .event(Recording::new("NoEvent", 100))
        .event(Recording::new("LowGravity", 10))
        .skill(Recording::new("Medic", 4))
        .reserved_slot(Recording::new("Welfare", 1), 10, true)
        .event_weights([("LowGravity", 25), ("Ghost", 5), ("NoEvent", -1)])
        .skill_weights([("Medic", 7)])
        .slot_enabled("Welfare", false)
        .slot_enabled("Unknown", true)
        .build()
        .unwrap()
}

#[test]
fn startup_tables_apply_known_valid_entries_only() {
    let runtime = runtime();
    assert_eq!(runtime.weight(ModifierKind::Event, "LowGravity").unwrap(), 25);
    assert_eq!(runtime.weight(ModifierKind::Event, "NoEvent").unwrap(), 100);
    assert_eq!(runtime.weight(ModifierKind::Skill, "Medic").unwrap(), 7);
    assert_eq!(runtime.slot_enabled("Welfare"), Some(false));
}

#[test]
fn set_weight_reports_clear_errors() {
    let mut runtime = runtime();

    assert_eq!(
        runtime.set_weight(ModifierKind::Event, "NoEvent", 0).unwrap(),
        100
    );
    assert_eq!(runtime.weight(ModifierKind::Event, "NoEvent").unwrap(), 0);

    let err = runtime
        .set_weight(ModifierKind::Event, "LowGravity", -5)
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Registry(RegistryError::InvalidWeight { weight: -5, .. })
    ));
    assert_eq!(err.severity(), ErrorSeverity::Validation);
    assert_eq!(runtime.weight(ModifierKind::Event, "LowGravity").unwrap(), 25);

    let err = runtime
        .set_weight(ModifierKind::Skill, "Ghost", 1)
        .unwrap_err();
    assert_eq!(err.to_string(), "unknown modifier `Ghost`");

    assert_eq!(
        runtime.weight(ModifierKind::Reserved, "Welfare"),
        Err(RuntimeError::Unweighted(ModifierKind::Reserved))
    );
}

#[test]
fn list_is_ordered_by_name() {
    let runtime = runtime();
    let listed: Vec<(String, u32)> = runtime
        .list_modifiers(ModifierKind::Event)
        .unwrap()
        .into_iter()
        .map(|row| (row.name, row.weight))
        .collect();
    assert_eq!(
        listed,
        [("LowGravity".to_owned(), 25), ("NoEvent".to_owned(), 100)]
    );
}

#[test]
fn zero_weight_takes_an_event_out_of_rotation() {
    let mut runtime = runtime();
    runtime.set_weight(ModifierKind::Event, "NoEvent", 0).unwrap();
    runtime.clear_history();

    let summary = runtime.on_round_start();
    assert_eq!(summary.event.as_deref(), Some("LowGravity"));
}

#[test]
fn clear_history_allows_immediate_repeat() {
    let mut runtime = builder(10)
        .event(Recording::new("Only", 1))
        .build()
        .unwrap();

    assert_eq!(runtime.on_round_start().event.as_deref(), Some("Only"));
    runtime.on_round_end();
    assert_eq!(runtime.on_round_start().event, None);
    runtime.on_round_end();

    runtime.clear_history();
    assert!(runtime.history().is_empty());
    assert_eq!(runtime.on_round_start().event.as_deref(), Some("Only"));
}

#[test]
fn submitted_commands_wait_for_the_next_tick() {
    let mut runtime = runtime();
    let mut admin = runtime.subscribe(Topic::Admin);

    runtime.submit(AdminCommand::SetWeight {
        kind: ModifierKind::Event,
        name: "LowGravity".into(),
        weight: 3,
    });
    runtime.submit(AdminCommand::ForceNext("Ghost".into()));
    runtime.submit(AdminCommand::SetSlotEnabled {
        name: "Welfare".into(),
        enabled: true,
    });
    runtime.submit(AdminCommand::ClearHistory);

    assert_eq!(runtime.pending_commands(), 4);
    assert_eq!(runtime.weight(ModifierKind::Event, "LowGravity").unwrap(), 25);

    let report = runtime.on_tick(Tick(1));
    assert_eq!(report.commands, 4);
    assert_eq!(runtime.pending_commands(), 0);
    assert_eq!(runtime.weight(ModifierKind::Event, "LowGravity").unwrap(), 3);
    assert_eq!(runtime.slot_enabled("Welfare"), Some(true));

    let outcomes: Vec<RuntimeEvent> = std::iter::from_fn(|| admin.try_recv().ok()).collect();
    assert_eq!(outcomes.len(), 4);
    assert_eq!(
        outcomes[1],
        RuntimeEvent::AdminRejected {
            command: "force_next".into(),
            reason: "unknown modifier `Ghost`".into(),
        }
    );
    assert!(matches!(
        &outcomes[3],
        RuntimeEvent::AdminExecuted { command } if command == "clear_history"
    ));
}

/// Queues a forced event from inside `apply`.
struct Scheduler;

impl game_core::Modifier for Scheduler {
    fn name(&self) -> &str {
        "Scheduler"
    }

    fn apply(
        &mut self,
        ctx: &mut game_core::RoundContext<'_>,
    ) -> Result<(), game_core::ModifierFault> {
        ctx.queue(AdminCommand::ForceNext("Target".into()));
        Ok(())
    }
}

#[test]
fn commands_queued_by_modifiers_run_after_the_lifecycle_call() {
    let mut runtime = builder(4)
        .event(Scheduler)
        .event(Recording::new("Target", 0))
        .build()
        .unwrap();

    assert_eq!(runtime.on_round_start().event.as_deref(), Some("Scheduler"));
    assert_eq!(runtime.pending_commands(), 1);

    runtime.on_tick(Tick(1));
    runtime.on_round_end();
    let summary = runtime.on_round_start();
    assert_eq!(summary.event.as_deref(), Some("Target"));
    assert!(summary.forced);
}

#[test]
fn duplicate_names_abort_the_build() {
    let events = builder(1)
        .event(Recording::new("NoEvent", 1))
        .event(Recording::new("NoEvent", 5))
        .build();
    assert!(matches!(
        events,
        Err(RuntimeError::Registry(RegistryError::DuplicateName(ref name))) if name == "NoEvent"
    ));

    let skills = builder(1)
        .skill(Recording::new("Medic", 1))
        .skill(Recording::new("Medic", 1))
        .build();
    assert!(matches!(
        skills,
        Err(RuntimeError::Registry(RegistryError::DuplicateName(_)))
    ));

    let slots = builder(1)
        .reserved_slot(Recording::new("Welfare", 1), 0, true)
        .reserved_slot(Recording::new("Welfare", 1), 5, false)
        .build();
    assert!(matches!(slots, Err(RuntimeError::DuplicateSlot(ref name)) if name == "Welfare"));
}
