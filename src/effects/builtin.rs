//! Built-in effect definitions.
//!
//! A compact starter set covering each kind of definition the pipeline
//! handles: plain buffs, condition changes keyed by status name, the
//! per-level exhaustion entries, a nested choice, a composite effect and a
//! dynamic effect.

use super::change::{ChangeMode, EffectChange, EffectDuration};
use super::definition::EffectDefinition;

const ONE_MINUTE: u32 = 60;

/// All built-in definitions.
pub fn definitions() -> Vec<EffectDefinition> {
    let mut all = vec![
        bane(),
        bless(),
        blinded(),
        dodge(),
        enlarge(),
        reduce(),
        enlarge_reduce(),
        heroism(),
        prone(),
        rage(),
    ];
    all.extend(exhaustion_levels());
    all
}

fn bane() -> EffectDefinition {
    EffectDefinition::new("Bane")
        .with_description("Subtract 1d4 from all saving throws and attack rolls")
        .with_icon("icons/magic/control/debuff-energy-hold-levitate-pink.webp")
        .with_duration(EffectDuration::seconds(ONE_MINUTE))
        .with_changes([
            EffectChange::add("system.bonuses.abilities.save", "-1d4"),
            EffectChange::add("system.bonuses.msak.attack", "-1d4"),
            EffectChange::add("system.bonuses.mwak.attack", "-1d4"),
            EffectChange::add("system.bonuses.rsak.attack", "-1d4"),
            EffectChange::add("system.bonuses.rwak.attack", "-1d4"),
        ])
}

fn bless() -> EffectDefinition {
    EffectDefinition::new("Bless")
        .with_description("Add 1d4 to all saving throws and attack rolls")
        .with_icon("icons/magic/control/buff-flight-wings-blue.webp")
        .with_duration(EffectDuration::seconds(ONE_MINUTE))
        .with_changes([
            EffectChange::add("system.bonuses.abilities.save", "+1d4"),
            EffectChange::add("system.bonuses.msak.attack", "+1d4"),
            EffectChange::add("system.bonuses.mwak.attack", "+1d4"),
            EffectChange::add("system.bonuses.rsak.attack", "+1d4"),
            EffectChange::add("system.bonuses.rwak.attack", "+1d4"),
        ])
}

fn blinded() -> EffectDefinition {
    EffectDefinition::new("Blinded")
        .with_description("Disadvantage on attack rolls; attacks against have advantage")
        .with_changes([
            EffectChange::custom("flags.midi-qol.disadvantage.attack.all", "1"),
            EffectChange::custom("flags.midi-qol.grants.advantage.attack.all", "1"),
        ])
}

fn dodge() -> EffectDefinition {
    EffectDefinition::new("Dodge")
        .with_description("Attacks against have disadvantage; advantage on dexterity saves")
        .with_duration(EffectDuration::turns(1))
        .with_changes([
            EffectChange::custom("flags.midi-qol.grants.disadvantage.attack.all", "1"),
            EffectChange::custom("flags.midi-qol.advantage.ability.save.dex", "1"),
        ])
}

fn enlarge() -> EffectDefinition {
    EffectDefinition::new("Enlarge")
        .with_description("Advantage on strength checks and saves; weapons deal +1d4")
        .with_duration(EffectDuration::seconds(ONE_MINUTE))
        .with_changes([
            EffectChange::add("system.bonuses.mwak.damage", "+1d4"),
            EffectChange::custom("flags.midi-qol.advantage.ability.check.str", "1"),
            EffectChange::custom("flags.midi-qol.advantage.ability.save.str", "1"),
        ])
}

fn reduce() -> EffectDefinition {
    EffectDefinition::new("Reduce")
        .with_description("Disadvantage on strength checks and saves; weapons deal -1d4")
        .with_duration(EffectDuration::seconds(ONE_MINUTE))
        .with_changes([
            EffectChange::add("system.bonuses.mwak.damage", "-1d4"),
            EffectChange::custom("flags.midi-qol.disadvantage.ability.check.str", "1"),
            EffectChange::custom("flags.midi-qol.disadvantage.ability.save.str", "1"),
        ])
}

fn enlarge_reduce() -> EffectDefinition {
    EffectDefinition::new("Enlarge/Reduce")
        .with_description("Choose between Enlarge and Reduce")
        .with_nested(["Enlarge", "Reduce"])
}

fn heroism() -> EffectDefinition {
    EffectDefinition::new("Heroism")
        .with_description("Immune to being frightened; gains temporary hit points each turn")
        .with_duration(EffectDuration::seconds(ONE_MINUTE))
        .with_change(EffectChange::add("system.traits.ci.value", "frightened"))
        .with_sub_effect(
            EffectDefinition::new("Heroism: Temporary Hit Points")
                .with_description("Temporary hit points equal to the spellcasting modifier")
                .with_duration(EffectDuration::seconds(ONE_MINUTE))
                .with_change(EffectChange::new(
                    "system.attributes.hp.temp",
                    ChangeMode::Upgrade,
                    "@attributes.spellmod",
                )),
        )
}

fn prone() -> EffectDefinition {
    EffectDefinition::new("Prone")
        .with_description("Disadvantage on attack rolls; melee attacks against have advantage")
        .with_change(EffectChange::custom("flags.midi-qol.disadvantage.attack.all", "1"))
}

fn rage() -> EffectDefinition {
    EffectDefinition::new("Rage")
        .with_description("Bonus melee damage scaling with level; resistance to weapon damage")
        .with_duration(EffectDuration::seconds(ONE_MINUTE))
        .with_changes([
            EffectChange::add("system.traits.dr.value", "bludgeoning"),
            EffectChange::add("system.traits.dr.value", "piercing"),
            EffectChange::add("system.traits.dr.value", "slashing"),
        ])
        .dynamic()
}

fn exhaustion_levels() -> Vec<EffectDefinition> {
    let halved_speed =
        || EffectChange::new("system.attributes.movement.walk", ChangeMode::Multiply, "0.5");
    let check_disadvantage =
        || EffectChange::custom("flags.midi-qol.disadvantage.ability.check.all", "1");
    let roll_disadvantage = || {
        [
            EffectChange::custom("flags.midi-qol.disadvantage.attack.all", "1"),
            EffectChange::custom("flags.midi-qol.disadvantage.ability.save.all", "1"),
        ]
    };
    let halved_hp = || EffectChange::new("system.attributes.hp.max", ChangeMode::Multiply, "0.5");
    let no_speed = || EffectChange::overriding("system.attributes.movement.walk", "0").with_priority(60);

    vec![
        EffectDefinition::new("Exhaustion 1").with_change(check_disadvantage()),
        EffectDefinition::new("Exhaustion 2").with_changes([check_disadvantage(), halved_speed()]),
        EffectDefinition::new("Exhaustion 3")
            .with_changes([check_disadvantage(), halved_speed()])
            .with_changes(roll_disadvantage()),
        EffectDefinition::new("Exhaustion 4")
            .with_changes([check_disadvantage(), halved_speed(), halved_hp()])
            .with_changes(roll_disadvantage()),
        EffectDefinition::new("Exhaustion 5")
            .with_changes([check_disadvantage(), no_speed(), halved_hp()])
            .with_changes(roll_disadvantage()),
        EffectDefinition::new("Exhaustion 6").with_description("Death"),
    ]
}
