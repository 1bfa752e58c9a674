//! The misty forest: the stone path, the swamp, and the hidden path.

use kb_core::{Item, Location, Puzzle, StoryFlag};

use crate::choice::{Choice, Condition, Effect, Node, NodeId, PuzzleSpec, Transition};

/// All forest nodes.
pub fn nodes() -> Vec<Node> {
    vec![forest(), stone_path(), swamp(), hidden_path()]
}

fn forest() -> Node {
    Node::new(
        NodeId::Forest,
        "The Misty Forest",
        "\
The path splits three ways:

- THE OLD STONE PATH, symbols set into the ground, half lost in the fog
- THE SWAMP TRAIL, the sound of water, and of something moving in it
- A HIDDEN PATH, which only someone with a map could find",
    )
    .visits(Location::Forest)
    .establishing(
        StoryFlag::ForestFirstVisit,
        "\
You leave the village and step into the western forest. The fog grows
thicker with every step. Tall trees stand like the bones of rotting giants.
No animals. No wind. Only silence.

Deeper in, a voice calls your name. It is not human. It is the whisper of a
thousand shadows.

WHISPERS: \"Raven... come back... come back here...\"",
    )
    .with_choice(Choice::travel("Follow the old stone path", NodeId::StonePath))
    .with_choice(Choice::travel("Enter the swamp trail", NodeId::Swamp))
    .with_choice(
        Choice::travel("Follow the hidden path (you have the map)", NodeId::HiddenPath)
            .with_condition(Condition::HasItem(Item::TatteredNote)),
    )
    .with_choice(Choice::back("Return to the crossroads", Transition::Pop))
}

fn stone_path() -> Node {
    let node = Node::new(
        NodeId::StonePath,
        "The Old Stone Path",
        "\
The stones form a pattern, a symbol on each:

CIRCLE - \"Beginning\"    SQUARE - \"Structure\"
TRIANGLE - \"Balance\"    CROSS - \"End\"

The order of the stones reads: CIRCLE - CROSS - SQUARE - TRIANGLE

The fog begins to move. Shadows take shape from it and close in around you.

WHISPERS: \"Solve the puzzle... or we take you...\"",
    );

    PuzzleSpec::new(Puzzle::StoneSymbols, 1, 20)
        .answer("Order: Circle - Square - Triangle - Cross")
        .answer("Order: Circle - Triangle - Square - Cross")
        .answer("Order: Cross - Circle - Square - Triangle")
        .answer("Order: Circle - Square - Cross - Triangle")
        .narration(
            "\
You set the stones in the right order. The shadows stop, then burst back
into fog. Ahead, a strange light opens a way deeper into the forest.

On the ground lies an ancient PROTECTIVE CHARM. It feels warm in your hand.",
            "\
Wrong! The shadows lunge at you. You are just quick enough to break away,
but not unhurt.",
        )
        .reward(Effect::GiveItem(Item::ProtectiveCharm))
        .solved_to(Transition::GoTo(NodeId::Forest))
        .into_node(
            node,
            Vec::new(),
            "Step back to the fork",
            Transition::GoTo(NodeId::Forest),
        )
}

fn swamp() -> Node {
    Node::new(
        NodeId::Swamp,
        "The Swamp Trail",
        "\
The trail is slick and stinks of rot. Black water covers almost everything.
Something large moves beneath the surface, a long shadow under the water.

A rusty OLD KNIFE juts from the mud at your feet. Further out, something
glitters with a blue-green light: a FOREST ARTIFACT.",
    )
    .with_choice(
        Choice::new(
            "Take the old knife",
            "You take the knife. It feels steady in your hand. It may be useful in a fight.",
        )
        .with_effect(Effect::GiveItem(Item::OldKnife))
        .with_transition(Transition::GoTo(NodeId::Forest)),
    )
    .with_choice(
        Choice::new(
            "Take the forest artifact (risky)",
            "\
As you reach the artifact the water churns. Something huge drags you under!
You fight your way out, the artifact clutched in your hand.",
        )
        .with_effect(Effect::Damage(25))
        .with_effect(Effect::GiveItem(Item::ForestArtifact))
        .with_transition(Transition::GoTo(NodeId::Forest)),
    )
    .with_choice(
        Choice::new(
            "Take both",
            "\
You try for both. As you reach for the artifact, something pulls you down
with terrible strength. Water floods over you.",
        )
        .with_effect(Effect::Damage(35))
        .with_effect(Effect::GiveItem(Item::OldKnife))
        .with_effect(Effect::GiveItem(Item::ForestArtifact))
        .with_transition(Transition::GoTo(NodeId::Forest)),
    )
    .with_choice(Choice::back(
        "Back to the forest",
        Transition::GoTo(NodeId::Forest),
    ))
}

fn hidden_path() -> Node {
    Node::new(
        NodeId::HiddenPath,
        "The Hidden Path",
        "\
The map leads you between the great trees. The fog thins here, as if the
path were protected. At its end the fog parts on a wall of old stone, and on
it a long inscription:

\"We, the ancients, have closed the Gate.
Sealed it with blood and ritual,
that the Dweller shall not come out.
Each generation we choose one to be the ANCHOR.
The Anchor must remember their willingness,
yet to protect the world, memory must be erased.
Dusk Village is our ancient guard.
The ritual goes on. Without end. Forever.\"

You understand now why your memory was taken.",
    )
    .on_enter(Effect::SetFlag(StoryFlag::KnowsRitual))
    .on_enter(Effect::SetFlag(StoryFlag::KnowsNameOnWall))
    .on_enter(Effect::GiveItem(Item::RitualJournal))
    .with_choice(Choice::travel("Continue to the Ancient Ruins", NodeId::Ruins))
    .with_choice(Choice::back(
        "Back to the forest",
        Transition::GoTo(NodeId::Forest),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kb_core::{Fact, SessionState};

    fn hidden_route_count(state: &SessionState) -> usize {
        forest()
            .available_choices(state)
            .iter()
            .filter(|c| c.branches[0].transition == Transition::GoTo(NodeId::HiddenPath))
            .count()
    }

    #[test]
    fn hidden_path_needs_the_note() {
        let mut state = SessionState::new();
        assert_eq!(hidden_route_count(&state), 0);

        state.set(Fact::Item(Item::TatteredNote));
        assert_eq!(hidden_route_count(&state), 1);

        state.unset(Fact::Item(Item::TatteredNote));
        assert_eq!(hidden_route_count(&state), 0);
    }

    #[test]
    fn second_ordering_is_correct() {
        let path = stone_path();
        let correct = &path.choices[1].branches[0];
        assert!(correct.effects.contains(&Effect::SolvePuzzle(Puzzle::StoneSymbols)));
        assert!(correct.effects.contains(&Effect::GiveItem(Item::ProtectiveCharm)));
        for i in [0, 2, 3] {
            assert_eq!(path.choices[i].branches[0].effects, vec![Effect::Damage(20)]);
        }
    }

    #[test]
    fn stone_order_on_the_ground_is_a_decoy() {
        let path = stone_path();
        assert!(path.description.contains("CIRCLE - CROSS - SQUARE - TRIANGLE"));

        let state = SessionState::new();
        let correct = path.choices[1].resolve(&state).unwrap();
        assert!(correct.effects.contains(&Effect::SolvePuzzle(Puzzle::StoneSymbols)));
        assert!(!path.choices[1].label.to_uppercase().contains("CIRCLE - CROSS"));
    }

    #[test]
    fn hidden_path_reveals_on_entry() {
        let mut state = SessionState::new();
        let narration = hidden_path().enter(&mut state);
        assert!(state.has_flag(StoryFlag::KnowsRitual));
        assert!(state.has_flag(StoryFlag::KnowsNameOnWall));
        assert!(state.has_item(Item::RitualJournal));
        assert_eq!(narration.len(), 1);
    }
}
