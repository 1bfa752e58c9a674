//! The ancient ruins and the shadow guarding the altar.

use kb_core::{Item, Location, StoryFlag};
use kb_mechanics::Foe;

use crate::choice::{Choice, EncounterId, Effect, Node, NodeId, Transition};
use crate::graph::Encounter;

/// All ruins nodes.
pub fn nodes() -> Vec<Node> {
    vec![ruins()]
}

/// The fight for the ruins artifact.
pub fn shadow() -> Encounter {
    Encounter {
        id: EncounterId::Shadow,
        foe: Foe::new("Shadow Creature", 50),
        victory: "\
You have beaten the shadow creature!

With trembling hands you take the RUINS ARTIFACT."
            .to_string(),
        rewards: vec![Effect::GiveItem(Item::RuinsArtifact)],
        fled: "You stumble back from the altar. The shadow sinks into the floor, waiting."
            .to_string(),
        defeat: "\
You fall. Your awareness fades.

But you do not die. You wake again in the ruins, the same place, the same
moment. Is this part of the ritual? Can you even die in this world?"
            .to_string(),
    }
}

fn ruins() -> Node {
    Node::new(
        NodeId::Ruins,
        "The Ancient Ruins",
        "\
The ruins are vast. You read the words on the walls:

\"The Dweller's Gate\"
\"Do Not Open Before Its Time\"
\"Those Who Sacrifice Shall Be Chosen\"

There are several areas to explore:

- THE MAIN HALL, an altar holding the RUINS ARTIFACT
- THE LIBRARY, full of ancient writing
- THE LOWER CHAMBER, deeper beneath the ruins",
    )
    .visits(Location::Ruins)
    .establishing(
        StoryFlag::RuinsFirstVisit,
        "\
You head south of the village. Along a path hidden among the trees you find
ancient ruins: old buildings still standing proud despite their decay,
strange symbols carved into every corner. A strange moonlight shines down
through the fog.

You feel you have been here before, but you cannot remember when.",
    )
    .with_choice(
        Choice::new(
            "Take the ruins artifact from the altar",
            "\
As you touch the artifact the ritual symbols flare red. Something grips you
from below, and a shadow creature rises out of the floor!

SHADOW: \"NO! THIS ARTIFACT IS NOT YOURS!\"",
        )
        .with_transition(Transition::EnterCombat(EncounterId::Shadow)),
    )
    .with_choice(
        Choice::new(
            "Study the writing in the library",
            "\
The ritual symbols here describe a procession of sacrifice:

1. SELECTION - one person is chosen
2. EXILE - they are isolated and their memory erased
3. RETURN - they are brought back to the village
4. TRANSITION - at the height of the ritual they become the \"anchor\"
   between the real world and the sealed gate

On another wall:

\"THE NAMES OF THE CHOSEN THROUGHOUT HISTORY:
1823 - Elara Nightwhisper
1856 - Marcus Stone
1892 - Vera Blackwood
1934 - Samuel Cross
1973 - Catherine Veil
2018 - Raven...
2023 - YET TO COME\"

Your name is on the list. Something cold wraps around your heart.",
        )
        .with_effect(Effect::SetFlag(StoryFlag::KnowsRitual))
        .with_effect(Effect::SetFlag(StoryFlag::KnowsNameOnWall)),
    )
    .with_choice(
        Choice::new(
            "Explore the lower chamber",
            "\
You descend beneath the ruins. The way narrows and the light fades. In a
hollow below, an unnatural light glows, and beside it lies a RITUAL
JOURNAL, an old book full of notes about the ritual and its sacrifices.

Reading it, you begin to grasp how serious all of this is.",
        )
        .with_effect(Effect::GiveItem(Item::RitualJournal))
        .with_effect(Effect::SetFlag(StoryFlag::KnowsRitual)),
    )
    .with_choice(Choice::back("Return to the crossroads", Transition::Pop))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn altar_starts_the_shadow_fight() {
        let node = ruins();
        assert_eq!(
            node.choices[0].branches[0].transition,
            Transition::EnterCombat(EncounterId::Shadow)
        );
        assert!(node.choices[0].branches[0].effects.is_empty());
    }

    #[test]
    fn shadow_guards_the_artifact() {
        let encounter = shadow();
        assert_eq!(encounter.foe.health, 50);
        assert_eq!(encounter.rewards, vec![Effect::GiveItem(Item::RuinsArtifact)]);
    }
}
