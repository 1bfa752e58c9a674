//! The forbidden cave and the dweller's chamber.

use kb_core::{Item, Location, StoryFlag};

use crate::choice::{Branch, Choice, Condition, Effect, Node, NodeId, Transition};
use crate::ending::Ending;

/// The cave and the climax.
pub fn nodes() -> Vec<Node> {
    vec![cave(), climax()]
}

fn cave() -> Node {
    Node::new(
        NodeId::Cave,
        "The Forbidden Cave",
        "\
The cave walls are covered in carvings: thousands of names, everyone chosen
throughout history. Among them you find your own:

RAVEN - 2023

The deeper you go, the louder the whispers. At last you reach a great
chamber. At its centre burns a light so bright it threatens your soul.",
    )
    .visits(Location::Cave)
    .establishing(
        StoryFlag::CaveFirstVisit,
        "\
You leave the village toward the dark north. The fog thickens and the
whispers grow louder. At last you find a great opening in the ground, a
mysterious cave with a strange light shining from within.

Something inside feels... alive. It feels like it is watching you.",
    )
    .with_choice(Choice::travel(
        "Approach the light and meet the Dweller",
        NodeId::Climax,
    ))
    .with_choice(Choice::branching(
        "Shield yourself with the torch and take the core artifact",
        vec![
            Branch::new(
                "\
The orange torchlight meets the strange light from the centre of the cave,
and for a moment the glare falls away. There, in the middle of the chamber,
lies the CORE ARTIFACT, the source of the light.

Carefully you take it. Its energy is immense.",
            )
            .when(Condition::HasItem(Item::Torch))
            .with_effect(Effect::GiveItem(Item::CoreArtifact)),
            Branch::new(
                "You have no torch to shield yourself. The light is blinding and painful!",
            )
            .with_effect(Effect::Damage(15)),
        ],
    ))
    .with_choice(
        Choice::new(
            "Read the writing on the cave wall",
            "\
\"THIS IS THE GATE. THE GATE TO ANOTHER WORLD.

Beyond it dwells the one we call the DWELLER AT THE GATE, older than our
civilisation, older than this world.

We have sealed it with ritual and sacrifice. Each generation we take one
anchor, someone who can feel both worlds, to keep the seal strong.

But... there is a way to break the cycle.
There is a way to free the Dweller.
There is a way to free oneself.

The answer lies in the heart of the chosen.
The answer lies in the choice they make.\"

You understand now. Everything depends on your choice.",
        )
        .with_effect(Effect::SetFlag(StoryFlag::KnowsRitual)),
    )
    .with_choice(Choice::back("Return to the crossroads", Transition::Pop))
}

fn ending_choice(label: &str, ending: Ending) -> Choice {
    Choice::new(label, "").with_transition(Transition::Terminal(ending))
}

/// The climax. Offers the four endings and nothing else.
fn climax() -> Node {
    Node::new(
        NodeId::Climax,
        "The Heart of the Mystery",
        "\
The Dweller waits before you, a shadow with a soul.

DWELLER: \"I can feel your decision. I am waiting.\"

Four choices. Each will change the fate of this village. Your fate. The
fate of this world.",
    )
    .visits(Location::Core)
    .establishing(
        StoryFlag::MetEntity,
        "\
The light begins to change shape. Brightness becomes silhouette, silhouette
becomes a creature, not wholly real.

DWELLER: \"At last... at last you have come, Raven. I have waited for
centuries behind the seal, hearing the whispers of a thousand anchors. But
you are different. You have a chance to make a choice never made before.\"",
    )
    .with_choice(ending_choice(
        "Strengthen the seal (the village is saved, you are lost)",
        Ending::Reinforce,
    ))
    .with_choice(ending_choice(
        "Break the seal completely (the world is in danger)",
        Ending::Release,
    ))
    .with_choice(ending_choice(
        "Walk away without choosing (the next generation waits)",
        Ending::Abstain,
    ))
    .with_choice(ending_choice(
        "Change the ritual (needs every artifact)",
        Ending::Transcend,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kb_core::{Fact, SessionState};

    #[test]
    fn core_artifact_needs_the_torch() {
        let cave = cave();
        let take = &cave.choices[1];
        let mut state = SessionState::new();
        assert_eq!(take.resolve(&state).unwrap().effects, vec![Effect::Damage(15)]);

        state.set(Fact::Item(Item::Torch));
        assert_eq!(
            take.resolve(&state).unwrap().effects,
            vec![Effect::GiveItem(Item::CoreArtifact)]
        );
    }

    #[test]
    fn entering_the_climax_marks_the_meeting() {
        let mut state = SessionState::new();
        climax().enter(&mut state);
        assert!(state.has_flag(StoryFlag::MetEntity));
        assert!(state.has(Fact::Visited(Location::Core)));
    }
}
