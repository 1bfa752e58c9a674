//! The forgotten village and its four landmarks.

use kb_core::{Item, Location, Puzzle, StoryFlag};

use crate::choice::{Branch, Choice, Condition, Effect, Node, NodeId, PuzzleSpec, Transition};

/// All village nodes.
pub fn nodes() -> Vec<Node> {
    vec![square(), hall(), old_house(), dry_well(), bell_tower()]
}

fn square() -> Node {
    Node::new(
        NodeId::Village,
        "The Forgotten Village",
        "\
Four places in the village stand out:

- THE VILLAGE HALL, where the villagers gather
- THE LOCKED OLD HOUSE, a dark mansion at the edge of the village
- THE DRY WELL, an old well that looks very deep
- THE BELL TOWER, whose bell rings by itself every night",
    )
    .visits(Location::Village)
    .establishing(
        StoryFlag::VillageFirstVisit,
        "\
You decide to explore the village further. Old houses with dark windows
surround you.

The elder approaches with a strange smile that makes your skin crawl.

VILLAGE ELDER: \"Ah, Raven... you want to learn more about our little
village? Very well. There are things you should know.\"",
    )
    .with_choice(Choice::travel("Go to the village hall", NodeId::VillageHall))
    .with_choice(Choice::travel("Try the old house", NodeId::OldHouse))
    .with_choice(Choice::travel("Look into the dry well", NodeId::DryWell))
    .with_choice(Choice::travel("Climb the bell tower", NodeId::BellTower))
    .with_choice(Choice::back("Return to the crossroads", Transition::Pop))
}

fn hall() -> Node {
    Node::new(
        NodeId::VillageHall,
        "The Village Hall",
        "\
The hall is a large, old building. Inside, villagers sit in silence. They
all turn to watch you enter, thin smiles on their faces. Their eyes are
empty.

VILLAGER: \"Yes... he has come back. The ritual will begin soon.\"

VILLAGE ELDER: \"Is there something you wish to know, Raven? Or something
you wish to do?\"",
    )
    .with_choice(
        Choice::new(
            "Ask about the village and the ritual",
            "\
YOU: \"What do you mean by the ritual?\"

The elder laughs quietly.

VILLAGE ELDER: \"The ritual is how we keep the balance. There is something
beneath this village. Something old. Something hungry. We have given it
what it wants for centuries.\"

VILLAGER: \"You are our offering this year, Raven. Or rather, last year's.
You were not ready then. Now you are.\"",
        )
        .with_effect(Effect::SetFlag(StoryFlag::KnowsRitual))
        .with_transition(Transition::GoTo(NodeId::Village)),
    )
    .with_choice(
        Choice::new(
            "Ask who you really are",
            "\
YOU: \"Who am I? I cannot remember anything!\"

The elder is silent for a long time.

VILLAGE ELDER: \"You are the chosen one. You came here five years ago. You
saw something you should not have seen. So we...\"

The elder stops, as if having said too much.

VILLAGE ELDER: \"...we made you forget. For your own good. For everyone's.\"",
        )
        .with_effect(Effect::SetFlag(StoryFlag::MemoryStirring))
        .with_transition(Transition::GoTo(NodeId::Village)),
    )
    .with_choice(
        Choice::new(
            "Take the tattered note from the table",
            "\
On an old wooden table lies a damaged note, the ink faded. A rough sketch
of the land around the village covers its back.

\"August 27 - Something is wrong with the bell. It rings louder. More fog.\"
\"September 2 - They say someone will come to 'save' us.\"
\"September 15 - THE SECRET MUST STAY HIDDEN. FOR EVERYONE'S SAFETY.\"

The rest is torn away.",
        )
        .with_effect(Effect::GiveItem(Item::TatteredNote))
        .with_transition(Transition::GoTo(NodeId::Village)),
    )
    .with_choice(Choice::back(
        "Leave the hall",
        Transition::GoTo(NodeId::Village),
    ))
}

const HOUSE_OPENS: &str = "\
Inside, a dark room with shelves of dusty books. On the table lie an old
FOLDED MAP and a small RUSTY KEY.

The map shows:
- the Misty Forest (west)
- the Ancient Ruins (south)
- the Forbidden Cave (underground)";

/// The old house door puzzle.
///
/// Solving it and using the rusty key are the same transition: the door
/// puzzle is completed and the key and the note (which doubles as the map)
/// are granted. Both can be repeated without effect.
fn old_house() -> Node {
    let spec = PuzzleSpec::new(Puzzle::DoorSymbol, 2, 15)
        .answer("Press the Moon symbol (darkness)")
        .answer("Press the Sun symbol (light)")
        .answer("Press the Triangle symbol (balance)")
        .narration(
            format!(
                "You press the Balance symbol. What follows is... peace. The whispers \
                 stop, and the door swings open with a soothing sound.\n\n{HOUSE_OPENS}"
            ),
            "\
A terrible sound, like a thousand voices howling at once. The door shakes
and dark fog bursts through the cracks, throwing you back.

That was not the right answer.",
        )
        .reward(Effect::GiveItem(Item::RustyKey))
        .reward(Effect::GiveItem(Item::TatteredNote))
        .solved_to(Transition::GoTo(NodeId::Village));

    let use_key = Choice::branching(
        "Use the rusty key",
        vec![spec.solved_branch(format!(
            "You slide the rusty key into the slot. With a grinding creak the door \
             opens.\n\n{HOUSE_OPENS}"
        ))],
    )
    .with_condition(Condition::HasItem(Item::RustyKey));

    let node = Node::new(
        NodeId::OldHouse,
        "The Locked Old House",
        "\
This house looks older than the rest. The door is locked with rusted chains
and the windows are thick with dust. Pressing your ear to the door, you hear
whispers:

\"...don't let him in... don't let him remember... the fog must stay thick...\"

Three symbols are carved into the wood of the door: a Moon, a Sun, and a
Triangle. This looks like a puzzle.",
    )
    .visits(Location::OldHouse)
    .with_aside(
        Condition::HasItem(Item::RustyKey),
        "You have the RUSTY KEY. It might work here.",
    );

    spec.into_node(
        node,
        vec![use_key],
        "Back to the village",
        Transition::GoTo(NodeId::Village),
    )
}

fn dry_well() -> Node {
    Node::new(
        NodeId::DryWell,
        "The Dry Well",
        "\
The well is very old, its walls cracked. You drop a pebble in. No sound
comes back, as if the well had no bottom. Yet far below, a strange light
glimmers in an unnatural colour.

An old rope is coiled at the rim. Beside the well, an OLD TORCH lies in the
grass. It still looks usable.",
    )
    .visits(Location::Well)
    .with_choice(
        Choice::new(
            "Take the old torch",
            "You take the torch. Old as it is, its flame still burns a warm orange.",
        )
        .with_effect(Effect::GiveItem(Item::Torch))
        .with_transition(Transition::GoTo(NodeId::Village)),
    )
    .with_choice(
        Choice::new(
            "Climb down into the well (risky)",
            "\
You take the rope and start down. Darker. Darker still. Voices begin to
whisper your name, over and over.

RAVEN... RAVEN... RAVEN...

You panic and scramble back up, heart pounding.",
        )
        .with_effect(Effect::Damage(20))
        .with_transition(Transition::GoTo(NodeId::Village)),
    )
    .with_choice(Choice::back(
        "Back to the village",
        Transition::GoTo(NodeId::Village),
    ))
}

fn bell_tower() -> Node {
    Node::new(
        NodeId::BellTower,
        "The Bell Tower",
        "\
With every step up the tower the bell grows louder. It does not sound
normal. It sounds like weeping. Like a warning. Like a prayer.

At the top, the great bell swings by itself, without wind, without a hand.
Each time it rings, something answers from deep underground.

Beneath the bell a complex ritual symbol is drawn, and dates are carved into
an old board, each one crossed out:

1823, 1856, 1892, 1934, 1973, 2018, 2023",
    )
    .visits(Location::BellTower)
    .with_choice(Choice::branching(
        "Study the ritual symbols (requires knowledge)",
        vec![
            Branch::new(
                "\
You understand now: these dates are the ritual's cycle. Every fifty or sixty
years it is repeated, and each time someone is chosen.

And you... you are the chosen one this time.

The symbol beneath the bell is the mark of the Gatekeeper, the thing this
village has guarded for centuries.",
            )
            .when(Condition::FlagSet(StoryFlag::KnowsRitual))
            .with_effect(Effect::SolvePuzzle(Puzzle::AncientScript)),
            Branch::new(
                "These symbols are too complex for you to understand yet. \
                 You need more information.",
            ),
        ],
    ))
    .with_choice(
        Choice::new(
            "Try to stop the bell",
            "\
As your hand touches the bell, a tongue of blue fire leaps from its surface
and throws you back.

The bell cannot be stopped. The ritual is stronger than you.",
        )
        .with_effect(Effect::Damage(25)),
    )
    .with_choice(Choice::back(
        "Climb down and leave the tower",
        Transition::GoTo(NodeId::Village),
    ))
}
