//! The crossroads the player returns to between expeditions.

use crate::choice::{Choice, Node, NodeId, Transition};

/// The root node.
pub fn crossroads() -> Node {
    Node::new(
        NodeId::Hub,
        "Dusk Village",
        "\
You stand in Dusk Village. Thick fog surrounds you, and several paths lead
away into it. Each one promises a different kind of trouble.

CHOOSE WHERE TO EXPLORE:",
    )
    .with_choice(Choice::travel(
        "Explore the village (hall, house, well, bell tower)",
        NodeId::Village,
    ))
    .with_choice(Choice::travel("Head into the Misty Forest (west)", NodeId::Forest))
    .with_choice(Choice::travel("Head to the Ancient Ruins (south)", NodeId::Ruins))
    .with_choice(Choice::travel(
        "Descend to the Forbidden Cave (underground)",
        NodeId::Cave,
    ))
    .with_choice(Choice::back("Return to the main menu", Transition::Pop))
}
