//! The built-in story, "Whispers from the Fog".
//!
//! Each submodule builds the nodes for one region. [`story`] assembles them
//! into the graph the CLI plays.

pub mod cave;
pub mod endings;
pub mod forest;
pub mod hub;
pub mod ruins;
pub mod village;

use crate::choice::NodeId;
use crate::graph::StoryGraph;

/// Title shown before the prologue.
pub const TITLE: &str = "WHISPERS FROM THE FOG";

/// Narration presented once when a session starts.
pub const PROLOGUE: &str = "\
Your eyes open in darkness.

Your head burns and your memory is a blur. You do not know who you are or
how you came here. There is only fog, thick fog covering everything.

Slowly your sight returns. Old houses. An empty road. A village nearly
abandoned. The sky is grey: no sun, no birds, only a pressing silence.

A bell tolls softly from a distant tower. The sound feels wrong, as if
it were calling you.

A figure approaches through the fog, old, its face hidden in shadow.

VILLAGE ELDER: \"Oh... you are awake. We have been waiting for you. Your
name is Raven. You have slept a long time. You are home, Raven. In Dusk
Village. The place where everything ends.\"

The fog thickens. The air turns cold. Something here is very wrong.";

/// Assemble the full story graph.
pub fn story() -> StoryGraph {
    let mut graph = StoryGraph::new(NodeId::Hub).with_node(hub::crossroads());
    for node in village::nodes()
        .into_iter()
        .chain(forest::nodes())
        .chain(ruins::nodes())
        .chain(cave::nodes())
    {
        graph = graph.with_node(node);
    }
    graph.with_encounter(ruins::shadow())
}
