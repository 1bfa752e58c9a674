//! Closing narration.

/// Strengthen the seal.
pub const REINFORCE: &str = "\
ENDING: SACRIFICE FOR SAFETY

You make your decision. You will not let the world fall to that creature.
You will not let more villages be bound.

You shape a stronger ritual, drawing on the artifacts you gathered and on
the strength of every anchor before you. The light becomes blinding.

DWELLER: \"No... not like this... RAVEN!\"

The new seal is far stronger than the old. The Dweller sinks deeper, further
away. Perhaps forever. But the price is your life. Your body begins to glow
as you become part of the seal, the final anchor, the strongest of them all.

As your awareness fades, you hear the elder:

VILLAGE ELDER: \"Raven has given themself. The village is safe. The ritual
will go on, but safer now.\"

The village is saved, but you are gone from the world. One day another will
be chosen, with the same chance you had.";

/// Break the seal.
pub const RELEASE: &str = "\
ENDING: THE GATE OPENS

Pity for a creature bound for centuries overwhelms your judgement. You
break the seal.

DWELLER: \"AT LAST! AT LAST WE ARE FREE!\"

The creature bursts out in a storm of energy. The cave shakes and stones
fall. You run, but you are already too weak, and as you fall you see that
behind the Dweller there are more. Thousands. Millions. All of them coming
out.

You wake in your house in the village, but everything has changed. The fog
that once ringed the village now spreads everywhere. Strange creatures
roam. Word comes from the neighbouring towns: the same is happening there.
And there. And there.

You opened the gate not for one creature but for everything behind it. The
world is ending.";

/// Walk away.
pub const ABSTAIN: &str = "\
ENDING: FATE DEFERRED

You make no choice at all. You leave the Dweller alone in the dark.

DWELLER: \"You will not choose? How can that be...\"

You walk out of the cave, out of the ruins, out of the misty forest, back to
the village. Everything is as it was. The villagers still sit in the hall,
smiling their strange smiles.

VILLAGE ELDER: \"Then the village will wait. Until you are ready. Or until
the next chosen one comes.\"

Days pass. Weeks. Years. You stay, and become like the other villagers. But
you know the truth now.

One day someone new arrives, lost in the fog. The elder smiles.

VILLAGE ELDER: \"I believe the time has come, Raven. For the next
generation.\"

The cycle repeats.";

/// Rewrite the ritual.
pub const TRANSCEND: &str = "\
SECRET ENDING: BREAKING THE CYCLE

You have gathered every ancient artifact. You have solved every riddle. You
are still alive. You are ready.

You set the three artifacts before the Dweller. Their light joins and
shines as one.

DWELLER: \"What is this? What are you doing?\"

You begin a different ritual, one built not on sacrifice but on
understanding. You touch the Dweller with your bare hand. Not an attack.
Not a prison. A connection.

Memories flow: of the world before the seal, of a lost civilisation, of
love and hope and trust long gone. You understand the Dweller now, not as
an enemy but as something lonely that forgot who it was.

YOU: \"Because I forgot too. But now I remember.\"

Your memory returns. All of it. You are the Raven of five years ago, the one
who saw the truth and had it taken away.

The seal is neither broken nor strengthened. It becomes a door that opens
both ways. Dusk Village is freed from its sacrifices, and you and the
Dweller become envoys between two worlds.

The ritual is over. The cycle is broken.";

/// The attempt at the secret ending failed.
pub const REJECTED: &str = "\
You try to shape a new ritual, but... your artifacts are not enough, your
knowledge incomplete, your body too weak.

The light explodes. You are thrown back hard and your awareness fades.

When you come to, the Dweller is still waiting. You must decide again:
strengthen, break, or walk away? Or prepare better and try once more.";

/// Health ran out outside of combat.
pub const FALLEN: &str = "\
Your strength gives out. The fog closes over you, and this time it does not
let you go.

Your journey ends here.";
