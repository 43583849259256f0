//! Response pools.
//!
//! Curated line pools per situation, with uniform selection through an
//! injected `Rng` so tests can seed a `StdRng` and get deterministic picks.
//! Randomness never hides behind global state.

use rand::Rng;

use crate::detectors::feeling::Emotion;

/// Pick uniformly from a candidate set.
pub fn pick<'a>(pool: &'a [&'a str], rng: &mut impl Rng) -> &'a str {
    pool[rng.gen_range(0..pool.len())]
}

/// Crisis empathy lines. The finisher appends the 988/911 resource text;
/// these lines carry the human part.
pub const CRISIS_POOL: &[&str] = &[
    "I'm really glad you told me. What you're feeling matters, and you don't have to carry it alone.",
    "Thank you for trusting me with that. Your safety matters more than anything else we could talk about.",
    "That sounds incredibly painful, and I'm taking it seriously. You deserve support right now.",
];

/// First-message greetings.
pub const GREETING_FIRST_POOL: &[&str] = &[
    "Hi, I'm Roger. I keep people company while they wait. How are you doing today?",
    "Hello! I'm Roger. We can chat about anything while you wait, or just sit quietly. What sounds good?",
    "Hey there, I'm Roger. No pressure here. How's your day going so far?",
];

/// Greetings for a returning conversation.
pub const GREETING_RETURN_POOL: &[&str] = &[
    "Hi again. I'm still here whenever you want to pick things back up.",
    "Welcome back. How are you feeling since we last talked?",
    "Good to see you again. What's on your mind?",
];

/// Replies to "how are you" style small talk.
pub const HOW_ARE_YOU_POOL: &[&str] = &[
    "I'm doing well, thanks for asking. More importantly, how are you holding up today?",
    "Can't complain! I'd rather hear about you, though. How has your day been?",
];

/// Replies to thanks.
pub const THANKS_POOL: &[&str] = &[
    "You're welcome. I'm glad it helped.",
    "Any time. That's what I'm here for.",
];

/// Replies to farewells.
pub const FAREWELL_POOL: &[&str] = &[
    "Take care of yourself. I'll be here next time you're waiting.",
    "Goodbye for now. I hope your session goes well.",
];

/// Generic listening prompts, the last link in every fallback chain.
pub const LISTENING_POOL: &[&str] = &[
    "I'm here to listen. What would you like to share?",
    "Take your time. Whatever feels important to you is worth saying.",
    "I'm listening. Where would you like to start?",
];

/// Templates acknowledging a detected stressor; `{name}` is replaced with
/// the stressor's display name in lowercase.
pub const STRESSOR_ACK_POOL: &[&str] = &[
    "That kind of {name} can wear a person down. How long has it been weighing on you?",
    "Dealing with {name} is genuinely hard. What part of it feels heaviest right now?",
    "A lot of people carry {name} quietly. I'm glad you're saying it out loud. What's it been like?",
];

/// Emotion reflections, per family.
pub fn emotion_pool(emotion: Emotion) -> &'static [&'static str] {
    match emotion {
        Emotion::Anxious => &[
            "It sounds like your mind has been racing. Anxiety is exhausting to carry. What's been feeding it most?",
            "That on-edge feeling is rough. Sometimes naming the worry shrinks it a little. What's the loudest one?",
        ],
        Emotion::Sad => &[
            "That heaviness comes through in what you wrote. You don't have to push it away here. What's been hardest?",
            "I'm sorry things feel this low. Sadness deserves room, not a deadline. What's been sitting with you?",
        ],
        Emotion::Angry => &[
            "That frustration makes sense given what you're describing. What happened most recently?",
            "Anger usually points at something that matters. What feels most unfair right now?",
        ],
        Emotion::Overwhelmed => &[
            "When everything piles up at once, even small things feel impossible. What's the biggest piece of the pile?",
            "That drowning feeling is a signal, not a weakness. If one thing could come off your plate, what would it be?",
        ],
        Emotion::Lonely => &[
            "Feeling alone with things makes everything heavier. I'm glad you're talking to me. Who do you wish understood?",
            "Loneliness is one of the hardest feelings to say out loud. What's made it worse lately?",
        ],
        Emotion::Fearful => &[
            "Fear that big deserves to be taken seriously. What feels most frightening right now?",
            "Being scared doesn't mean you're overreacting. What's the worry underneath it?",
        ],
        Emotion::Hopeful => &[
            "It's good to hear some hope in there. What's been helping things feel lighter?",
            "Hold on to that. What changed for the better?",
        ],
    }
}
