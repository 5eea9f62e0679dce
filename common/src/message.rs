use rand::seq::SliceRandom;
use rand::Rng;

/// Canned messages offered by the "Generate New" button.
pub const SUGGESTED_MESSAGES: [&str; 5] = [
    "Wishing you a day filled with joy, laughter, and all the things that make you smile! Happy Birthday! 🎉",
    "May your birthday be as wonderful and special as you are! Here's to another amazing year ahead! 🎂",
    "Sending you the biggest birthday wishes! May your day be filled with love, happiness, and everything your heart desires! ✨",
    "Happy Birthday! May this year bring you endless opportunities, beautiful moments, and dreams come true! 🌟",
    "On your special day, I hope you feel surrounded by love and joy. Happy Birthday! 🎈",
];

/// Pick a suggested message at random.
pub fn suggest_message<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    SUGGESTED_MESSAGES
        .choose(rng)
        .copied()
        .unwrap_or(SUGGESTED_MESSAGES[0])
}
