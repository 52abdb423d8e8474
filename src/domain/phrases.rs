use uuid::Uuid;

use super::mood::Mood;

const MOTIVATED_QUOTES: [&str; 5] = [
    "The only way to do great work is to love what you do.",
    "Success is not final, failure is not fatal: It is the courage to continue that counts.",
    "Believe you can and you're halfway there.",
    "Your limitation, it's only your imagination.",
    "Push yourself, because no one else is going to do it for you.",
];

const FEELING_LOW_QUOTES: [&str; 5] = [
    "This too shall pass.",
    "You don't have to be positive all the time. It's perfectly okay to feel sad, angry, or frustrated.",
    "Even the darkest night will end and the sun will rise.",
    "Be gentle with yourself. You're doing the best you can.",
    "Sometimes the bravest thing you can do is rest.",
];

const ENERGIZED_QUOTES: [&str; 5] = [
    "Your energy introduces you before you even speak.",
    "Life is like riding a bicycle. To keep your balance, you must keep moving.",
    "The higher your energy level, the more efficient your body. The better you feel.",
    "Energy and persistence conquer all things.",
    "Positive energy knows no boundaries.",
];

const LAZY_QUOTES: [&str; 5] = [
    "Sometimes doing nothing is everything.",
    "Rest is not idleness, and to lie sometimes on the grass under trees on a summer's day is by no means a waste of time.",
    "The time you enjoy wasting is not wasted time.",
    "Take a break. You deserve it.",
    "Embrace the pace of your own journey.",
];

const FOCUSED_QUOTES: [&str; 5] = [
    "Concentrate all your thoughts upon the work in hand.",
    "Where focus goes, energy flows.",
    "The successful warrior is the average person, with laser-like focus.",
    "It's not that I'm so smart, it's just that I stay with problems longer.",
    "Focus on the journey, not the destination.",
];

const CREATIVE_QUOTES: [&str; 5] = [
    "Creativity is intelligence having fun.",
    "You can't use up creativity. The more you use, the more you have.",
    "Creativity involves breaking out of established patterns in order to look at things in a different way.",
    "Every child is an artist. The problem is how to remain an artist once we grow up.",
    "Creativity takes courage.",
];

const AFFIRMATIONS: [&str; 10] = [
    "Great job! Keep up the momentum.",
    "One step closer to your goals!",
    "You're making real progress.",
    "Nice work, that's one off the list!",
    "Every completed task counts.",
    "You showed up and got it done.",
    "Small wins add up to big results.",
    "Well done! Take a breath and enjoy it.",
    "That's how it's done!",
    "Progress, not perfection. Nicely done.",
];

/// Pick a pseudo-random index in `0..len` (0 for empty slices)
pub fn random_index(len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (Uuid::new_v4().as_u128() % len as u128) as usize
}

pub fn quotes_for(mood: Mood) -> &'static [&'static str] {
    match mood {
        Mood::Motivated => &MOTIVATED_QUOTES,
        Mood::FeelingLow => &FEELING_LOW_QUOTES,
        Mood::Energized => &ENERGIZED_QUOTES,
        Mood::Lazy => &LAZY_QUOTES,
        Mood::Focused => &FOCUSED_QUOTES,
        Mood::Creative => &CREATIVE_QUOTES,
    }
}

pub fn random_quote(mood: Mood) -> &'static str {
    let quotes = quotes_for(mood);
    quotes[random_index(quotes.len())]
}

pub fn random_affirmation() -> &'static str {
    AFFIRMATIONS[random_index(AFFIRMATIONS.len())]
}

/// Greeting for an hour of the day (0-23)
pub fn time_greeting(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Good Morning",
        12..=16 => "Good Afternoon",
        17..=20 => "Good Evening",
        _ => "Good Night",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_greeting_boundaries() {
        assert_eq!(time_greeting(4), "Good Night");
        assert_eq!(time_greeting(5), "Good Morning");
        assert_eq!(time_greeting(11), "Good Morning");
        assert_eq!(time_greeting(12), "Good Afternoon");
        assert_eq!(time_greeting(16), "Good Afternoon");
        assert_eq!(time_greeting(17), "Good Evening");
        assert_eq!(time_greeting(20), "Good Evening");
        assert_eq!(time_greeting(21), "Good Night");
        assert_eq!(time_greeting(0), "Good Night");
    }

    #[test]
    fn test_every_mood_has_five_quotes() {
        for mood in Mood::all() {
            assert_eq!(quotes_for(*mood).len(), 5);
        }
    }

    #[test]
    fn test_random_index_in_range() {
        assert_eq!(random_index(0), 0);
        for _ in 0..50 {
            assert!(random_index(3) < 3);
        }
        assert!(AFFIRMATIONS.contains(&random_affirmation()));
    }
}
