//! Canned drawing feedback.
//!
//! There is no real judging: results are drawn at random from a fixed set.

use crate::notify::{Notification, NotificationLevel};
use crate::random::SplitMix32;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    /// Out of 100.
    pub score: u32,
    pub category: &'static str,
    pub feedback: &'static str,
    pub tips: [&'static str; 3],
    /// Emoji mascot shown next to the result.
    pub character: &'static str,
}

impl Evaluation {
    /// Stars out of five.
    pub fn stars(&self) -> u32 {
        self.score.div_ceil(20)
    }
}

pub static EVALUATIONS: [Evaluation; 5] = [
    Evaluation {
        score: 95,
        category: "Masterpiece! 🎨",
        feedback: "Wow! Your creativity is absolutely amazing! The colors and shapes work perfectly together!",
        tips: [
            "Try adding more details",
            "Experiment with gradients",
            "Add some background elements",
        ],
        character: "🎨👨‍🎨",
    },
    Evaluation {
        score: 85,
        category: "Excellent Work! ⭐",
        feedback: "Great job! Your drawing shows real artistic talent. The composition is very nice!",
        tips: [
            "Add more contrast",
            "Try different brush sizes",
            "Consider symmetry",
        ],
        character: "🌟😊",
    },
    Evaluation {
        score: 75,
        category: "Good Effort! 👍",
        feedback: "Nice work! You're getting better at this. Keep practicing and you'll improve even more!",
        tips: [
            "Practice basic shapes",
            "Use more colors",
            "Try drawing from life",
        ],
        character: "👍😄",
    },
    Evaluation {
        score: 65,
        category: "Keep Going! 💪",
        feedback: "You're on the right track! Every artist starts somewhere. Keep drawing and having fun!",
        tips: [
            "Start with simple shapes",
            "Practice daily",
            "Watch drawing tutorials",
        ],
        character: "💪🎯",
    },
    Evaluation {
        score: 50,
        category: "Practice Makes Perfect! 🌱",
        feedback: "Great start! Remember, even Picasso had to start somewhere. Keep experimenting!",
        tips: [
            "Focus on one shape at a time",
            "Use the grid for guidance",
            "Don't be afraid to make mistakes",
        ],
        character: "🌱📚",
    },
];

/// Ratings a submission can receive. Four is never handed out.
pub const RATINGS: [u8; 9] = [1, 2, 3, 5, 6, 7, 8, 9, 10];

/// Outcome of submitting a drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rating(pub u8);

impl Rating {
    /// Toast for this rating, tiered at 3 and 7.
    pub fn notification(self) -> Notification {
        let (level, verdict) = match self.0 {
            0..=3 => (NotificationLevel::Error, "Keep practicing!"),
            4..=7 => (NotificationLevel::Info, "Good effort!"),
            _ => (NotificationLevel::Success, "Amazing work!"),
        };
        let message = format!("Rating: {}/10 - {}", self.0, verdict);
        match level {
            NotificationLevel::Error => Notification::error(message),
            NotificationLevel::Info => Notification::info(message),
            NotificationLevel::Success => Notification::success(message),
        }
    }

    /// Headline shown with the rating.
    pub fn headline(self) -> &'static str {
        match self.0 {
            0..=3 => "Keep Practicing! 😅",
            4..=7 => "Good Work! 👍",
            _ => "Amazing Art! 🎨",
        }
    }
}

/// Hands out canned evaluations and ratings.
#[derive(Debug, Clone)]
pub struct Evaluator {
    rng: SplitMix32,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self {
            rng: SplitMix32::from_fresh_seed(),
        }
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: u32) -> Self {
        Self {
            rng: SplitMix32::new(seed),
        }
    }

    pub fn evaluate(&mut self) -> &'static Evaluation {
        &EVALUATIONS[self.rng.index(EVALUATIONS.len())]
    }

    pub fn rate(&mut self) -> Rating {
        Rating(RATINGS[self.rng.index(RATINGS.len())])
    }
}
