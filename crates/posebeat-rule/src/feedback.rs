use posebeat_config::FeedbackConfig;
use posebeat_model::Rgb;

use crate::Judgement;

/// Height above the target center where judgement text appears.
const TEXT_RISE: f32 = 60.0;

/// Floating judgement text. Purely visual; game logic never reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackMessage {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub color: Rgb,
    pub remaining: u32,
}

impl FeedbackMessage {
    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }
}

/// Short-lived judgement texts, aged once per tick.
#[derive(Debug, Clone, Default)]
pub struct FeedbackQueue {
    config: FeedbackConfig,
    messages: Vec<FeedbackMessage>,
}

impl FeedbackQueue {
    pub fn new(config: FeedbackConfig) -> Self {
        Self {
            config,
            messages: Vec::new(),
        }
    }

    pub fn push(&mut self, text: impl Into<String>, x: f32, y: f32, color: Rgb) {
        if self.config.lifetime_ticks == 0 {
            return;
        }
        self.messages.push(FeedbackMessage {
            text: text.into(),
            x,
            y,
            color,
            remaining: self.config.lifetime_ticks,
        });
    }

    /// Queue the text for a judgement made at target position (`x`, `y`).
    pub fn push_judgement(&mut self, judgement: Judgement, points: u64, x: f32, y: f32) {
        let (text, color) = match judgement {
            Judgement::Perfect => (format!("{} +{points}", judgement.label()), Rgb::YELLOW),
            Judgement::Good => (format!("{} +{points}", judgement.label()), Rgb::GREEN),
            Judgement::Miss => (judgement.label().to_string(), Rgb::RED),
        };
        self.push(text, x, y - TEXT_RISE, color);
    }

    /// Age every message by one tick, drift it upward and drop expired ones.
    pub fn tick(&mut self) {
        let drift = self.config.drift_per_tick;
        for message in &mut self.messages {
            message.remaining = message.remaining.saturating_sub(1);
            message.y -= drift;
        }
        self.messages.retain(FeedbackMessage::is_active);
    }

    pub fn messages(&self) -> &[FeedbackMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
