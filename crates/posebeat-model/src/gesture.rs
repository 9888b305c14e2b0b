use std::fmt;

use serde::{Deserialize, Serialize};

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    pub const YELLOW: Rgb = Rgb(255, 255, 0);
    pub const RED: Rgb = Rgb(255, 50, 50);
}

/// A discrete body pose the classifier can recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GestureLabel {
    ArmsUp,
    RightArmExtended,
    LeftArmExtended,
    ArmsDown,
    ArmsCrossed,
}

impl GestureLabel {
    pub const ALL: [GestureLabel; 5] = [
        Self::ArmsUp,
        Self::RightArmExtended,
        Self::LeftArmExtended,
        Self::ArmsDown,
        Self::ArmsCrossed,
    ];

    pub fn index(self) -> usize {
        match self {
            Self::ArmsUp => 0,
            Self::RightArmExtended => 1,
            Self::LeftArmExtended => 2,
            Self::ArmsDown => 3,
            Self::ArmsCrossed => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Text shown on the target box.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::ArmsUp => "ARMS UP",
            Self::RightArmExtended => "RIGHT ARM →",
            Self::LeftArmExtended => "LEFT ARM ←",
            Self::ArmsDown => "ARMS DOWN",
            Self::ArmsCrossed => "ARMS CROSSED",
        }
    }

    /// Target outline color.
    pub fn color(self) -> Rgb {
        match self {
            Self::ArmsUp => Rgb(255, 255, 0),
            Self::RightArmExtended => Rgb(255, 100, 100),
            Self::LeftArmExtended => Rgb(100, 100, 255),
            Self::ArmsDown => Rgb(255, 0, 255),
            Self::ArmsCrossed => Rgb(0, 255, 255),
        }
    }

    fn bit(self) -> u8 {
        1 << self.index()
    }
}

impl fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Set of simultaneously active gesture labels.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GestureSet(u8);

impl GestureSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, label: GestureLabel) {
        self.0 |= label.bit();
    }

    pub fn contains(self, label: GestureLabel) -> bool {
        self.0 & label.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = GestureLabel> {
        GestureLabel::ALL
            .into_iter()
            .filter(move |label| self.contains(*label))
    }
}

impl From<GestureLabel> for GestureSet {
    fn from(label: GestureLabel) -> Self {
        Self(label.bit())
    }
}

impl FromIterator<GestureLabel> for GestureSet {
    fn from_iter<I: IntoIterator<Item = GestureLabel>>(iter: I) -> Self {
        let mut set = Self::empty();
        for label in iter {
            set.insert(label);
        }
        set
    }
}

impl fmt::Debug for GestureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
