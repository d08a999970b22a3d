use serde::{Deserialize, Serialize};

/// Un résultat de période : identifiant externe croissant + chiffre tiré (0-9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "id")]
    pub period: u64,
    pub number: u8,
}

impl Record {
    pub fn new(period: u64, number: u8) -> Self {
        Self { period, number }
    }

    pub fn color(&self) -> Color {
        Color::of(self.number)
    }

    pub fn size(&self) -> Size {
        Size::of(self.number)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    Red,
    Green,
}

impl Color {
    pub fn of(digit: u8) -> Self {
        if digit % 2 == 1 {
            Color::Green
        } else {
            Color::Red
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Red => write!(f, "Red"),
            Color::Green => write!(f, "Green"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Size {
    Small,
    Big,
}

impl Size {
    pub fn of(digit: u8) -> Self {
        if digit <= 4 {
            Size::Small
        } else {
            Size::Big
        }
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Size::Small => write!(f, "Small"),
            Size::Big => write!(f, "Big"),
        }
    }
}

/// 0 et 5 portent une double couleur à l'affichage (violet en plus).
pub fn is_special(digit: u8) -> bool {
    digit == 0 || digit == 5
}
