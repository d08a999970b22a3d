use colorgame_feed::models::{Color, Size};
use serde::Serialize;

pub fn classify(digit: u8) -> (Color, Size) {
    (Color::of(digit), Size::of(digit))
}

/// Libellé affiché sous le badge de prédiction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DisplayLabel {
    Number(u8),
    Color(Color),
    Size(Size),
    PredictionError,
}

impl std::fmt::Display for DisplayLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayLabel::Number(n) => write!(f, "Number: {}", n),
            DisplayLabel::Color(c) => write!(f, "Color: {}", c),
            DisplayLabel::Size(s) => write!(f, "Size: {}", s),
            DisplayLabel::PredictionError => write!(f, "Prediction Error"),
        }
    }
}

/// Compare la prédiction au résultat réel : chiffre, sinon couleur, sinon taille (de la prédiction).
pub fn refine(predicted: u8, actual: u8) -> DisplayLabel {
    let (p_color, p_size) = classify(predicted);
    if predicted == actual {
        DisplayLabel::Number(predicted)
    } else if p_color == Color::of(actual) {
        DisplayLabel::Color(p_color)
    } else {
        DisplayLabel::Size(p_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_reference_digits() {
        assert_eq!(classify(0), (Color::Red, Size::Small));
        assert_eq!(classify(5), (Color::Green, Size::Big));
        assert_eq!(classify(9), (Color::Green, Size::Big));
        assert_eq!(classify(4), (Color::Red, Size::Small));
    }

    #[test]
    fn test_refine_number_match() {
        assert_eq!(refine(4, 4), DisplayLabel::Number(4));
        assert_eq!(refine(4, 4).to_string(), "Number: 4");
    }

    #[test]
    fn test_refine_color_match() {
        // 4 (Small, Red) vs 6 (Big, Red)
        assert_eq!(refine(4, 6), DisplayLabel::Color(Color::Red));
        assert_eq!(refine(4, 6).to_string(), "Color: Red");
    }

    #[test]
    fn test_refine_falls_back_to_size() {
        // 3 (Small, Green) vs 8 (Big, Red)
        assert_eq!(refine(3, 8), DisplayLabel::Size(Size::Small));
        assert_eq!(refine(3, 8).to_string(), "Size: Small");
    }

    #[test]
    fn test_refine_color_beats_size() {
        // même couleur et même taille : la couleur est prioritaire
        assert_eq!(refine(1, 3), DisplayLabel::Color(Color::Green));
    }

    #[test]
    fn test_prediction_error_label() {
        assert_eq!(DisplayLabel::PredictionError.to_string(), "Prediction Error");
    }
}
