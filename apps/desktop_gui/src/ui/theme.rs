use egui::Color32;
use game_core::OptionMark;

pub const ERROR_TEXT: Color32 = Color32::from_rgb(0xE5, 0x48, 0x4D);
pub const MUTED_TEXT: Color32 = Color32::from_rgb(0x8B, 0x8D, 0x98);

const SELECTED_FILL: Color32 = Color32::from_rgb(0x2F, 0x5F, 0xD0);
const CORRECT_FILL: Color32 = Color32::from_rgb(0x2E, 0x8B, 0x57);
const WRONG_FILL: Color32 = Color32::from_rgb(0xB3, 0x2D, 0x2E);

/// Background of a fact button; `None` keeps the widget default.
pub fn option_fill(mark: OptionMark) -> Option<Color32> {
    match mark {
        OptionMark::Plain => None,
        OptionMark::Selected => Some(SELECTED_FILL),
        OptionMark::CorrectResult => Some(CORRECT_FILL),
        OptionMark::WrongResult => Some(WRONG_FILL),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_marks_use_distinct_fills() {
        assert_eq!(option_fill(OptionMark::Plain), None);
        assert_ne!(
            option_fill(OptionMark::CorrectResult),
            option_fill(OptionMark::WrongResult)
        );
        assert_ne!(
            option_fill(OptionMark::Selected),
            option_fill(OptionMark::CorrectResult)
        );
    }
}
