use crate::difficulty::Difficulty;

/// Settings chosen at launch that stay fixed for the whole session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameConfig {
    pub difficulty: Difficulty,
    pub show_instructions: bool,
}

impl GameConfig {
    pub fn new(difficulty: Difficulty, show_instructions: bool) -> Self {
        Self {
            difficulty,
            show_instructions,
        }
    }

    /// Build from a difficulty name, tolerating unknown names.
    pub fn from_name(name: &str, show_instructions: bool) -> Self {
        Self::new(Difficulty::from_name(name), show_instructions)
    }
}
