use serde::{Deserialize, Serialize};

/// The fixed set of spending classifications.
#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum Category {
    Food,
    Transport,
    Shopping,
    Bills,
    Other,
}

serde_plain::derive_display_from_serialize!(Category);
serde_plain::derive_fromstr_from_deserialize!(Category);

impl Category {
    /// Every category, in the order they are offered to the user.
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Transport,
        Category::Shopping,
        Category::Bills,
        Category::Other,
    ];

    pub fn icon(&self) -> &'static str {
        match self {
            Category::Food => "\u{1F354}",
            Category::Transport => "\u{1F697}",
            Category::Shopping => "\u{1F6CD}\u{FE0F}",
            Category::Bills => "\u{1F4CB}",
            Category::Other => "\u{1F4CC}",
        }
    }

    /// Hex color used when rendering the category badge.
    pub fn color(&self) -> &'static str {
        match self {
            Category::Food => "#FF6B35",
            Category::Transport => "#4ECDC4",
            Category::Shopping => "#A855F7",
            Category::Bills => "#3B82F6",
            Category::Other => "#8E8E93",
        }
    }
}
