//! Defect categories offered by the wizard.

use std::fmt;

/// Error returned when parsing an unknown category id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown defect category: {0}")]
pub struct UnknownCategory(pub String);

/// What kind of defect is being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Seat,
    Handrail,
    Wall,
    Floor,
    Graffiti,
    Glass,
    Light,
    Other,
}

impl Category {
    /// Every category, in the order the wizard lists them.
    pub const ALL: [Category; 8] = [
        Category::Seat,
        Category::Handrail,
        Category::Wall,
        Category::Floor,
        Category::Graffiti,
        Category::Glass,
        Category::Light,
        Category::Other,
    ];

    /// Stable identifier used on the command line.
    pub fn id(self) -> &'static str {
        match self {
            Category::Seat => "seat",
            Category::Handrail => "handrail",
            Category::Wall => "wall",
            Category::Floor => "floor",
            Category::Graffiti => "graffiti",
            Category::Glass => "glass",
            Category::Light => "light",
            Category::Other => "other",
        }
    }

    /// Label submitted to the reports API.
    pub fn label(self) -> &'static str {
        match self {
            Category::Seat => "Сиденье",
            Category::Handrail => "Поручень",
            Category::Wall => "Стена / дверь",
            Category::Floor => "Пол",
            Category::Graffiti => "Граффити",
            Category::Glass => "Стекло",
            Category::Light => "Освещение",
            Category::Other => "Другое",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Category::Seat => "🪑",
            Category::Handrail => "🪜",
            Category::Wall => "🚪",
            Category::Floor => "🧱",
            Category::Graffiti => "🎨",
            Category::Glass => "🪟",
            Category::Light => "💡",
            Category::Other => "⋯",
        }
    }

    /// Look a category up by its id.
    pub fn parse(id: &str) -> Result<Self, UnknownCategory> {
        Self::ALL
            .into_iter()
            .find(|c| c.id() == id)
            .ok_or_else(|| UnknownCategory(id.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icon(), self.label())
    }
}
