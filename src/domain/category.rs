//! Expense categories: a closed set of labels plus a free-form variant.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Categorises an expense. The fixed variants cover the built-in labels;
/// `Custom` carries an arbitrary non-empty label supplied by the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    FoodAndDrinks,
    Transport,
    BooksAndStudy,
    Entertainment,
    RentAndUtilities,
    Other,
    Custom(String),
}

/// Built-in categories in presentation order.
pub const FIXED_CATEGORIES: [Category; 6] = [
    Category::FoodAndDrinks,
    Category::Transport,
    Category::BooksAndStudy,
    Category::Entertainment,
    Category::RentAndUtilities,
    Category::Other,
];

impl Category {
    pub fn label(&self) -> &str {
        match self {
            Category::FoodAndDrinks => "Food & Drinks",
            Category::Transport => "Transport",
            Category::BooksAndStudy => "Books & Study",
            Category::Entertainment => "Entertainment",
            Category::RentAndUtilities => "Rent & Utilities",
            Category::Other => "Other",
            Category::Custom(label) => label,
        }
    }

    /// Resolves a stored or typed label. Unrecognised non-empty labels become
    /// `Custom`; an empty label falls back to `Other`.
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        for fixed in &FIXED_CATEGORIES {
            if fixed.label().eq_ignore_ascii_case(trimmed) {
                return fixed.clone();
            }
        }
        if trimmed.is_empty() {
            Category::Other
        } else {
            Category::Custom(trimmed.to_string())
        }
    }

    /// Looks up a built-in category by its 1-based menu index.
    pub fn from_index(index: usize) -> Option<Self> {
        FIXED_CATEGORIES.get(index.checked_sub(1)?).cloned()
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Category::Custom(_))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// Stored JSON keeps the category as a plain string label.
impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Category::from_label(&label))
    }
}
