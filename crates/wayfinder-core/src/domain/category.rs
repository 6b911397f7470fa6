use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Value object: Category ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryId(pub String);

/// Top-level questionnaire grouping, addressed externally by its slug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier assigned by the backing store
    pub id: CategoryId,

    /// Human-readable name
    pub name: String,

    /// Unique, URL-routable key (`/flow/:slug`)
    pub slug: String,

    /// Row creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Icon attached to a known category slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryIcon {
    /// Laptop categories
    Laptop,
    /// Televisions and monitors
    Monitor,
    /// Air conditioning
    Airflow,
}

/// Display metadata for rendering a category tile.
///
/// The slug → icon mapping is a closed set; slugs outside it get no icon
/// rather than an undefined lookup result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDisplay {
    /// Icon for the tile, `None` for slugs outside the known set
    pub icon: Option<CategoryIcon>,

    /// Tagline derived from the category name
    pub tagline: String,
}

impl CategoryDisplay {
    /// Build display metadata for a category.
    pub fn for_category(category: &Category) -> Self {
        let icon = match category.slug.as_str() {
            "laptop" => Some(CategoryIcon::Laptop),
            "tv" => Some(CategoryIcon::Monitor),
            "ac" => Some(CategoryIcon::Airflow),
            _ => None,
        };

        Self {
            icon,
            tagline: format!("Find the perfect {}", category.name.to_lowercase()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str, slug: &str) -> Category {
        Category {
            id: CategoryId("c1".to_string()),
            name: name.to_string(),
            slug: slug.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_known_slugs_get_icons() {
        let display = CategoryDisplay::for_category(&category("Laptops", "laptop"));
        assert_eq!(display.icon, Some(CategoryIcon::Laptop));

        let display = CategoryDisplay::for_category(&category("Televisions", "tv"));
        assert_eq!(display.icon, Some(CategoryIcon::Monitor));

        let display = CategoryDisplay::for_category(&category("Air Conditioners", "ac"));
        assert_eq!(display.icon, Some(CategoryIcon::Airflow));
    }

    #[test]
    fn test_unknown_slug_has_no_icon() {
        let display = CategoryDisplay::for_category(&category("Toasters", "toaster"));
        assert_eq!(display.icon, None);
    }

    #[test]
    fn test_tagline_uses_lowercased_name() {
        let display = CategoryDisplay::for_category(&category("Laptops", "laptop"));
        assert_eq!(display.tagline, "Find the perfect laptops");
    }
}
