//! Restaurant menu catalog
//!
//! Dishes are grouped by category. Category order and the order of dishes
//! within a category are significant: item matching scans them in that
//! order and the first hit wins.

use std::fmt;

/// Currency symbol used when a price is displayed
pub const CURRENCY_SYMBOL: &str = "₹";

/// Currency unit used when a price is spoken
pub const CURRENCY_UNIT: &str = "rupees";

/// Dietary category of a dish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Veg,
    NonVeg,
    Drinks,
    Desserts,
}

impl Category {
    /// Catalog key for this category
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Veg => "veg",
            Self::NonVeg => "non-veg",
            Self::Drinks => "drinks",
            Self::Desserts => "desserts",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dish on the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dish {
    pub name: &'static str,
    pub description: &'static str,
    /// Price in whole rupees
    pub price: u32,
}

impl Dish {
    /// Line printed for the customer, e.g. `Lassi - Sweet ... - ₹70`
    #[must_use]
    pub fn display_line(&self) -> String {
        format!(
            "{} - {} - {CURRENCY_SYMBOL}{}",
            self.name, self.description, self.price
        )
    }

    /// Sentence spoken for the customer
    #[must_use]
    pub fn spoken_line(&self) -> String {
        format!(
            "{} - {} - Price: {} {CURRENCY_UNIT}",
            self.name, self.description, self.price
        )
    }
}

/// Dishes of one category
#[derive(Debug, Clone, Copy)]
pub struct Section {
    pub category: Category,
    pub dishes: &'static [Dish],
}

/// The full menu, sections in scan order
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    sections: &'static [Section],
}

const fn dish(name: &'static str, description: &'static str, price: u32) -> Dish {
    Dish {
        name,
        description,
        price,
    }
}

static HOUSE_SECTIONS: &[Section] = &[
    Section {
        category: Category::Veg,
        dishes: &[
            dish("Paneer Butter Masala", "Rich tomato-based gravy with paneer.", 250),
            dish("Dal Makhani", "Slow-cooked black lentils in butter and cream.", 220),
            dish("Aloo Paratha", "Stuffed wheat flatbread with spiced potatoes.", 100),
            dish("Chole Bhature", "Spicy chickpea curry with deep-fried bread.", 150),
            dish("Masala Dosa", "Crispy rice crepe filled with spiced potatoes.", 120),
        ],
    },
    Section {
        category: Category::NonVeg,
        dishes: &[
            dish("Butter Chicken", "Chicken cooked in creamy tomato gravy.", 300),
            dish("Mutton Rogan Josh", "Spicy mutton curry with Kashmiri flavors.", 350),
            dish("Chicken Biryani", "Fragrant basmati rice cooked with spiced chicken.", 280),
            dish("Prawn Curry", "Juicy prawns in coconut-based curry.", 320),
            dish("Fish Fry", "Crispy fried fish with spices.", 250),
        ],
    },
    Section {
        category: Category::Drinks,
        dishes: &[
            dish("Masala Chai", "Traditional Indian spiced tea.", 50),
            dish("Lassi", "Sweet or salted yogurt-based drink.", 70),
            dish("Filter Coffee", "South Indian strong coffee.", 60),
        ],
    },
    Section {
        category: Category::Desserts,
        dishes: &[
            dish("Gulab Jamun", "Deep-fried milk dumplings in sugar syrup.", 80),
            dish("Rasgulla", "Spongy cottage cheese balls in syrup.", 90),
            dish("Kheer", "Sweet rice pudding with saffron and nuts.", 100),
        ],
    },
];

impl Catalog {
    /// Build a catalog from static sections
    #[must_use]
    pub const fn new(sections: &'static [Section]) -> Self {
        Self { sections }
    }

    /// The restaurant's own menu
    #[must_use]
    pub const fn house() -> Self {
        Self::new(HOUSE_SECTIONS)
    }

    /// Sections in scan order
    #[must_use]
    pub const fn sections(&self) -> &'static [Section] {
        self.sections
    }

    /// Dishes of a category, empty if the category is not on this menu
    #[must_use]
    pub fn dishes(&self, category: Category) -> &'static [Dish] {
        self.sections
            .iter()
            .find(|s| s.category == category)
            .map_or(&[], |s| s.dishes)
    }

    /// Every dish, in category order then list order
    pub fn iter(&self) -> impl Iterator<Item = &'static Dish> {
        self.sections.iter().flat_map(|s| s.dishes.iter())
    }

    /// Find the dish the customer asked for
    ///
    /// Returns the first dish, in scan order, whose lowercased name occurs
    /// anywhere in `utterance`. An utterance mentioning two dishes resolves
    /// to whichever comes first in the catalog, not in the sentence.
    #[must_use]
    pub fn find_in_utterance(&self, utterance: &str) -> Option<&'static Dish> {
        let utterance = utterance.to_lowercase();
        self.iter()
            .find(|d| utterance.contains(&d.name.to_lowercase()))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::house()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_house_category_order() {
        let order: Vec<Category> = Catalog::house()
            .sections()
            .iter()
            .map(|s| s.category)
            .collect();
        assert_eq!(
            order,
            vec![
                Category::Veg,
                Category::NonVeg,
                Category::Drinks,
                Category::Desserts
            ]
        );
    }

    #[test]
    fn test_veg_prices() {
        let prices: Vec<u32> = Catalog::house()
            .dishes(Category::Veg)
            .iter()
            .map(|d| d.price)
            .collect();
        assert_eq!(prices, vec![250, 220, 100, 150, 120]);
    }

    #[test]
    fn test_names_unique() {
        let mut names: Vec<&str> = Catalog::house().iter().map(|d| d.name).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
        assert_eq!(total, 16);
    }

    #[test]
    fn test_find_in_sentence() {
        let dish = Catalog::house()
            .find_in_utterance("i want chicken biryani please")
            .unwrap();
        assert_eq!(dish.name, "Chicken Biryani");
    }

    #[test]
    fn test_find_prefers_catalog_order() {
        // Lassi (drinks) is mentioned first but the veg section is scanned first
        let dish = Catalog::house()
            .find_in_utterance("a lassi and a masala dosa")
            .unwrap();
        assert_eq!(dish.name, "Masala Dosa");
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let dish = Catalog::house().find_in_utterance("Fish Fry").unwrap();
        assert_eq!(dish.name, "Fish Fry");
    }

    #[test]
    fn test_bare_keyword_does_not_match() {
        assert!(Catalog::house().find_in_utterance("something with chicken").is_none());
        assert!(Catalog::house().find_in_utterance("").is_none());
    }

    #[test]
    fn test_lines() {
        let lassi = Catalog::house().dishes(Category::Drinks)[1];
        assert_eq!(
            lassi.display_line(),
            "Lassi - Sweet or salted yogurt-based drink. - ₹70"
        );
        assert_eq!(
            lassi.spoken_line(),
            "Lassi - Sweet or salted yogurt-based drink. - Price: 70 rupees"
        );
    }
}
