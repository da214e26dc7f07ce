//! Category registry
//!
//! Songs are tagged with header classes drawn from a fixed vocabulary.
//! Each key maps to the title shown in badges and table of contents
//! sections, and sections are ordered by that title.

use std::fmt;

/// A song category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Ladainha,
    Angola,
    Benguela,
    SaoBento,
    Regional,
}

impl Category {
    /// Every category, in registry order
    pub const ALL: [Category; 5] = [
        Category::Ladainha,
        Category::Angola,
        Category::Benguela,
        Category::SaoBento,
        Category::Regional,
    ];

    /// Header class used to tag a song
    pub fn key(self) -> &'static str {
        match self {
            Category::Ladainha => "ladainha",
            Category::Angola => "angola",
            Category::Benguela => "benguela",
            Category::SaoBento => "saobento",
            Category::Regional => "regional",
        }
    }

    /// Display title
    pub fn title(self) -> &'static str {
        match self {
            Category::Ladainha => "Ladainha",
            Category::Angola => "Angola",
            Category::Benguela => "Benguela",
            Category::SaoBento => "Sao Bento",
            Category::Regional => "Regional",
        }
    }

    pub fn from_key(key: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Every category, ordered by display title
    pub fn by_title() -> Vec<Category> {
        let mut all = Category::ALL.to_vec();
        all.sort_by_key(|c| c.title());
        all
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Badge text for a header's classes: recognized titles, sorted and
/// comma-joined. `None` when no class is a known category.
pub fn badge<S: AsRef<str>>(classes: &[S]) -> Option<String> {
    let mut titles: Vec<&str> = classes
        .iter()
        .filter_map(|class| Category::from_key(class.as_ref()))
        .map(Category::title)
        .collect();
    if titles.is_empty() {
        return None;
    }
    titles.sort_unstable();
    Some(titles.join(", "))
}
