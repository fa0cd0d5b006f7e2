//! Built-in sports and matches offered when placing a bet.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub name: &'static str,
    pub games: &'static [&'static str],
}

pub const CATEGORIES: &[Category] = &[
    Category {
        name: "Futebol",
        games: &[
            "Flamengo x Vasco",
            "Palmeiras x Corinthians",
            "São Paulo x Santos",
            "Grêmio x Internacional",
        ],
    },
    Category {
        name: "Basquete",
        games: &[
            "Lakers x Warriors",
            "Celtics x Heat",
            "Bulls x Knicks",
            "Mavericks x Rockets",
        ],
    },
    Category {
        name: "Tênis",
        games: &[
            "Djokovic x Alcaraz",
            "Nadal x Medvedev",
            "Federer x Murray",
            "Sinner x Tsitsipas",
        ],
    },
];

/// Case-insensitive lookup by category name.
pub fn find_category(name: &str) -> Option<&'static Category> {
    let name = name.trim().to_lowercase();
    CATEGORIES
        .iter()
        .find(|category| category.name.to_lowercase() == name)
}

/// Games of a category, empty when the category is unknown.
pub fn games_for(category: &str) -> &'static [&'static str] {
    find_category(category).map_or(&[], |category| category.games)
}
