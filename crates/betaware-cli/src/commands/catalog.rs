use betaware_core::catalog::CATEGORIES;

pub fn run_catalog() {
    for category in CATEGORIES {
        println!("{}", category.name);
        for game in category.games {
            println!("  {game}");
        }
    }
}
