use crate::models::Category;

/// Builds the outbound search link shown next to an item.
///
/// Spaces become `+` so the name drops straight into a search query string.
/// Games get a plain web search qualified with "game", movies and series go
/// to the IMDb finder, and channels go to YouTube's own search.
pub fn external_url(name: &str, category: Category) -> String {
    let encoded = name.replace(' ', "+");
    match category {
        Category::Games => format!("https://www.google.com/search?q={encoded}+game"),
        Category::Movies => format!("https://www.imdb.com/find/?q={encoded}"),
        Category::Series => format!("https://www.imdb.com/find/?q={encoded}+tv+series"),
        Category::Youtube => format!("https://www.youtube.com/results?search_query={encoded}"),
    }
}
