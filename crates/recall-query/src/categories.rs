use serde::Serialize;

use recall_core::model::Episode;

/// Titles of the episodes sharing one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGroup {
    pub category: String,
    pub titles: Vec<String>,
}

/// Partition episodes by category, keeping first-seen category order and
/// insertion order within each group.
pub fn group_by_category(episodes: &[Episode]) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    for episode in episodes {
        match groups.iter_mut().find(|g| g.category == episode.category) {
            Some(group) => group.titles.push(episode.title.clone()),
            None => groups.push(CategoryGroup {
                category: episode.category.clone(),
                titles: vec![episode.title.clone()],
            }),
        }
    }
    groups
}

/// Episodes in `category`, in stored order.
pub fn episodes_in_category<'a>(episodes: &'a [Episode], category: &str) -> Vec<&'a Episode> {
    episodes.iter().filter(|e| e.category == category).collect()
}
