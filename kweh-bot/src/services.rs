mod catalog;
mod recipe;

pub use catalog::CatalogService;
pub use recipe::{RecipeService, UsedIn, UsedInEntry, USED_IN_LIMIT};
