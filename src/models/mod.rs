pub mod category;
pub mod favorite;
pub mod item;
pub mod seed;
pub mod status;

pub use category::Category;
pub use favorite::Favorite;
pub use item::{Item, ItemWithLink};
pub use seed::{SeedCatalog, SeedItem};
pub use status::StatusCheck;
